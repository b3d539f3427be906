#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_codec::names::OidNames;
use snmp_codec::oid::Oid;

fuzz_target!(|data: &[u8]| {
    // Every constructible OID re-encodes losslessly
    if let Ok(oid) = Oid::from_ber(data) {
        let again = Oid::from_ber(&oid.to_ber()).expect("re-encoded OID must decode");
        assert_eq!(again, oid);
    }

    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(oid) = Oid::parse(s) {
            let decoded = Oid::from_ber(&oid.to_ber()).expect("parsed OID must encode");
            assert_eq!(decoded, oid);
        }
        let _ = OidNames::well_known().resolve(s);
    }
});
