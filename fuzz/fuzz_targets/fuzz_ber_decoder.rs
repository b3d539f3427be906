#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_codec::ber::{Decoder, decode_length};
use snmp_codec::value::Value;
use snmp_codec::varbind::{VarBind, decode_varbind_list, varbinds_from_value};

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    let _ = decode_length(data, 0);

    // Typed primitives
    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_integer();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_oid();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_ip_address();

    // Whole value trees; anything accepted must re-encode to the same bytes
    if let Ok(value) = Value::from_bytes(bytes.clone()) {
        let reencoded = value.to_bytes();
        let again = Value::from_bytes(reencoded).expect("re-encoded value must decode");
        assert_eq!(again, value);
        let _ = varbinds_from_value(&value);
    }

    let mut decoder = Decoder::new(bytes.clone());
    let _ = VarBind::decode(&mut decoder);

    let mut decoder = Decoder::new(bytes);
    let _ = decode_varbind_list(&mut decoder);
});
