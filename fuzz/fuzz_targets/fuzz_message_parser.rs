#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_codec::message::CommunityMessage;
use snmp_codec::pdu::SnmpPdu;
use snmp_codec::value::Value;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    if let Ok(msg) = CommunityMessage::decode(bytes.clone()) {
        // Streaming and tree paths must agree
        let tree =
            Value::from_bytes(bytes.clone()).expect("accepted message must decode as a value");
        let from_tree = CommunityMessage::try_from(tree).expect("tree must have envelope shape");
        assert_eq!(from_tree, msg);
    }

    let _ = SnmpPdu::from_bytes(bytes);
});
