//! End-to-end codec behavior: envelopes, PDUs and hostile input.

mod common;

use bytes::Bytes;
use common::*;
use snmp_codec::ber::{MAX_NESTING_DEPTH, decode_length, encode_length};
use snmp_codec::message::pack;
use snmp_codec::{
    CommunityMessage, DecodeErrorCategory, DecodeErrorKind, Error, GenericTrap, GetBulkPdu,
    Oid, OidNames, Pdu, SnmpPdu, TrapV1Pdu, Value, VarBind, Version, oid,
};
use snmp_codec::error::OidErrorKind;
use snmp_codec::oid::MAX_OID_LEN;

#[test]
fn legacy_trap_fields_survive_envelope() {
    init_tracing();
    let trap = link_down_trap();
    let bytes = pack(Version::V1, COMMUNITY_RO, trap.clone()).to_bytes();

    let msg = CommunityMessage::decode(bytes).unwrap();
    assert_eq!(msg.version, Version::V1);
    assert_eq!(msg.community.as_ref(), COMMUNITY_RO);

    let decoded = msg.pdu.as_trap_v1().expect("trap PDU");
    assert_eq!(decoded.enterprise(), &oid!(1, 3, 6, 1, 4, 1, 1234));
    assert_eq!(decoded.agent_addr(), [192, 0, 2, 1]);
    assert_eq!(decoded.generic_trap(), Some(GenericTrap::LinkDown));
    assert_eq!(decoded.specific_trap(), 7);
    assert_eq!(decoded.time_stamp(), 500);
    assert_eq!(
        decoded.varbinds(),
        &[VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::Integer(42))]
    );
}

#[test]
fn enterprise_at_arc_limit_survives_envelope() {
    init_tracing();
    let arcs: Vec<u32> = (0..MAX_OID_LEN as u32).map(|i| 1 + i % 39).collect();
    let enterprise = Oid::new(arcs.iter().copied()).unwrap();
    let trap = TrapV1Pdu::new(
        enterprise.clone(),
        [192, 0, 2, 1],
        GenericTrap::EnterpriseSpecific,
        3,
        0,
        vec![VarBind::new(enterprise.clone(), Value::Null)],
    );
    let bytes = pack(Version::V1, COMMUNITY_RO, trap.clone()).to_bytes();

    let msg = CommunityMessage::decode(bytes).unwrap();
    let decoded = msg.pdu.as_trap_v1().expect("trap PDU");
    assert_eq!(decoded.enterprise().arcs(), &arcs[..]);
    assert_eq!(decoded, &trap);
}

#[test]
fn unencodable_enterprise_cannot_be_built() {
    let too_long = Oid::new((0..130).map(|i| i % 40));
    assert!(matches!(
        too_long,
        Err(Error::InvalidOid {
            kind: OidErrorKind::TooManyArcs { count: 130, max: 128 },
            ..
        })
    ));
    for arcs in [&[1][..], &[1, 40, 5], &[3, 1]] {
        assert!(Oid::from_slice(arcs).is_err(), "{arcs:?}");
    }
}

#[test]
fn empty_binding_list_trap() {
    init_tracing();
    let trap = TrapV1Pdu::new(
        acme_enterprise(),
        [192, 0, 2, 1],
        GenericTrap::WarmStart,
        0,
        1,
        Vec::new(),
    );
    let bytes = trap.to_bytes();
    assert_eq!(&bytes[bytes.len() - 2..], &[0x30, 0x00]);

    let decoded = SnmpPdu::from_bytes(bytes).unwrap();
    assert!(decoded.varbinds().is_empty());
    assert_eq!(decoded.as_trap_v1(), Some(&trap));
}

#[test]
fn every_pdu_shape_roundtrips_through_pack() {
    init_tracing();
    let pdus: Vec<SnmpPdu> = vec![
        Pdu::get_request(1, &[sys_descr(), sys_name()]).into(),
        Pdu::get_next_request(2, &[interfaces_subtree()]).into(),
        Pdu::set_request(3, vec![VarBind::new(sys_name(), "core-rtr-1")]).into(),
        mixed_response().into(),
        Pdu::inform_request(5, vec![VarBind::new(sys_uptime(), Value::TimeTicks(9))]).into(),
        Pdu::trap_v2(6, vec![VarBind::new(sys_uptime(), Value::TimeTicks(10))]).into(),
        Pdu::report(7, vec![]).into(),
        GetBulkPdu::new(8, 1, 25, &[sys_descr(), interfaces_subtree()]).into(),
        link_down_trap().into(),
    ];

    for pdu in pdus {
        for version in [Version::V1, Version::V2c] {
            let bytes = pdu.to_message_body(version, COMMUNITY_RW).to_bytes();
            let msg = CommunityMessage::decode(bytes.clone()).unwrap();
            assert_eq!(msg.version, version);
            assert_eq!(msg.pdu, pdu, "{}", pdu);

            // the tree path agrees with the streaming path
            let tree = Value::from_bytes(bytes).unwrap();
            assert_eq!(CommunityMessage::try_from(tree).unwrap(), msg);
        }
    }
}

#[test]
fn to_bytes_is_idempotent() {
    let pdu = mixed_response();
    let first = pdu.to_bytes();
    let second = pdu.to_bytes();
    assert_eq!(first, second);
    assert_eq!(first.as_ptr(), second.as_ptr());

    let trap = link_down_trap();
    assert_eq!(trap.to_bytes(), trap.to_bytes());
}

#[test]
fn decoded_bytes_reencode_identically() {
    let original = CommunityMessage::v2c(COMMUNITY_RO, mixed_response()).encode();
    let value = Value::from_bytes(original.clone()).unwrap();
    assert_eq!(value.to_bytes(), original);
}

#[test]
fn truncation_anywhere_is_rejected() {
    init_tracing();
    let full = CommunityMessage::v2c(COMMUNITY_RO, mixed_response()).encode();
    for cut in 0..full.len() {
        let truncated = full.slice(..cut);

        let err = Value::from_bytes(truncated.clone()).unwrap_err();
        assert_eq!(
            err.category(),
            Some(DecodeErrorCategory::MalformedLength),
            "cut at {cut}: {err}"
        );
        assert!(CommunityMessage::decode(truncated).is_err(), "cut at {cut}");
    }
}

#[test]
fn length_law() {
    for len in [0usize, 1, 127, 128, 255, 256, 65_535, 65_536, 0x1F_FFFF] {
        let encoded = encode_length(len);
        let (decoded, consumed) = decode_length(&encoded, 0).unwrap();
        assert_eq!(decoded, len);
        assert_eq!(consumed, encoded.len());
    }
    assert_eq!(encode_length(0).as_slice(), &[0x00]);
    assert_eq!(encode_length(127).as_slice(), &[0x7F]);
    assert_eq!(encode_length(128).as_slice(), &[0x81, 0x80]);
}

#[test]
fn short_pdu_header_is_rejected() {
    init_tracing();
    // GetRequest declaring 9 body bytes while its fields need 11
    let data = Bytes::from_static(&[
        0xA0, 0x09, 0x02, 0x01, 0x01, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x00,
    ]);
    let err = Value::from_bytes(data).unwrap_err();
    assert_eq!(
        err.decode_kind(),
        Some(DecodeErrorKind::PduLengthMismatch {
            declared: 9,
            consumed: 11
        })
    );
    assert_eq!(err.category(), Some(DecodeErrorCategory::StructuralMismatch));
}

#[test]
fn unknown_tag_reports_position() {
    // SEQUENCE { INTEGER 1, [APPLICATION 9] }
    let data = Bytes::from_static(&[0x30, 0x05, 0x02, 0x01, 0x01, 0x49, 0x00]);
    let err = Value::from_bytes(data).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            offset: 5,
            kind: DecodeErrorKind::UnknownTag(0x49)
        }
    ));
}

#[test]
fn hostile_nesting_is_bounded() {
    let depth = MAX_NESTING_DEPTH + 8;
    let mut data = Vec::new();
    for i in 0..depth {
        let remaining = (depth - i - 1) * 2;
        data.push(0x30);
        data.push(remaining as u8);
    }
    let err = Value::from_bytes(Bytes::from(data)).unwrap_err();
    assert!(matches!(
        err.decode_kind(),
        Some(DecodeErrorKind::NestingTooDeep { .. })
    ));
}

#[test]
fn names_render_trap_bindings() {
    let names = OidNames::well_known();
    let trap = link_down_trap();
    let rendered: Vec<String> = trap
        .varbinds()
        .iter()
        .map(|vb| format!("{} = {}", names.format(&vb.oid), vb.value))
        .collect();
    assert_eq!(rendered, ["sysUpTime.0 = 42"]);
    assert_eq!(names.format(&trap.v2_trap_oid().unwrap()), "linkDown");
}
