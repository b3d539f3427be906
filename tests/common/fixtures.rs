//! Common test fixtures and constants.

use bytes::Bytes;
use snmp_codec::{GenericTrap, Oid, Pdu, TrapV1Pdu, Value, VarBind, oid};

// =============================================================================
// Standard system MIB OIDs (1.3.6.1.2.1.1.*)
// =============================================================================

pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}
pub fn sys_object_id() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 2, 0)
}
pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}
pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}

/// Interfaces subtree root: 1.3.6.1.2.1.2
pub fn interfaces_subtree() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2)
}

/// Nonexistent OID for testing NoSuchObject/NoSuchInstance
pub fn nonexistent_oid() -> Oid {
    oid!(1, 3, 6, 1, 99, 99, 99, 0)
}

/// Enterprise OID used by trap fixtures: 1.3.6.1.4.1.1234
pub fn acme_enterprise() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 1234)
}

// =============================================================================
// Communities
// =============================================================================

/// Read-only community
pub const COMMUNITY_RO: &[u8] = b"public";
/// Read-write community
pub const COMMUNITY_RW: &[u8] = b"private";

// =============================================================================
// PDU fixtures
// =============================================================================

/// linkDown trap from 192.0.2.1 carrying sysUpTime.0 = 42.
pub fn link_down_trap() -> TrapV1Pdu {
    TrapV1Pdu::new(
        acme_enterprise(),
        [192, 0, 2, 1],
        GenericTrap::LinkDown,
        7,
        500,
        vec![VarBind::new(sys_uptime(), Value::Integer(42))],
    )
}

/// A response carrying one binding of every scalar type.
pub fn mixed_response() -> Pdu {
    Pdu::response(
        77,
        snmp_codec::ErrorStatus::NoError,
        0,
        vec![
            VarBind::new(sys_descr(), Value::OctetString(Bytes::from_static(b"Linux router"))),
            VarBind::new(sys_object_id(), Value::ObjectIdentifier(acme_enterprise())),
            VarBind::new(sys_uptime(), Value::TimeTicks(123_456)),
            VarBind::new(sys_name(), Value::OctetString(Bytes::new())),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 4, 20, 1, 1), Value::IpAddress([10, 0, 0, 1])),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 1), Value::Counter32(u32::MAX)),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 5, 1), Value::Gauge32(1_000_000_000)),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 6, 1), Value::Counter64(u64::MAX)),
            VarBind::new(
                oid!(1, 3, 6, 1, 4, 1, 1234, 1),
                Value::Opaque(Bytes::from_static(&[0x9F, 0x78, 0x04])),
            ),
            VarBind::new(oid!(1, 3, 6, 1, 4, 1, 1234, 2), Value::Integer(-129)),
            VarBind::new(nonexistent_oid(), Value::NoSuchObject),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 9, 1, 2, 99), Value::NoSuchInstance),
            VarBind::new(oid!(1, 3, 6, 1, 6), Value::EndOfMibView),
        ],
    )
}
