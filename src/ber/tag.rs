//! Tag octets used by SNMP.
//!
//! SNMP only ever needs single-octet tags (X.690 8.1.2 low-tag-number form):
//! the top two bits hold the class, bit 5 marks a constructed encoding and
//! the low five bits are the number within the class.

/// Class bits.
pub mod class {
    pub const UNIVERSAL: u8 = 0b0000_0000;
    pub const APPLICATION: u8 = 0b0100_0000;
    pub const CONTEXT_SPECIFIC: u8 = 0b1000_0000;
}

/// Set on every constructed encoding.
pub const CONSTRUCTED: u8 = 0b0010_0000;

/// ASN.1 universal types.
pub mod universal {
    pub const INTEGER: u8 = 0x02;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    /// SEQUENCE / SEQUENCE OF, always constructed.
    pub const SEQUENCE: u8 = 0x10 | super::CONSTRUCTED;
    /// Segmented OCTET STRING; valid BER but never produced by SNMP
    /// agents, and rejected here.
    pub const OCTET_STRING_CONSTRUCTED: u8 = OCTET_STRING | super::CONSTRUCTED;
}

/// SMI application types (RFC 2578).
pub mod application {
    use super::class::APPLICATION;

    /// IpAddress; the v1 trap NetworkAddress uses the same tag.
    pub const IP_ADDRESS: u8 = APPLICATION;
    pub const COUNTER32: u8 = APPLICATION | 1;
    /// Gauge32 and Unsigned32 share a tag.
    pub const GAUGE32: u8 = APPLICATION | 2;
    pub const TIMETICKS: u8 = APPLICATION | 3;
    pub const OPAQUE: u8 = APPLICATION | 4;
    pub const COUNTER64: u8 = APPLICATION | 6;
}

/// Varbind exception markers (RFC 3416), encoded as implicit NULL.
pub mod context {
    use super::class::CONTEXT_SPECIFIC;

    pub const NO_SUCH_OBJECT: u8 = CONTEXT_SPECIFIC;
    pub const NO_SUCH_INSTANCE: u8 = CONTEXT_SPECIFIC | 1;
    pub const END_OF_MIB_VIEW: u8 = CONTEXT_SPECIFIC | 2;
}

/// The nine PDU tags, `[n] IMPLICIT SEQUENCE` for n in 0..=8.
pub mod pdu {
    const BASE: u8 = super::class::CONTEXT_SPECIFIC | super::CONSTRUCTED;

    pub const GET_REQUEST: u8 = BASE;
    pub const GET_NEXT_REQUEST: u8 = BASE | 1;
    pub const RESPONSE: u8 = BASE | 2;
    pub const SET_REQUEST: u8 = BASE | 3;
    pub const TRAP_V1: u8 = BASE | 4;
    pub const GET_BULK_REQUEST: u8 = BASE | 5;
    pub const INFORM_REQUEST: u8 = BASE | 6;
    pub const TRAP_V2: u8 = BASE | 7;
    pub const REPORT: u8 = BASE | 8;
}

#[inline]
pub const fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTED != 0
}

/// True for 0xA0..=0xA8.
#[inline]
pub const fn is_pdu(tag: u8) -> bool {
    tag >= pdu::GET_REQUEST && tag <= pdu::REPORT
}

/// ASN.1 type name for diagnostics.
pub fn type_name(tag: u8) -> &'static str {
    match tag {
        universal::INTEGER => "INTEGER",
        universal::OCTET_STRING => "OCTET STRING",
        universal::NULL => "NULL",
        universal::OBJECT_IDENTIFIER => "OBJECT IDENTIFIER",
        universal::SEQUENCE => "SEQUENCE",
        application::IP_ADDRESS => "IpAddress",
        application::COUNTER32 => "Counter32",
        application::GAUGE32 => "Gauge32",
        application::TIMETICKS => "TimeTicks",
        application::OPAQUE => "Opaque",
        application::COUNTER64 => "Counter64",
        context::NO_SUCH_OBJECT => "noSuchObject",
        context::NO_SUCH_INSTANCE => "noSuchInstance",
        context::END_OF_MIB_VIEW => "endOfMibView",
        t if is_pdu(t) => "PDU",
        _ => "unknown",
    }
}
