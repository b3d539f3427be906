//! SNMP Protocol Data Units (PDUs).
//!
//! Three wire shapes cover the nine PDU tags:
//!
//! - [`Pdu`]: request-id, error-status, error-index, varbinds. Used by every
//!   request, response and v2 notification tag.
//! - [`GetBulkPdu`]: request-id, non-repeaters, max-repetitions, varbinds.
//! - [`TrapV1Pdu`]: the SNMPv1 trap layout (enterprise, agent-addr,
//!   generic-trap, specific-trap, time-stamp, varbinds).
//!
//! [`SnmpPdu`] closes over the three and is the single place that maps a tag
//! to a decoder. Each shape memoizes its encoding on first use.

mod bulk;
mod request;
mod trap;

pub use bulk::GetBulkPdu;
pub use request::Pdu;
pub use trap::{GenericTrap, TrapV1Pdu};

use crate::ber::{Decoder, EncodeBuf};
use crate::error::{DecodeErrorKind, Result};
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;
use bytes::Bytes;

/// PDU type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PduType {
    GetRequest = 0xA0,
    GetNextRequest = 0xA1,
    Response = 0xA2,
    SetRequest = 0xA3,
    TrapV1 = 0xA4,
    GetBulkRequest = 0xA5,
    InformRequest = 0xA6,
    TrapV2 = 0xA7,
    Report = 0xA8,
}

impl PduType {
    /// Create from tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0xA0 => Some(Self::GetRequest),
            0xA1 => Some(Self::GetNextRequest),
            0xA2 => Some(Self::Response),
            0xA3 => Some(Self::SetRequest),
            0xA4 => Some(Self::TrapV1),
            0xA5 => Some(Self::GetBulkRequest),
            0xA6 => Some(Self::InformRequest),
            0xA7 => Some(Self::TrapV2),
            0xA8 => Some(Self::Report),
            _ => None,
        }
    }

    /// Get the tag byte.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether this tag uses the request-id/error-status/error-index layout.
    pub fn has_request_layout(self) -> bool {
        !matches!(self, Self::TrapV1 | Self::GetBulkRequest)
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetRequest => write!(f, "GetRequest"),
            Self::GetNextRequest => write!(f, "GetNextRequest"),
            Self::Response => write!(f, "Response"),
            Self::SetRequest => write!(f, "SetRequest"),
            Self::TrapV1 => write!(f, "TrapV1"),
            Self::GetBulkRequest => write!(f, "GetBulkRequest"),
            Self::InformRequest => write!(f, "InformRequest"),
            Self::TrapV2 => write!(f, "TrapV2"),
            Self::Report => write!(f, "Report"),
        }
    }
}

/// Any SNMPv1/v2c PDU.
#[derive(Debug, Clone, PartialEq)]
pub enum SnmpPdu {
    /// Request, response, inform, v2 trap or report.
    Pdu(Pdu),
    /// GetBulkRequest.
    GetBulk(GetBulkPdu),
    /// SNMPv1 Trap.
    TrapV1(TrapV1Pdu),
}

impl SnmpPdu {
    /// Decode a complete PDU TLV, dispatching on its tag.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let tag_offset = decoder.offset();
        let tag = decoder.read_tag()?;
        let Some(pdu_type) = PduType::from_tag(tag) else {
            return Err(decoder.error_at(tag_offset, DecodeErrorKind::UnknownPduType(tag)));
        };
        let len = decoder.read_length()?;
        Self::decode_body(pdu_type, decoder, len)
    }

    /// Decode the fields of a PDU whose tag and length have been read.
    ///
    /// `decoder` must be positioned at the first field; on success it has
    /// advanced past exactly `length` bytes.
    pub fn decode_body(pdu_type: PduType, decoder: &mut Decoder, length: usize) -> Result<Self> {
        tracing::trace!(
            target: "snmp_codec::pdu",
            { snmp.pdu_type = %pdu_type, snmp.offset = decoder.position(), snmp.length = length },
            "decoding PDU"
        );
        match pdu_type {
            PduType::TrapV1 => TrapV1Pdu::decode_body(decoder, length).map(Self::TrapV1),
            PduType::GetBulkRequest => GetBulkPdu::decode_body(decoder, length).map(Self::GetBulk),
            other => Pdu::decode_body(other, decoder, length).map(Self::Pdu),
        }
    }

    /// Decode exactly one PDU from a complete buffer.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        let mut decoder = Decoder::new(data.into());
        let pdu = Self::decode(&mut decoder)?;
        decoder.expect_end()?;
        Ok(pdu)
    }

    /// The PDU type tag.
    pub fn pdu_type(&self) -> PduType {
        match self {
            Self::Pdu(pdu) => pdu.pdu_type(),
            Self::GetBulk(_) => PduType::GetBulkRequest,
            Self::TrapV1(_) => PduType::TrapV1,
        }
    }

    /// The variable bindings, whatever the shape.
    pub fn varbinds(&self) -> &[VarBind] {
        match self {
            Self::Pdu(pdu) => pdu.varbinds(),
            Self::GetBulk(pdu) => pdu.varbinds(),
            Self::TrapV1(pdu) => pdu.varbinds(),
        }
    }

    /// The request-id, absent from SNMPv1 traps.
    pub fn request_id(&self) -> Option<i32> {
        match self {
            Self::Pdu(pdu) => Some(pdu.request_id()),
            Self::GetBulk(pdu) => Some(pdu.request_id()),
            Self::TrapV1(_) => None,
        }
    }

    /// The full TLV encoding, computed once per instance.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Self::Pdu(pdu) => pdu.to_bytes(),
            Self::GetBulk(pdu) => pdu.to_bytes(),
            Self::TrapV1(pdu) => pdu.to_bytes(),
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_bytes(&self.to_bytes());
    }

    /// Wrap in a message envelope value (see [`crate::message::pack`]).
    pub fn to_message_body(&self, version: Version, community: impl Into<Bytes>) -> Value {
        crate::message::pack(version, community, self.clone())
    }

    /// Get the request/response shape, if that is what this is.
    pub fn as_pdu(&self) -> Option<&Pdu> {
        match self {
            Self::Pdu(pdu) => Some(pdu),
            _ => None,
        }
    }

    /// Get the GetBulk shape, if that is what this is.
    pub fn as_get_bulk(&self) -> Option<&GetBulkPdu> {
        match self {
            Self::GetBulk(pdu) => Some(pdu),
            _ => None,
        }
    }

    /// Get the SNMPv1 trap shape, if that is what this is.
    pub fn as_trap_v1(&self) -> Option<&TrapV1Pdu> {
        match self {
            Self::TrapV1(pdu) => Some(pdu),
            _ => None,
        }
    }
}

impl From<Pdu> for SnmpPdu {
    fn from(pdu: Pdu) -> Self {
        Self::Pdu(pdu)
    }
}

impl From<GetBulkPdu> for SnmpPdu {
    fn from(pdu: GetBulkPdu) -> Self {
        Self::GetBulk(pdu)
    }
}

impl From<TrapV1Pdu> for SnmpPdu {
    fn from(pdu: TrapV1Pdu) -> Self {
        Self::TrapV1(pdu)
    }
}

impl std::fmt::Display for SnmpPdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdu(pdu) => std::fmt::Display::fmt(pdu, f),
            Self::GetBulk(pdu) => std::fmt::Display::fmt(pdu, f),
            Self::TrapV1(pdu) => std::fmt::Display::fmt(pdu, f),
        }
    }
}

/// Read a PDU body with `read`, then check it used exactly `length` bytes.
///
/// The fields are read from a view over everything left in `decoder`, so a
/// body whose fields need more than the header declared is reported as
/// [`DecodeErrorKind::PduLengthMismatch`] rather than as a generic
/// truncation. Bytes left inside the declared body are
/// [`DecodeErrorKind::TrailingData`].
fn decode_checked<T>(
    decoder: &mut Decoder,
    length: usize,
    read: impl FnOnce(&mut Decoder) -> Result<T>,
) -> Result<T> {
    let mut body = decoder.lookahead()?;
    let value = read(&mut body)?;

    let consumed = body.offset();
    if consumed > length {
        return Err(decoder.error(DecodeErrorKind::PduLengthMismatch {
            declared: length,
            consumed,
        }));
    }
    if consumed < length {
        return Err(body.error(DecodeErrorKind::TrailingData {
            remaining: length - consumed,
        }));
    }

    decoder.skip(length)?;
    Ok(value)
}

/// Encode a PDU: `fields` pushes the body in reverse order.
fn encode_pdu(tag: u8, fields: impl FnOnce(&mut EncodeBuf)) -> Bytes {
    let mut buf = EncodeBuf::new();
    buf.push_constructed(tag, fields);
    buf.finish()
}

fn fmt_varbinds(f: &mut std::fmt::Formatter<'_>, varbinds: &[VarBind]) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, vb) in varbinds.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", vb)?;
    }
    write!(f, "]")
}
