//! Community-based SNMP message format (v1/v2c).
//!
//! V1 and V2c messages share the same structure and differ only in the
//! version number (0 for v1, 1 for v2c).

use crate::ber::{Decoder, EncodeBuf};
use crate::error::{DecodeErrorKind, Error, Result, StructureErrorKind};
use crate::pdu::SnmpPdu;
use crate::value::Value;
use crate::version::Version;
use bytes::Bytes;

/// Community-based SNMP message (v1/v2c).
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityMessage {
    /// SNMP version (V1 or V2c)
    pub version: Version,
    /// Community string for authentication
    pub community: Bytes,
    /// Protocol data unit
    pub pdu: SnmpPdu,
}

impl CommunityMessage {
    /// Create a new community message.
    pub fn new(version: Version, community: impl Into<Bytes>, pdu: impl Into<SnmpPdu>) -> Self {
        Self {
            version,
            community: community.into(),
            pdu: pdu.into(),
        }
    }

    /// Create a V2c message (convenience constructor).
    pub fn v2c(community: impl Into<Bytes>, pdu: impl Into<SnmpPdu>) -> Self {
        Self::new(Version::V2c, community, pdu)
    }

    /// Create a V1 message (convenience constructor).
    pub fn v1(community: impl Into<Bytes>, pdu: impl Into<SnmpPdu>) -> Self {
        Self::new(Version::V1, community, pdu)
    }

    /// Encode to BER.
    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::new();

        buf.push_sequence(|buf| {
            self.pdu.encode(buf);
            buf.push_octet_string(&self.community);
            buf.push_integer(self.version.as_i32());
        });

        buf.finish()
    }

    /// Decode a complete message.
    ///
    /// The buffer must hold exactly one envelope; trailing bytes are rejected.
    pub fn decode(data: Bytes) -> Result<Self> {
        let mut decoder = Decoder::new(data);
        let msg = Self::decode_from(&mut decoder)?;
        decoder.expect_end()?;
        Ok(msg)
    }

    /// Decode one envelope from an existing decoder.
    pub fn decode_from(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;

        let version_offset = seq.offset();
        let version_num = seq.read_integer()?;
        let version = Version::from_i32(version_num).ok_or_else(|| {
            seq.error_at(version_offset, DecodeErrorKind::UnknownVersion(version_num))
        })?;

        let community = seq.read_octet_string()?;
        let pdu = SnmpPdu::decode(&mut seq)?;
        seq.expect_end()?;

        tracing::trace!(
            target: "snmp_codec::pdu",
            { snmp.version = %version, snmp.pdu_type = %pdu.pdu_type() },
            "decoded message"
        );

        Ok(CommunityMessage {
            version,
            community,
            pdu,
        })
    }

    /// The envelope as a value tree (see [`super::pack`]).
    pub fn to_value(&self) -> Value {
        super::pack(self.version, self.community.clone(), self.pdu.clone())
    }

    /// Consume and return the PDU.
    pub fn into_pdu(self) -> SnmpPdu {
        self.pdu
    }
}

/// Unpack an envelope from a decoded value tree.
impl TryFrom<Value> for CommunityMessage {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Sequence(items) = value else {
            return Err(Error::structure(StructureErrorKind::ExpectedSequence {
                actual: value.tag(),
            }));
        };

        let [version, community, pdu]: [Value; 3] = items.try_into().map_err(|items: Vec<Value>| {
            Error::structure(StructureErrorKind::EnvelopeArity { count: items.len() })
        })?;

        let version = match version {
            Value::Integer(v) => Version::from_i32(v)
                .ok_or_else(|| Error::structure(StructureErrorKind::EnvelopeVersion { value: v }))?,
            other => return Err(field_error(0, &other)),
        };
        let community = match community {
            Value::OctetString(c) => c,
            other => return Err(field_error(1, &other)),
        };
        let pdu = match pdu {
            Value::Pdu(pdu) => *pdu,
            other => return Err(field_error(2, &other)),
        };

        Ok(CommunityMessage {
            version,
            community,
            pdu,
        })
    }
}

fn field_error(position: usize, actual: &Value) -> Error {
    let kind = StructureErrorKind::EnvelopeField {
        position,
        actual: actual.tag(),
    };
    tracing::debug!(target: "snmp_codec::ber", kind = %kind, "invalid message envelope");
    Error::structure(kind)
}
