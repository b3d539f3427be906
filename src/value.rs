//! SNMP value types.
//!
//! [`Value`] is the typed value tree: every SMI scalar, the exception markers
//! used in responses, SEQUENCE, and one variant for an embedded PDU. Decoding
//! dispatches on the tag byte; any tag outside this set is an error.

use crate::ber::{Decoder, EncodeBuf, tag};
use crate::error::{DecodeErrorKind, Result};
use crate::oid::Oid;
use crate::pdu::{PduType, SnmpPdu};
use bytes::Bytes;

/// SNMP value.
///
/// Equality compares decoded content. Two values decoded from different
/// (for example non-minimal) encodings of the same content are equal.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// INTEGER (signed 32-bit)
    Integer(i32),

    /// OCTET STRING (arbitrary bytes).
    OctetString(Bytes),

    /// NULL
    Null,

    /// OBJECT IDENTIFIER
    ObjectIdentifier(Oid),

    /// IpAddress (4 bytes, network order). Also the v1 trap NetworkAddress.
    IpAddress([u8; 4]),

    /// Counter32 (unsigned 32-bit, wrapping)
    Counter32(u32),

    /// Gauge32 / Unsigned32
    Gauge32(u32),

    /// TimeTicks (hundredths of a second)
    TimeTicks(u32),

    /// Opaque (legacy, arbitrary bytes)
    Opaque(Bytes),

    /// Counter64 (unsigned 64-bit, wrapping). Not valid in SNMPv1.
    Counter64(u64),

    /// noSuchObject exception.
    NoSuchObject,

    /// noSuchInstance exception.
    NoSuchInstance,

    /// endOfMibView exception, the normal end of a walk.
    EndOfMibView,

    /// SEQUENCE of values, in wire order.
    Sequence(Vec<Value>),

    /// A complete PDU embedded in a value tree (the third element of a message).
    Pdu(Box<SnmpPdu>),
}

impl Value {
    /// The tag byte this value encodes with.
    pub fn tag(&self) -> u8 {
        match self {
            Value::Integer(_) => tag::universal::INTEGER,
            Value::OctetString(_) => tag::universal::OCTET_STRING,
            Value::Null => tag::universal::NULL,
            Value::ObjectIdentifier(_) => tag::universal::OBJECT_IDENTIFIER,
            Value::IpAddress(_) => tag::application::IP_ADDRESS,
            Value::Counter32(_) => tag::application::COUNTER32,
            Value::Gauge32(_) => tag::application::GAUGE32,
            Value::TimeTicks(_) => tag::application::TIMETICKS,
            Value::Opaque(_) => tag::application::OPAQUE,
            Value::Counter64(_) => tag::application::COUNTER64,
            Value::NoSuchObject => tag::context::NO_SUCH_OBJECT,
            Value::NoSuchInstance => tag::context::NO_SUCH_INSTANCE,
            Value::EndOfMibView => tag::context::END_OF_MIB_VIEW,
            Value::Sequence(_) => tag::universal::SEQUENCE,
            Value::Pdu(pdu) => pdu.pdu_type().tag(),
        }
    }

    /// Try to get as i32.
    ///
    /// ```
    /// use snmp_codec::Value;
    ///
    /// assert_eq!(Value::Integer(-100).as_i32(), Some(-100));
    /// assert_eq!(Value::Counter32(42).as_i32(), None);
    /// ```
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32 (Counter32, Gauge32, TimeTicks, or non-negative Integer).
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            Value::Integer(v) => u32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get as u64 (Counter64 or any unsigned 32-bit type).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Counter64(v) => Some(*v),
            other => other.as_u32().map(u64::from),
        }
    }

    /// Try to get the raw bytes of an OctetString or Opaque.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(data) | Value::Opaque(data) => Some(data),
            _ => None,
        }
    }

    /// Try to get an OctetString as UTF-8 text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::OctetString(data) => std::str::from_utf8(data).ok(),
            _ => None,
        }
    }

    /// Try to get as an OID.
    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    /// Try to get an IpAddress as [`std::net::Ipv4Addr`].
    pub fn as_ip(&self) -> Option<std::net::Ipv4Addr> {
        match self {
            Value::IpAddress(addr) => Some(std::net::Ipv4Addr::from(*addr)),
            _ => None,
        }
    }

    /// Try to get the children of a SEQUENCE.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get an embedded PDU.
    pub fn as_pdu(&self) -> Option<&SnmpPdu> {
        match self {
            Value::Pdu(pdu) => Some(pdu),
            _ => None,
        }
    }

    /// Check for the response exceptions (noSuchObject, noSuchInstance, endOfMibView).
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }

    /// Check whether this value has child values on the wire.
    pub fn is_constructed(&self) -> bool {
        tag::is_constructed(self.tag())
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        match self {
            Value::Integer(v) => buf.push_integer(*v),
            Value::OctetString(data) => buf.push_octet_string(data),
            Value::Null => buf.push_null(),
            Value::ObjectIdentifier(oid) => buf.push_oid(oid),
            Value::IpAddress(addr) => buf.push_ip_address(*addr),
            Value::Counter32(v) => buf.push_unsigned32(tag::application::COUNTER32, *v),
            Value::Gauge32(v) => buf.push_unsigned32(tag::application::GAUGE32, *v),
            Value::TimeTicks(v) => buf.push_unsigned32(tag::application::TIMETICKS, *v),
            Value::Opaque(data) => buf.push_tlv(tag::application::OPAQUE, data),
            Value::Counter64(v) => buf.push_integer64(*v),
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView => {
                buf.push_empty(self.tag())
            }
            Value::Sequence(items) => buf.push_sequence(|buf| {
                for item in items.iter().rev() {
                    item.encode(buf);
                }
            }),
            Value::Pdu(pdu) => pdu.encode(buf),
        }
    }

    /// Encode to a standalone byte buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = EncodeBuf::new();
        self.encode(&mut buf);
        buf.finish()
    }

    /// Decode one value from the decoder.
    ///
    /// Constructed values are decoded recursively from a sub-decoder bounded
    /// to exactly their declared length.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let tag_offset = decoder.offset();
        let tag = decoder.read_tag()?;
        let len = decoder.read_length()?;

        match tag {
            tag::universal::INTEGER => Ok(Value::Integer(decoder.read_integer_value(len)?)),
            tag::universal::OCTET_STRING => Ok(Value::OctetString(decoder.read_bytes(len)?)),
            tag::universal::NULL => {
                if len != 0 {
                    return Err(decoder.error_at(tag_offset, DecodeErrorKind::InvalidNull));
                }
                Ok(Value::Null)
            }
            tag::universal::OBJECT_IDENTIFIER => {
                Ok(Value::ObjectIdentifier(decoder.read_oid_value(len)?))
            }
            tag::application::IP_ADDRESS => {
                Ok(Value::IpAddress(decoder.read_ip_address_value(len)?))
            }
            tag::application::COUNTER32 => {
                Ok(Value::Counter32(decoder.read_unsigned32_value(len)?))
            }
            tag::application::GAUGE32 => Ok(Value::Gauge32(decoder.read_unsigned32_value(len)?)),
            tag::application::TIMETICKS => {
                Ok(Value::TimeTicks(decoder.read_unsigned32_value(len)?))
            }
            tag::application::OPAQUE => Ok(Value::Opaque(decoder.read_bytes(len)?)),
            tag::application::COUNTER64 => {
                Ok(Value::Counter64(decoder.read_integer64_value(len)?))
            }
            // The exceptions are IMPLICIT NULL
            tag::context::NO_SUCH_OBJECT
            | tag::context::NO_SUCH_INSTANCE
            | tag::context::END_OF_MIB_VIEW => {
                if len != 0 {
                    return Err(decoder.error_at(tag_offset, DecodeErrorKind::InvalidNull));
                }
                Ok(match tag {
                    tag::context::NO_SUCH_OBJECT => Value::NoSuchObject,
                    tag::context::NO_SUCH_INSTANCE => Value::NoSuchInstance,
                    _ => Value::EndOfMibView,
                })
            }
            tag::universal::SEQUENCE => {
                let mut seq = decoder.sub_decoder(len)?;
                let mut items = Vec::new();
                while !seq.is_empty() {
                    items.push(Value::decode(&mut seq)?);
                }
                Ok(Value::Sequence(items))
            }
            tag::universal::OCTET_STRING_CONSTRUCTED => Err(
                decoder.error_at(tag_offset, DecodeErrorKind::ConstructedOctetString),
            ),
            t => match PduType::from_tag(t) {
                Some(pdu_type) => {
                    let pdu = SnmpPdu::decode_body(pdu_type, decoder, len)?;
                    Ok(Value::Pdu(Box::new(pdu)))
                }
                None => Err(decoder.error_at(tag_offset, DecodeErrorKind::UnknownTag(t))),
            },
        }
    }

    /// Decode exactly one value from a complete buffer.
    ///
    /// Bytes left after the value are an error.
    ///
    /// ```
    /// use snmp_codec::Value;
    ///
    /// let v = Value::from_bytes(&[0x30, 0x03, 0x02, 0x01, 0x2A][..]).unwrap();
    /// assert_eq!(v, Value::Sequence(vec![Value::Integer(42)]));
    ///
    /// assert!(Value::from_bytes(&[0x30, 0x03, 0x02, 0x01][..]).is_err());
    /// ```
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        let mut decoder = Decoder::new(data.into());
        let value = Value::decode(&mut decoder)?;
        decoder.expect_end()?;
        Ok(value)
    }
}

/// Format bytes as hex string (lowercase, no separator).
fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::OctetString(data) => match std::str::from_utf8(data) {
                Ok(s) if !s.chars().any(char::is_control) => write!(f, "{}", s),
                _ => write!(f, "0x{}", hex_string(data)),
            },
            Value::Null => write!(f, "NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::IpAddress(addr) => write!(f, "{}", std::net::Ipv4Addr::from(*addr)),
            Value::Counter32(v) | Value::Gauge32(v) => write!(f, "{}", v),
            Value::TimeTicks(v) => {
                let secs = v / 100;
                write!(
                    f,
                    "({}) {}d {:02}:{:02}:{:02}.{:02}",
                    v,
                    secs / 86400,
                    (secs % 86400) / 3600,
                    (secs % 3600) / 60,
                    secs % 60,
                    v % 100
                )
            }
            Value::Opaque(data) => write!(f, "Opaque(0x{})", hex_string(data)),
            Value::Counter64(v) => write!(f, "{}", v),
            Value::NoSuchObject => write!(f, "noSuchObject"),
            Value::NoSuchInstance => write!(f, "noSuchInstance"),
            Value::EndOfMibView => write!(f, "endOfMibView"),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Pdu(pdu) => write!(f, "{}", pdu),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::OctetString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::OctetString(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(data: &[u8]) -> Self {
        Value::OctetString(Bytes::copy_from_slice(data))
    }
}

impl From<Bytes> for Value {
    fn from(data: Bytes) -> Self {
        Value::OctetString(data)
    }
}

impl From<Oid> for Value {
    fn from(oid: Oid) -> Self {
        Value::ObjectIdentifier(oid)
    }
}

impl From<std::net::Ipv4Addr> for Value {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Value::IpAddress(addr.octets())
    }
}

impl From<[u8; 4]> for Value {
    fn from(addr: [u8; 4]) -> Self {
        Value::IpAddress(addr)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Counter64(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<SnmpPdu> for Value {
    fn from(pdu: SnmpPdu) -> Self {
        Value::Pdu(Box::new(pdu))
    }
}
