//! SNMP message envelope.
//!
//! A community-based message is the outermost unit placed on the wire:
//! `SEQUENCE { version INTEGER, community OCTET STRING, pdu PDU }`.
//!
//! - [`pack`] builds the envelope as a [`Value`] tree.
//! - [`CommunityMessage`] is the typed form with direct BER encode/decode.

mod community;

pub use community::CommunityMessage;

use crate::pdu::SnmpPdu;
use crate::value::Value;
use crate::version::Version;
use bytes::Bytes;

/// Build the envelope value for `pdu`.
///
/// Encoding the result with [`Value::to_bytes`] produces the same bytes as
/// [`CommunityMessage::encode`].
///
/// ```
/// use snmp_codec::message::pack;
/// use snmp_codec::pdu::Pdu;
/// use snmp_codec::{Value, Version, oid};
///
/// let pdu = Pdu::get_request(1, &[oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)]);
/// let envelope = pack(Version::V1, "public", pdu);
/// let items = envelope.as_sequence().unwrap();
/// assert_eq!(items[0], Value::Integer(0));
/// assert_eq!(items[1].as_str(), Some("public"));
/// ```
pub fn pack(version: Version, community: impl Into<Bytes>, pdu: impl Into<SnmpPdu>) -> Value {
    Value::Sequence(vec![
        Value::Integer(version.as_i32()),
        Value::OctetString(community.into()),
        Value::Pdu(Box::new(pdu.into())),
    ])
}
