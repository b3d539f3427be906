//! GetBulkRequest PDU shape (RFC 3416 `BulkPDU`).

use std::sync::OnceLock;

use super::{PduType, SnmpPdu, decode_checked, encode_pdu, fmt_varbinds};
use crate::ber::{Decoder, EncodeBuf, tag};
use crate::error::Result;
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::{VarBind, decode_varbind_list, encode_varbind_list};
use crate::version::Version;
use bytes::Bytes;

/// GETBULK request PDU. Not valid inside an SNMPv1 message.
#[derive(Clone)]
pub struct GetBulkPdu {
    request_id: i32,
    non_repeaters: i32,
    max_repetitions: i32,
    varbinds: Vec<VarBind>,
    encoded: OnceLock<Bytes>,
}

impl GetBulkPdu {
    /// Create a GETBULK request for `oids`.
    pub fn new(request_id: i32, non_repeaters: i32, max_repetitions: i32, oids: &[Oid]) -> Self {
        Self::with_varbinds(
            request_id,
            non_repeaters,
            max_repetitions,
            oids.iter().cloned().map(VarBind::null).collect(),
        )
    }

    /// Create a GETBULK request from explicit bindings.
    pub fn with_varbinds(
        request_id: i32,
        non_repeaters: i32,
        max_repetitions: i32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            request_id,
            non_repeaters,
            max_repetitions,
            varbinds,
            encoded: OnceLock::new(),
        }
    }

    /// Request ID.
    pub fn request_id(&self) -> i32 {
        self.request_id
    }

    /// Number of leading bindings fetched once.
    pub fn non_repeaters(&self) -> i32 {
        self.non_repeaters
    }

    /// Maximum repetitions for the remaining bindings.
    pub fn max_repetitions(&self) -> i32 {
        self.max_repetitions
    }

    /// Variable bindings.
    pub fn varbinds(&self) -> &[VarBind] {
        &self.varbinds
    }

    /// Always [`PduType::GetBulkRequest`].
    pub fn pdu_type(&self) -> PduType {
        PduType::GetBulkRequest
    }

    /// Decode the fields of a GETBULK PDU whose tag and length have been read.
    pub fn decode_body(decoder: &mut Decoder, length: usize) -> Result<Self> {
        decode_checked(decoder, length, |body| {
            let request_id = body.read_integer()?;
            let non_repeaters = body.read_integer()?;
            let max_repetitions = body.read_integer()?;
            let varbinds = decode_varbind_list(body)?;
            Ok(Self::with_varbinds(
                request_id,
                non_repeaters,
                max_repetitions,
                varbinds,
            ))
        })
    }

    /// The full TLV encoding, computed once per instance.
    pub fn to_bytes(&self) -> Bytes {
        self.encoded
            .get_or_init(|| {
                encode_pdu(tag::pdu::GET_BULK_REQUEST, |buf| {
                    encode_varbind_list(buf, &self.varbinds);
                    buf.push_integer(self.max_repetitions);
                    buf.push_integer(self.non_repeaters);
                    buf.push_integer(self.request_id);
                })
            })
            .clone()
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_bytes(&self.to_bytes());
    }

    /// Wrap in a message envelope value (see [`crate::message::pack`]).
    pub fn to_message_body(&self, version: Version, community: impl Into<Bytes>) -> Value {
        crate::message::pack(version, community, SnmpPdu::GetBulk(self.clone()))
    }
}

impl PartialEq for GetBulkPdu {
    fn eq(&self, other: &Self) -> bool {
        self.request_id == other.request_id
            && self.non_repeaters == other.non_repeaters
            && self.max_repetitions == other.max_repetitions
            && self.varbinds == other.varbinds
    }
}

impl std::fmt::Debug for GetBulkPdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetBulkPdu")
            .field("request_id", &self.request_id)
            .field("non_repeaters", &self.non_repeaters)
            .field("max_repetitions", &self.max_repetitions)
            .field("varbinds", &self.varbinds)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for GetBulkPdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GetBulkRequest request-id={} non-repeaters={} max-repetitions={} varbinds=",
            self.request_id, self.non_repeaters, self.max_repetitions
        )?;
        fmt_varbinds(f, &self.varbinds)
    }
}
