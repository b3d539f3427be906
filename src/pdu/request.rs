//! Request/response PDU shape (RFC 3416 `PDU`).

use std::sync::OnceLock;

use super::{PduType, SnmpPdu, decode_checked, encode_pdu, fmt_varbinds};
use crate::ber::{Decoder, EncodeBuf};
use crate::error::{DecodeErrorKind, ErrorStatus, Result};
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::{VarBind, decode_varbind_list, encode_varbind_list};
use crate::version::Version;
use bytes::Bytes;

/// PDU with the request-id, error-status, error-index, varbinds layout.
///
/// Shared by GetRequest, GetNextRequest, Response, SetRequest,
/// InformRequest, SNMPv2-Trap and Report. Fields are fixed at construction;
/// the encoding is computed once on first use.
#[derive(Clone)]
pub struct Pdu {
    pdu_type: PduType,
    request_id: i32,
    error_status: i32,
    error_index: i32,
    varbinds: Vec<VarBind>,
    encoded: OnceLock<Bytes>,
}

impl Pdu {
    fn new(
        pdu_type: PduType,
        request_id: i32,
        error_status: i32,
        error_index: i32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            pdu_type,
            request_id,
            error_status,
            error_index,
            varbinds,
            encoded: OnceLock::new(),
        }
    }

    /// Create a GET request PDU.
    pub fn get_request(request_id: i32, oids: &[Oid]) -> Self {
        Self::new(PduType::GetRequest, request_id, 0, 0, null_bindings(oids))
    }

    /// Create a GETNEXT request PDU.
    pub fn get_next_request(request_id: i32, oids: &[Oid]) -> Self {
        Self::new(PduType::GetNextRequest, request_id, 0, 0, null_bindings(oids))
    }

    /// Create a SET request PDU.
    pub fn set_request(request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self::new(PduType::SetRequest, request_id, 0, 0, varbinds)
    }

    /// Create a Response PDU.
    pub fn response(
        request_id: i32,
        error_status: ErrorStatus,
        error_index: i32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self::new(
            PduType::Response,
            request_id,
            error_status.as_i32(),
            error_index,
            varbinds,
        )
    }

    /// Create an InformRequest PDU.
    pub fn inform_request(request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self::new(PduType::InformRequest, request_id, 0, 0, varbinds)
    }

    /// Create an SNMPv2-Trap PDU.
    ///
    /// By convention the first two bindings are sysUpTime.0 and snmpTrapOID.0.
    pub fn trap_v2(request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self::new(PduType::TrapV2, request_id, 0, 0, varbinds)
    }

    /// Create a Report PDU.
    pub fn report(request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self::new(PduType::Report, request_id, 0, 0, varbinds)
    }

    /// PDU type.
    pub fn pdu_type(&self) -> PduType {
        self.pdu_type
    }

    /// Request ID for correlating requests and responses.
    pub fn request_id(&self) -> i32 {
        self.request_id
    }

    /// Raw error status (0 for requests).
    pub fn error_status(&self) -> i32 {
        self.error_status
    }

    /// Error index (1-based index of the offending varbind, 0 if none).
    pub fn error_index(&self) -> i32 {
        self.error_index
    }

    /// Variable bindings.
    pub fn varbinds(&self) -> &[VarBind] {
        &self.varbinds
    }

    /// Consume and return the variable bindings.
    pub fn into_varbinds(self) -> Vec<VarBind> {
        self.varbinds
    }

    /// Check if this is an error response.
    pub fn is_error(&self) -> bool {
        self.error_status != 0
    }

    /// Get the error status as an enum.
    pub fn error_status_enum(&self) -> ErrorStatus {
        ErrorStatus::from_i32(self.error_status)
    }

    /// Create a Response PDU from this PDU (for Inform handling).
    ///
    /// Copies the request-id and bindings with a zero error status.
    pub fn to_response(&self) -> Self {
        Self::response(self.request_id, ErrorStatus::NoError, 0, self.varbinds.clone())
    }

    /// Create a Response PDU with a specific error status.
    pub fn to_error_response(&self, error_status: ErrorStatus, error_index: i32) -> Self {
        Self::response(
            self.request_id,
            error_status,
            error_index,
            self.varbinds.clone(),
        )
    }

    /// Check if this is a notification PDU (SNMPv2-Trap or Inform).
    pub fn is_notification(&self) -> bool {
        matches!(self.pdu_type, PduType::TrapV2 | PduType::InformRequest)
    }

    /// Check if this is a confirmed-class PDU (requires response).
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self.pdu_type,
            PduType::GetRequest
                | PduType::GetNextRequest
                | PduType::SetRequest
                | PduType::InformRequest
        )
    }

    /// Decode the fields of a PDU whose tag and length have been read.
    ///
    /// `pdu_type` must be one of the request-layout tags.
    pub fn decode_body(pdu_type: PduType, decoder: &mut Decoder, length: usize) -> Result<Self> {
        if !pdu_type.has_request_layout() {
            return Err(decoder.error(DecodeErrorKind::UnknownPduType(pdu_type.tag())));
        }
        decode_checked(decoder, length, |body| {
            let request_id = body.read_integer()?;
            let error_status = body.read_integer()?;
            let error_index = body.read_integer()?;
            let varbinds = decode_varbind_list(body)?;
            Ok(Self::new(
                pdu_type,
                request_id,
                error_status,
                error_index,
                varbinds,
            ))
        })
    }

    /// The full TLV encoding, computed once per instance.
    pub fn to_bytes(&self) -> Bytes {
        self.encoded
            .get_or_init(|| {
                encode_pdu(self.pdu_type.tag(), |buf| {
                    encode_varbind_list(buf, &self.varbinds);
                    buf.push_integer(self.error_index);
                    buf.push_integer(self.error_status);
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
        crate::message::pack(version, community, SnmpPdu::Pdu(self.clone()))
    }
}

fn null_bindings(oids: &[Oid]) -> Vec<VarBind> {
    oids.iter().cloned().map(VarBind::null).collect()
}

impl PartialEq for Pdu {
    fn eq(&self, other: &Self) -> bool {
        self.pdu_type == other.pdu_type
            && self.request_id == other.request_id
            && self.error_status == other.error_status
            && self.error_index == other.error_index
            && self.varbinds == other.varbinds
    }
}

impl std::fmt::Debug for Pdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pdu")
            .field("pdu_type", &self.pdu_type)
            .field("request_id", &self.request_id)
            .field("error_status", &self.error_status)
            .field("error_index", &self.error_index)
            .field("varbinds", &self.varbinds)
            .finish_non_exhaustive()
    }
}

/// `<type> request-id=<id> error-status=<status> error-index=<index> varbinds=[...]`
impl std::fmt::Display for Pdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} request-id={} error-status={} error-index={} varbinds=",
            self.pdu_type,
            self.request_id,
            self.error_status_enum(),
            self.error_index
        )?;
        fmt_varbinds(f, &self.varbinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn decode(bytes: Bytes) -> Pdu {
        match SnmpPdu::from_bytes(bytes).unwrap() {
            SnmpPdu::Pdu(pdu) => pdu,
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_get_request_wire_format() {
        let pdu = Pdu::get_request(1, &[oid!(1, 3, 6, 1)]);
        assert_eq!(
            &pdu.to_bytes()[..],
            &[
                0xA0, 0x14, // GetRequest
                0x02, 0x01, 0x01, // request-id
                0x02, 0x01, 0x00, // error-status
                0x02, 0x01, 0x00, // error-index
                0x30, 0x09, 0x30, 0x07, 0x06, 0x03, 0x2B, 0x06, 0x01, 0x05, 0x00,
            ]
        );
    }

    #[test]
    fn test_roundtrip_every_request_layout_tag() {
        let varbinds = vec![VarBind::new(
            oid!(1, 3, 6, 1, 2, 1, 1, 5, 0),
            Value::from("router1"),
        )];
        for pdu in [
            Pdu::get_request(12345, &[oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)]),
            Pdu::get_next_request(-7, &[oid!(1, 3, 6, 1)]),
            Pdu::set_request(i32::MAX, varbinds.clone()),
            Pdu::response(3, ErrorStatus::NoSuchName, 1, varbinds.clone()),
            Pdu::inform_request(4, varbinds.clone()),
            Pdu::trap_v2(5, varbinds.clone()),
            Pdu::report(6, vec![]),
        ] {
            let decoded = decode(pdu.to_bytes());
            assert_eq!(decoded, pdu);
            assert_eq!(decoded.pdu_type(), pdu.pdu_type());
        }
    }

    #[test]
    fn test_to_bytes_is_memoized() {
        let pdu = Pdu::get_request(9, &[oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)]);
        let first = pdu.to_bytes();
        let second = pdu.to_bytes();
        assert_eq!(first, second);
        // Same backing allocation, not a re-encode
        assert_eq!(first.as_ptr(), second.as_ptr());

        let mut buf = EncodeBuf::new();
        pdu.encode(&mut buf);
        assert_eq!(buf.finish(), first);
    }

    #[test]
    fn test_equality_ignores_cache() {
        let a = Pdu::get_request(1, &[oid!(1, 3)]);
        let b = Pdu::get_request(1, &[oid!(1, 3)]);
        let _ = a.to_bytes();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_response() {
        let inform = Pdu::inform_request(
            99999,
            vec![
                VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(12345)),
                VarBind::new(
                    oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0),
                    Value::ObjectIdentifier(oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 1)),
                ),
            ],
        );

        let response = inform.to_response();
        assert_eq!(response.pdu_type(), PduType::Response);
        assert_eq!(response.request_id(), 99999);
        assert!(!response.is_error());
        assert_eq!(response.varbinds(), inform.varbinds());

        let failed = inform.to_error_response(ErrorStatus::GenErr, 2);
        assert!(failed.is_error());
        assert_eq!(failed.error_status_enum(), ErrorStatus::GenErr);
        assert_eq!(failed.error_index(), 2);
    }

    #[test]
    fn test_classification() {
        assert!(Pdu::get_request(1, &[]).is_confirmed());
        assert!(Pdu::inform_request(1, vec![]).is_confirmed());
        assert!(Pdu::inform_request(1, vec![]).is_notification());

        let trap = Pdu::trap_v2(1, vec![]);
        assert!(!trap.is_confirmed());
        assert!(trap.is_notification());
        assert!(!Pdu::response(1, ErrorStatus::NoError, 0, vec![]).is_confirmed());
    }

    #[test]
    fn test_unknown_error_status_preserved() {
        // Response with error-status 42
        let data = [
            0xA2, 0x0B, 0x02, 0x01, 0x01, 0x02, 0x01, 0x2A, 0x02, 0x01, 0x00, 0x30, 0x00,
        ];
        let pdu = decode(Bytes::copy_from_slice(&data));
        assert_eq!(pdu.error_status(), 42);
        assert_eq!(pdu.error_status_enum(), ErrorStatus::Unknown(42));
        assert_eq!(&pdu.to_bytes()[..], &data);
    }

    #[test]
    fn test_decode_body_rejects_other_layouts() {
        let mut decoder = Decoder::from_slice(&[0x02, 0x01, 0x01]);
        let err = Pdu::decode_body(PduType::TrapV1, &mut decoder, 3).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::UnknownPduType(0xA4)));
    }

    #[test]
    fn test_display() {
        let pdu = Pdu::get_request(1, &[oid!(1, 3, 6, 1)]);
        assert_eq!(
            pdu.to_string(),
            "GetRequest request-id=1 error-status=noError error-index=0 varbinds=[1.3.6.1 = NULL]"
        );
    }
}
