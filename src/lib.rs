//! BER codec, typed values and PDUs for SNMPv1/v2c.
//!
//! The crate covers the wire layer only: turning management messages into
//! bytes and back. Transport, retries and SNMPv3 security live elsewhere.
//!
//! # Layers
//!
//! - [`ber`]: definite-length TLV encoding ([`ber::EncodeBuf`]) and a
//!   zero-copy, bounds-checked [`ber::Decoder`].
//! - [`Value`]: every SMI scalar, SEQUENCE, and embedded PDUs.
//! - [`VarBind`]: OID/value pairs and their SEQUENCE-of-SEQUENCE form.
//! - [`pdu`]: request/response, GETBULK and SNMPv1 trap shapes behind
//!   [`SnmpPdu`].
//! - [`message`]: the `version, community, pdu` envelope.
//!
//! # Example
//!
//! ```
//! use snmp_codec::{CommunityMessage, GenericTrap, TrapV1Pdu, Value, VarBind, oid};
//!
//! let trap = TrapV1Pdu::new(
//!     oid!(1, 3, 6, 1, 4, 1, 1234),
//!     [192, 0, 2, 1],
//!     GenericTrap::LinkDown,
//!     7,
//!     500,
//!     vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::Integer(42))],
//! );
//!
//! let bytes = CommunityMessage::v1("public", trap.clone()).encode();
//! let decoded = CommunityMessage::decode(bytes).unwrap();
//! assert_eq!(decoded.pdu.as_trap_v1(), Some(&trap));
//! ```
//!
//! # Errors
//!
//! Decoding never panics on hostile input. Failures carry the absolute
//! byte offset where they were detected and a [`DecodeErrorKind`] whose
//! [`category`](DecodeErrorKind::category) groups it into malformed length,
//! unknown tag, structural mismatch, or truncated scalar.
//!
//! # Logging
//!
//! Rejected input is reported through [`tracing`] at `debug` level under the
//! `snmp_codec::ber` target; PDU dispatch is traced under `snmp_codec::pdu`.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod ber;
pub mod error;
pub mod message;
pub mod names;
pub mod oid;
pub mod pdu;
pub mod prelude;
pub mod value;
pub mod varbind;
pub mod version;

pub use error::{DecodeErrorCategory, DecodeErrorKind, Error, ErrorStatus, Result};
pub use message::CommunityMessage;
pub use names::OidNames;
pub use oid::Oid;
pub use pdu::{GenericTrap, GetBulkPdu, Pdu, PduType, SnmpPdu, TrapV1Pdu};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;
