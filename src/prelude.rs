//! Prelude module for convenient imports.
//!
//! ```rust
//! use snmp_codec::prelude::*;
//!
//! let pdu = Pdu::get_request(1, &[oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)]);
//! let msg = CommunityMessage::v2c("public", pdu);
//! assert_eq!(msg.version, Version::V2c);
//! ```
//!
//! This imports:
//! - Core types: [`Oid`], [`Value`], [`VarBind`]
//! - PDUs: [`SnmpPdu`], [`Pdu`], [`GetBulkPdu`], [`TrapV1Pdu`], [`GenericTrap`]
//! - Envelope: [`CommunityMessage`], [`Version`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for compile-time OID construction

pub use crate::error::{Error, Result};
pub use crate::message::CommunityMessage;
pub use crate::oid::Oid;
pub use crate::pdu::{GenericTrap, GetBulkPdu, Pdu, SnmpPdu, TrapV1Pdu};
pub use crate::value::Value;
pub use crate::varbind::VarBind;
pub use crate::version::Version;

#[doc(no_inline)]
pub use crate::oid;
