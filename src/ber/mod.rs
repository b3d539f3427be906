//! BER (Basic Encoding Rules) transfer syntax for SNMP.
//!
//! Definite-length TLV encoding and decoding per X.690, restricted to the
//! single-byte tags SNMPv1/v2c use. Decoding is strict about lengths: a value
//! must consume exactly the bytes its header declares.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::*;
pub use encode::*;
pub use length::*;
pub use tag::*;
