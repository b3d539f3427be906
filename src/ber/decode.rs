//! BER decoding.
//!
//! Zero-copy decoding using `Bytes` to avoid allocations. Every read is bounds
//! checked against the bytes the decoder holds; a declared length is never
//! trusted before it has been compared with what is actually left.

use super::length::decode_length;
use super::tag;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use bytes::Bytes;

/// Maximum depth of nested constructed values (SEQUENCE inside SEQUENCE ...).
///
/// An SNMP message needs four levels (message, PDU, varbind list, varbind);
/// the headroom covers generic value trees without letting hostile input
/// recurse without bound.
pub const MAX_NESTING_DEPTH: usize = 32;

/// BER decoder that reads from a byte buffer.
pub struct Decoder {
    data: Bytes,
    offset: usize,
    /// Absolute position of `data[0]` in the original input.
    base: usize,
    depth: usize,
}

impl Decoder {
    /// Create a new decoder from bytes.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            offset: 0,
            base: 0,
            depth: 0,
        }
    }

    /// Create a decoder from a byte slice (copies the data).
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Get the current offset within this decoder's buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the current position in the original input.
    ///
    /// Differs from [`offset`](Self::offset) for sub-decoders, which start
    /// counting at zero.
    pub fn position(&self) -> usize {
        self.base + self.offset
    }

    /// Nesting depth of this decoder (0 for the outermost).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check if we've reached the end.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Peek at the next tag without consuming it.
    pub fn peek_tag(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Build a decode error at the current position and log it.
    pub(crate) fn error(&self, kind: DecodeErrorKind) -> Error {
        self.error_at(self.offset, kind)
    }

    /// Build a decode error at a local offset and log it.
    pub(crate) fn error_at(&self, offset: usize, kind: DecodeErrorKind) -> Error {
        let position = self.base + offset;
        tracing::debug!(
            target: "snmp_codec::ber",
            { snmp.offset = position, kind = %kind },
            "rejecting malformed input"
        );
        Error::decode(position, kind)
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let Some(&byte) = self.data.get(self.offset) else {
            return Err(self.error(DecodeErrorKind::TruncatedData));
        };
        self.offset += 1;
        Ok(byte)
    }

    /// Read a tag byte.
    pub fn read_tag(&mut self) -> Result<u8> {
        self.read_byte()
    }

    /// Read a length, checking that the content fits in the remaining input.
    pub fn read_length(&mut self) -> Result<usize> {
        let start = self.offset;
        let (len, consumed) = decode_length(&self.data[self.offset..], self.position())
            .inspect_err(|e| {
                tracing::debug!(target: "snmp_codec::ber", error = %e, "bad length octets")
            })?;
        self.offset += consumed;

        if len > self.remaining() {
            let available = self.remaining();
            self.offset = start;
            return Err(self.error(DecodeErrorKind::LengthExceedsInput {
                length: len,
                available,
            }));
        }
        Ok(len)
    }

    /// Read raw bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        // Use saturating_add to prevent overflow from bypassing bounds check
        if self.offset.saturating_add(len) > self.data.len() {
            return Err(self.error(DecodeErrorKind::InsufficientData {
                needed: len,
                available: self.remaining(),
            }));
        }
        let bytes = self.data.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(bytes)
    }

    /// Read and expect a specific tag, returning the content length.
    pub fn expect_tag(&mut self, expected: u8) -> Result<usize> {
        let tag = self.read_tag()?;
        if tag != expected {
            return Err(self.error_at(
                self.offset - 1,
                DecodeErrorKind::UnexpectedTag {
                    expected,
                    actual: tag,
                },
            ));
        }
        self.read_length()
    }

    /// Read a BER integer (signed).
    pub fn read_integer(&mut self) -> Result<i32> {
        let len = self.expect_tag(tag::universal::INTEGER)?;
        self.read_integer_value(len)
    }

    /// Read integer value given the length.
    ///
    /// Redundant sign-extension octets are tolerated; anything that does not
    /// fit an `i32` is an overflow, never silently truncated.
    pub fn read_integer_value(&mut self, len: usize) -> Result<i32> {
        if len == 0 {
            return Err(self.error(DecodeErrorKind::ZeroLengthInteger));
        }
        let start = self.offset;
        let bytes = self.read_bytes(len)?;
        let significant = strip_sign_extension(&bytes);

        if significant.len() > 4 {
            return Err(self.error_at(start, DecodeErrorKind::IntegerOverflow));
        }

        let is_negative = significant[0] & 0x80 != 0;
        let mut value: i32 = if is_negative { -1 } else { 0 };
        for &byte in significant {
            value = (value << 8) | (byte as i32);
        }

        Ok(value)
    }

    /// Read a 64-bit unsigned integer (Counter64).
    pub fn read_integer64(&mut self, expected_tag: u8) -> Result<u64> {
        let len = self.expect_tag(expected_tag)?;
        self.read_integer64_value(len)
    }

    /// Read 64-bit unsigned integer value given the length.
    pub fn read_integer64_value(&mut self, len: usize) -> Result<u64> {
        if len == 0 {
            return Err(self.error(DecodeErrorKind::ZeroLengthInteger));
        }
        let start = self.offset;
        let bytes = self.read_bytes(len)?;
        let significant = strip_leading_zeros(&bytes);
        if significant.len() > 8 {
            return Err(self.error_at(
                start,
                DecodeErrorKind::Integer64TooLong { length: len },
            ));
        }

        Ok(significant
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | byte as u64))
    }

    /// Read an unsigned 32-bit integer with specific tag.
    pub fn read_unsigned32(&mut self, expected_tag: u8) -> Result<u32> {
        let len = self.expect_tag(expected_tag)?;
        self.read_unsigned32_value(len)
    }

    /// Read unsigned 32-bit integer value given length.
    pub fn read_unsigned32_value(&mut self, len: usize) -> Result<u32> {
        if len == 0 {
            return Err(self.error(DecodeErrorKind::ZeroLengthInteger));
        }
        let start = self.offset;
        let bytes = self.read_bytes(len)?;
        let significant = strip_leading_zeros(&bytes);
        if significant.len() > 4 {
            return Err(self.error_at(start, DecodeErrorKind::IntegerOverflow));
        }

        Ok(significant
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | byte as u32))
    }

    /// Read an OCTET STRING.
    pub fn read_octet_string(&mut self) -> Result<Bytes> {
        let len = self.expect_tag(tag::universal::OCTET_STRING)?;
        self.read_bytes(len)
    }

    /// Read a NULL.
    pub fn read_null(&mut self) -> Result<()> {
        let len = self.expect_tag(tag::universal::NULL)?;
        if len != 0 {
            return Err(self.error(DecodeErrorKind::InvalidNull));
        }
        Ok(())
    }

    /// Read an OBJECT IDENTIFIER.
    pub fn read_oid(&mut self) -> Result<Oid> {
        let len = self.expect_tag(tag::universal::OBJECT_IDENTIFIER)?;
        self.read_oid_value(len)
    }

    /// Read an OID given a pre-read length.
    pub fn read_oid_value(&mut self, len: usize) -> Result<Oid> {
        let start = self.position();
        let bytes = self.read_bytes(len)?;
        Oid::from_ber(&bytes).map_err(|e| match e {
            // Re-anchor offsets reported relative to the OID content
            Error::Decode { offset, kind } => {
                tracing::debug!(
                    target: "snmp_codec::ber",
                    { snmp.offset = start + offset, kind = %kind },
                    "invalid OID content"
                );
                Error::decode(start + offset, kind)
            }
            other => other,
        })
    }

    /// Read an IP address.
    pub fn read_ip_address(&mut self) -> Result<[u8; 4]> {
        let len = self.expect_tag(tag::application::IP_ADDRESS)?;
        self.read_ip_address_value(len)
    }

    /// Read IP address content given a pre-read length.
    pub fn read_ip_address_value(&mut self, len: usize) -> Result<[u8; 4]> {
        if len != 4 {
            return Err(self.error(DecodeErrorKind::InvalidIpAddressLength { length: len }));
        }
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Read a SEQUENCE, returning a decoder for its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder> {
        self.read_constructed(tag::universal::SEQUENCE)
    }

    /// Read a constructed type with a specific tag, returning a decoder for its contents.
    pub fn read_constructed(&mut self, expected_tag: u8) -> Result<Decoder> {
        let len = self.expect_tag(expected_tag)?;
        self.sub_decoder(len)
    }

    /// Skip a TLV (tag-length-value) without parsing.
    pub fn skip_tlv(&mut self) -> Result<()> {
        let _tag = self.read_tag()?;
        let len = self.read_length()?;
        self.read_bytes(len)?;
        Ok(())
    }

    /// Create a sub-decoder for the next `len` bytes, one nesting level deeper.
    pub fn sub_decoder(&mut self, len: usize) -> Result<Decoder> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(DecodeErrorKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
            }));
        }
        let base = self.position();
        let content = self.read_bytes(len)?;
        Ok(Decoder {
            data: content,
            offset: 0,
            base,
            depth: self.depth + 1,
        })
    }

    /// Create a decoder over everything that remains, one nesting level deeper,
    /// without consuming it.
    ///
    /// Used where a body must be read field by field before its declared
    /// length can be checked against what the fields actually needed. The
    /// caller advances past the body with [`skip`](Self::skip) once satisfied.
    pub fn lookahead(&self) -> Result<Decoder> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(DecodeErrorKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
            }));
        }
        Ok(Decoder {
            data: self.data.slice(self.offset..),
            offset: 0,
            base: self.position(),
            depth: self.depth + 1,
        })
    }

    /// Advance past `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Fail if any bytes remain.
    pub fn expect_end(&self) -> Result<()> {
        if !self.is_empty() {
            return Err(self.error(DecodeErrorKind::TrailingData {
                remaining: self.remaining(),
            }));
        }
        Ok(())
    }
}

/// Drop two's-complement sign-extension octets, keeping at least one.
pub(super) fn strip_sign_extension(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < bytes.len() {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    &bytes[start..]
}

/// Drop leading zero octets of an unsigned value, keeping at least one.
fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < bytes.len() && bytes[start] == 0 {
        start += 1;
    }
    &bytes[start..]
}
