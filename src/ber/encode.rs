//! BER encoding.
//!
//! [`EncodeBuf`] fills from the back: a value's content goes in first and its
//! length and tag are prepended afterwards, so no length is ever computed
//! ahead of time. The cost is that children of a constructed value are
//! pushed last-to-first.

use super::decode::strip_sign_extension;
use super::length::encode_length_reversed;
use super::tag;
use crate::oid::Oid;
use bytes::Bytes;

/// Back-to-front BER output buffer.
///
/// ```
/// use snmp_codec::ber::EncodeBuf;
///
/// let mut buf = EncodeBuf::new();
/// buf.push_sequence(|buf| {
///     buf.push_octet_string(b"public");
///     buf.push_integer(1);
/// });
/// assert_eq!(&buf.finish()[..5], &[0x30, 0x0B, 0x02, 0x01, 0x01]);
/// ```
pub struct EncodeBuf {
    /// Encoded octets in reverse wire order.
    rev: Vec<u8>,
}

impl EncodeBuf {
    /// Buffer sized for a typical message.
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Buffer with room for `capacity` octets before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rev: Vec::with_capacity(capacity),
        }
    }

    /// Number of octets written so far.
    pub fn len(&self) -> usize {
        self.rev.len()
    }

    /// True until something has been pushed.
    pub fn is_empty(&self) -> bool {
        self.rev.is_empty()
    }

    /// Prepend octets that are already in wire order, such as a cached PDU.
    pub fn push_bytes(&mut self, wire: &[u8]) {
        self.rev.extend(wire.iter().rev());
    }

    /// Prepend a definite-form length.
    pub fn push_length(&mut self, len: usize) {
        self.rev.extend_from_slice(&encode_length_reversed(len));
    }

    /// Prepend a single tag octet.
    pub fn push_tag(&mut self, tag: u8) {
        self.rev.push(tag);
    }

    /// Prepend a primitive value: tag, length, then `content`.
    pub fn push_tlv(&mut self, tag: u8, content: &[u8]) {
        self.push_bytes(content);
        self.push_length(content.len());
        self.push_tag(tag);
    }

    /// Prepend a zero-length value: NULL or one of the exception markers.
    pub fn push_empty(&mut self, tag: u8) {
        self.push_length(0);
        self.push_tag(tag);
    }

    /// Prepend a constructed value whose children `children` pushes.
    ///
    /// The length is whatever `children` wrote, so the closure must push in
    /// reverse order.
    pub fn push_constructed(&mut self, tag: u8, children: impl FnOnce(&mut Self)) {
        let before = self.rev.len();
        children(self);
        self.push_length(self.rev.len() - before);
        self.push_tag(tag);
    }

    /// [`push_constructed`](Self::push_constructed) with the SEQUENCE tag.
    pub fn push_sequence(&mut self, children: impl FnOnce(&mut Self)) {
        self.push_constructed(tag::universal::SEQUENCE, children);
    }

    /// INTEGER in the fewest two's-complement octets.
    pub fn push_integer(&mut self, value: i32) {
        let octets = value.to_be_bytes();
        self.push_tlv(tag::universal::INTEGER, strip_sign_extension(&octets));
    }

    /// Counter32, Gauge32 or TimeTicks under `tag`.
    ///
    /// A 0x00 octet is kept in front of a set high bit so the content never
    /// reads back as negative.
    pub fn push_unsigned32(&mut self, tag: u8, value: u32) {
        let mut octets = [0u8; 5];
        octets[1..].copy_from_slice(&value.to_be_bytes());
        self.push_tlv(tag, strip_sign_extension(&octets));
    }

    /// Counter64, same rules as [`push_unsigned32`](Self::push_unsigned32).
    pub fn push_integer64(&mut self, value: u64) {
        let mut octets = [0u8; 9];
        octets[1..].copy_from_slice(&value.to_be_bytes());
        self.push_tlv(tag::application::COUNTER64, strip_sign_extension(&octets));
    }

    pub fn push_octet_string(&mut self, data: &[u8]) {
        self.push_tlv(tag::universal::OCTET_STRING, data);
    }

    pub fn push_null(&mut self) {
        self.push_empty(tag::universal::NULL);
    }

    pub fn push_oid(&mut self, oid: &Oid) {
        self.push_tlv(tag::universal::OBJECT_IDENTIFIER, &oid.to_ber());
    }

    /// IpAddress, also the v1 trap NetworkAddress.
    pub fn push_ip_address(&mut self, addr: [u8; 4]) {
        self.push_tlv(tag::application::IP_ADDRESS, &addr);
    }

    /// Flip the buffer into wire order.
    pub fn finish(mut self) -> Bytes {
        self.rev.reverse();
        Bytes::from(self.rev)
    }
}

impl Default for EncodeBuf {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(push: impl FnOnce(&mut EncodeBuf)) -> Vec<u8> {
        let mut buf = EncodeBuf::new();
        push(&mut buf);
        buf.finish().to_vec()
    }

    #[test]
    fn test_integer_is_minimal() {
        let cases: &[(i32, &[u8])] = &[
            (0, &[0x00]),
            (127, &[0x7F]),
            (128, &[0x00, 0x80]),
            (256, &[0x01, 0x00]),
            (-1, &[0xFF]),
            (-128, &[0x80]),
            (-129, &[0xFF, 0x7F]),
            (i32::MAX, &[0x7F, 0xFF, 0xFF, 0xFF]),
            (i32::MIN, &[0x80, 0x00, 0x00, 0x00]),
        ];
        for &(value, content) in cases {
            let out = encoded(|buf| buf.push_integer(value));
            assert_eq!(out[0], tag::universal::INTEGER);
            assert_eq!(out[1] as usize, content.len(), "{value}");
            assert_eq!(&out[2..], content, "{value}");
        }
    }

    #[test]
    fn test_unsigned_keeps_sign_guard() {
        let cases: &[(u32, &[u8])] = &[
            (0, &[0x00]),
            (0x7F, &[0x7F]),
            (0x80, &[0x00, 0x80]),
            (500, &[0x01, 0xF4]),
            (u32::MAX, &[0x00, 0xFF, 0xFF, 0xFF, 0xFF]),
        ];
        for &(value, content) in cases {
            let out = encoded(|buf| buf.push_unsigned32(tag::application::GAUGE32, value));
            assert_eq!(&out[2..], content, "{value}");
        }

        let out = encoded(|buf| buf.push_integer64(u64::MAX));
        assert_eq!(&out[..3], &[0x46, 0x09, 0x00]);
        assert!(out[3..].iter().all(|&b| b == 0xFF));
        assert_eq!(encoded(|buf| buf.push_integer64(0)), [0x46, 0x01, 0x00]);
    }

    #[test]
    fn test_children_pushed_in_reverse() {
        let out = encoded(|buf| {
            buf.push_sequence(|buf| {
                buf.push_null();
                buf.push_integer(5);
            })
        });
        // SEQUENCE { INTEGER 5, NULL }
        assert_eq!(out, [0x30, 0x05, 0x02, 0x01, 0x05, 0x05, 0x00]);
        assert_eq!(encoded(|buf| buf.push_sequence(|_| {})), [0x30, 0x00]);
    }

    #[test]
    fn test_long_form_length() {
        let data = [0x5A; 300];
        let out = encoded(|buf| buf.push_octet_string(&data));
        assert_eq!(&out[..4], &[0x04, 0x82, 0x01, 0x2C]);
        assert_eq!(out.len(), 304);
    }

    #[test]
    fn test_exception_markers() {
        let out = encoded(|buf| {
            buf.push_sequence(|buf| {
                buf.push_empty(tag::context::END_OF_MIB_VIEW);
                buf.push_empty(tag::context::NO_SUCH_OBJECT);
            })
        });
        assert_eq!(out, [0x30, 0x04, 0x80, 0x00, 0x82, 0x00]);
    }

    #[test]
    fn test_push_bytes_keeps_wire_order() {
        let out = encoded(|buf| {
            buf.push_sequence(|buf| {
                buf.push_integer(7);
                // an already-encoded PDU embedded verbatim
                buf.push_bytes(&[0xA0, 0x02, 0x05, 0x00]);
            })
        });
        assert_eq!(out, [0x30, 0x07, 0xA0, 0x02, 0x05, 0x00, 0x02, 0x01, 0x07]);
    }

    #[test]
    fn test_ip_address_and_oid() {
        assert_eq!(
            encoded(|buf| buf.push_ip_address([192, 0, 2, 1])),
            [0x40, 0x04, 192, 0, 2, 1]
        );
        assert_eq!(
            encoded(|buf| buf.push_oid(&crate::oid!(1, 3, 6, 1))),
            [0x06, 0x03, 0x2B, 0x06, 0x01]
        );
    }
}
