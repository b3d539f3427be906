//! BER length encoding and decoding.
//!
//! Length encoding follows X.690 Section 8.1.3:
//! - Short form: Single byte, bit 8=0, value 0-127
//! - Long form: Initial byte (bit 8=1, bits 7-1=count), followed by length bytes
//! - Indefinite form (0x80): Rejected, SNMP only uses definite lengths

use smallvec::SmallVec;

use crate::error::{DecodeErrorKind, Error, Result};

/// Maximum length we'll accept (to prevent DoS).
///
/// 2MB is far larger than any realistic SNMP message (typical messages are
/// hundreds of bytes to a few KB).
pub const MAX_LENGTH: usize = 0x200000; // 2MB

/// Maximum number of length octets accepted in the long form.
const MAX_LENGTH_OCTETS: usize = 4;

/// Number of big-endian octets needed to hold `len` (at least 1).
#[inline]
fn significant_octets(len: usize) -> usize {
    let bits = usize::BITS - len.leading_zeros();
    (bits.div_ceil(8) as usize).max(1)
}

/// Encode a length in wire order.
///
/// Uses the short form below 128 and the minimal long form otherwise.
///
/// ```
/// use snmp_codec::ber::encode_length;
///
/// assert_eq!(encode_length(0).as_slice(), &[0x00]);
/// assert_eq!(encode_length(127).as_slice(), &[0x7F]);
/// assert_eq!(encode_length(128).as_slice(), &[0x81, 0x80]);
/// assert_eq!(encode_length(256).as_slice(), &[0x82, 0x01, 0x00]);
/// ```
pub fn encode_length(len: usize) -> SmallVec<[u8; 9]> {
    let mut out = SmallVec::new();
    if len <= 127 {
        out.push(len as u8);
        return out;
    }

    let count = significant_octets(len);
    out.push(0x80 | count as u8);
    for i in (0..count).rev() {
        out.push((len >> (i * 8)) as u8);
    }
    out
}

/// Encode a length for a reverse buffer: returns the octets last-to-first.
pub(crate) fn encode_length_reversed(len: usize) -> SmallVec<[u8; 9]> {
    let mut out = encode_length(len);
    out.reverse();
    out
}

/// Number of octets [`encode_length`] produces for `len`.
pub fn length_encoded_len(len: usize) -> usize {
    if len <= 127 {
        1
    } else {
        1 + significant_octets(len)
    }
}

/// Decode a length from bytes, returning (length, bytes_consumed)
///
/// The `base_offset` parameter is used to report error offsets correctly
/// when this is called from within a decoder. The returned length is only
/// checked against [`MAX_LENGTH`]; callers bound it against the bytes they
/// actually hold before reading content.
pub fn decode_length(data: &[u8], base_offset: usize) -> Result<(usize, usize)> {
    let Some(&first) = data.first() else {
        return Err(Error::decode(base_offset, DecodeErrorKind::TruncatedData));
    };

    if first == 0x80 {
        // Indefinite form, also a long form with zero length octets
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::IndefiniteLength,
        ));
    }

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let num_octets = (first & 0x7F) as usize;

    if num_octets == 0x7F {
        // Reserved by X.690 8.1.3.5
        return Err(Error::decode(base_offset, DecodeErrorKind::InvalidLength));
    }

    if num_octets > MAX_LENGTH_OCTETS {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::LengthTooLong { octets: num_octets },
        ));
    }

    if data.len() < 1 + num_octets {
        return Err(Error::decode(base_offset, DecodeErrorKind::TruncatedData));
    }

    let len = data[1..=num_octets]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);

    if len > MAX_LENGTH {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::LengthExceedsMax {
                length: len,
                max: MAX_LENGTH,
            },
        ));
    }

    Ok((len, 1 + num_octets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        assert_eq!(decode_length(&[0], 0).unwrap(), (0, 1));
        assert_eq!(decode_length(&[127], 0).unwrap(), (127, 1));
        assert_eq!(decode_length(&[1], 0).unwrap(), (1, 1));
    }

    #[test]
    fn test_long_form_1_byte() {
        assert_eq!(decode_length(&[0x81, 128], 0).unwrap(), (128, 2));
        assert_eq!(decode_length(&[0x81, 255], 0).unwrap(), (255, 2));
    }

    #[test]
    fn test_long_form_2_bytes() {
        assert_eq!(decode_length(&[0x82, 0x01, 0x00], 0).unwrap(), (256, 3));
        assert_eq!(decode_length(&[0x82, 0xFF, 0xFF], 0).unwrap(), (65535, 3));
    }

    #[test]
    fn test_zero_length_octets_rejected() {
        let err = decode_length(&[0x80], 5).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                offset: 5,
                kind: DecodeErrorKind::IndefiniteLength
            }
        ));
    }

    #[test]
    fn test_missing_length_octets_rejected() {
        let err = decode_length(&[0x82, 0x01], 0).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::TruncatedData));

        let err = decode_length(&[], 3).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                offset: 3,
                kind: DecodeErrorKind::TruncatedData
            }
        ));
    }

    #[test]
    fn test_too_many_length_octets_rejected() {
        let err = decode_length(&[0x85, 0, 0, 0, 0, 1], 0).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::LengthTooLong { octets: 5 })
        );
    }

    #[test]
    fn test_encode_minimality() {
        assert_eq!(encode_length(0).as_slice(), &[0]);
        assert_eq!(encode_length(127).as_slice(), &[127]);
        assert_eq!(encode_length(128).as_slice(), &[0x81, 0x80]);
        assert_eq!(encode_length(255).as_slice(), &[0x81, 0xFF]);
        assert_eq!(encode_length(256).as_slice(), &[0x82, 0x01, 0x00]);
        assert_eq!(encode_length(0x10000).as_slice(), &[0x83, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_reversed() {
        assert_eq!(encode_length_reversed(128).as_slice(), &[0x80, 0x81]);
        assert_eq!(encode_length_reversed(5).as_slice(), &[5]);
    }

    #[test]
    fn test_encode_decode_law() {
        for len in [0, 1, 127, 128, 200, 255, 256, 1000, 65535, 65536, MAX_LENGTH] {
            let encoded = encode_length(len);
            assert_eq!(encoded.len(), length_encoded_len(len));
            assert_eq!(
                decode_length(&encoded, 0).unwrap(),
                (len, encoded.len()),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_accept_oversized_length_encoding() {
        // Non-minimal length encodings are valid per X.690 Section 8.1.3.5 Note 2
        assert_eq!(decode_length(&[0x82, 0x00, 0x05], 0).unwrap(), (5, 3));
        assert_eq!(decode_length(&[0x81, 0x01], 0).unwrap(), (1, 2));
        assert_eq!(decode_length(&[0x83, 0x00, 0x00, 0x80], 0).unwrap(), (128, 4));
    }

    #[test]
    fn test_max_length_enforced() {
        let max = MAX_LENGTH;
        let max_bytes = [
            0x83,
            ((max >> 16) & 0xFF) as u8,
            ((max >> 8) & 0xFF) as u8,
            (max & 0xFF) as u8,
        ];
        assert_eq!(decode_length(&max_bytes, 0).unwrap(), (MAX_LENGTH, 4));

        let over = MAX_LENGTH + 1;
        let over_bytes = [
            0x84,
            ((over >> 24) & 0xFF) as u8,
            ((over >> 16) & 0xFF) as u8,
            ((over >> 8) & 0xFF) as u8,
            (over & 0xFF) as u8,
        ];
        let err = decode_length(&over_bytes, 0).unwrap_err();
        assert!(
            matches!(
                err.decode_kind(),
                Some(DecodeErrorKind::LengthExceedsMax { .. })
            ),
            "Expected LengthExceedsMax, got {:?}",
            err
        );
    }
}
