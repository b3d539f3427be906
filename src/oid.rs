//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.
//!
//! Every [`Oid`] value has a BER encoding that decodes back to the same arcs:
//! it is either empty or has 2..=[`MAX_OID_LEN`] arcs whose first two fit one
//! sub-identifier (X.690 8.19.4). Constructors check this up front, so the
//! encoders never have to.

use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// Per RFC 2578 Section 3.5: "there are at most 128 sub-identifiers in a value".
pub const MAX_OID_LEN: usize = 128;

/// Check the encodability rules for a list of arcs.
const fn check_arcs(arcs: &[u32]) -> std::result::Result<(), OidErrorKind> {
    if arcs.len() > MAX_OID_LEN {
        return Err(OidErrorKind::TooManyArcs {
            count: arcs.len(),
            max: MAX_OID_LEN,
        });
    }
    match *arcs {
        [] => Ok(()),
        [_] => Err(OidErrorKind::SingleArc),
        [first, ..] if first > 2 => Err(OidErrorKind::InvalidFirstArc(first)),
        [first, second, ..] if (first < 2 && second >= 40) || second > u32::MAX - 80 => {
            Err(OidErrorKind::InvalidSecondArc { first, second })
        }
        _ => Ok(()),
    }
}

/// Object Identifier.
///
/// A sequence of arc values. Equality and ordering are lexicographic over the
/// arcs, which is also the SNMP walk order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    fn checked(arcs: SmallVec<[u32; 16]>) -> Result<Self> {
        match check_arcs(&arcs) {
            Ok(()) => Ok(Self { arcs }),
            Err(kind) => Err(Error::invalid_oid(kind)),
        }
    }

    /// Create an OID from arc values.
    ///
    /// Fails for a single arc, a first arc above 2, a second arc that does
    /// not fit beside the first, or more than [`MAX_OID_LEN`] arcs.
    ///
    /// ```
    /// use snmp_codec::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]).unwrap();
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    ///
    /// assert!(Oid::new([1]).is_err());
    /// assert!(Oid::new([1, 40, 5]).is_err());
    /// assert!(Oid::new(0..130).is_err());
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Result<Self> {
        Self::checked(arcs.into_iter().collect())
    }

    /// Create an OID from a slice of arcs, with the checks of [`new`](Self::new).
    pub fn from_slice(arcs: &[u32]) -> Result<Self> {
        Self::checked(SmallVec::from_slice(arcs))
    }

    /// Literal arcs already checked at compile time by [`oid!`](crate::oid!).
    #[doc(hidden)]
    pub fn __from_literal(arcs: &'static [u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Whether `arcs` may form an OID; usable in constant context.
    #[doc(hidden)]
    pub const fn __is_valid_literal(arcs: &[u32]) -> bool {
        check_arcs(arcs).is_ok()
    }

    /// Parse an OID from dotted notation (e.g. `"1.3.6.1.2.1.1.1.0"`).
    ///
    /// A leading dot is accepted (`".1.3.6"`). The result obeys the same
    /// rules as [`new`](Self::new).
    ///
    /// ```
    /// use snmp_codec::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.4.1.1234").unwrap();
    /// assert_eq!(oid.len(), 7);
    /// assert!(Oid::parse("1.3.x").is_err());
    /// assert!(Oid::parse("5.1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();
        for part in trimmed.split('.') {
            let arc: u32 = part.parse().map_err(|_| {
                Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s)
            })?;
            arcs.push(arc);
        }

        check_arcs(&arcs).map_err(|kind| Error::invalid_oid_with_input(kind, s))?;
        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    ///
    /// Every OID starts with itself and with the empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Get the parent OID (all arcs except the last).
    ///
    /// `None` below three arcs: a one-arc OID has no encoding.
    pub fn parent(&self) -> Option<Oid> {
        if self.arcs.len() < 3 {
            return None;
        }
        let (_, rest) = self.arcs.split_last()?;
        Some(Oid {
            arcs: SmallVec::from_slice(rest),
        })
    }

    /// Create a child OID by appending an arc.
    ///
    /// Fails once the result would exceed [`MAX_OID_LEN`] arcs.
    ///
    /// ```
    /// use snmp_codec::oid;
    ///
    /// let sys_up_time = oid!(1, 3, 6, 1, 2, 1, 1, 3);
    /// assert_eq!(sys_up_time.child(0).unwrap().to_string(), "1.3.6.1.2.1.1.3.0");
    /// ```
    pub fn child(&self, arc: u32) -> Result<Oid> {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Self::checked(arcs)
    }

    /// Encode the content octets, returning them in a stack-allocated buffer.
    ///
    /// The first two arcs share one subidentifier `(arc1 * 40) + arc2`; the
    /// rest are base-128 with the high bit marking continuation (X.690 8.19).
    /// An empty OID encodes as no content octets.
    pub fn to_ber(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();

        // Construction rules out a lone arc and keeps first * 40 + second in range
        if let [first, second, rest @ ..] = self.arcs.as_slice() {
            encode_subidentifier(&mut bytes, first * 40 + second);
            for &arc in rest {
                encode_subidentifier(&mut bytes, arc);
            }
        }

        bytes
    }

    /// Decode from BER content octets.
    ///
    /// Error offsets are relative to the start of `data`. Enforces
    /// [`MAX_OID_LEN`].
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();

        let (first_subid, consumed) = decode_subidentifier(data, 0)?;
        match first_subid {
            0..40 => {
                arcs.push(0);
                arcs.push(first_subid);
            }
            40..80 => {
                arcs.push(1);
                arcs.push(first_subid - 40);
            }
            _ => {
                arcs.push(2);
                arcs.push(first_subid - 80);
            }
        }

        let mut i = consumed;
        while i < data.len() {
            let (arc, used) = decode_subidentifier(&data[i..], i)?;
            arcs.push(arc);

            if arcs.len() > MAX_OID_LEN {
                return Err(Error::decode(
                    i,
                    DecodeErrorKind::OidTooLong {
                        count: arcs.len(),
                        max: MAX_OID_LEN,
                    },
                ));
            }
            i += used;
        }

        Ok(Self { arcs })
    }
}

#[inline]
fn encode_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u32) {
    let groups = ((u32::BITS - value.leading_zeros()).div_ceil(7)).max(1);
    for i in (0..groups).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

/// Decode one subidentifier, returning (value, bytes_consumed).
///
/// `start` is the offset of `data[0]` within the OID content, used for errors.
fn decode_subidentifier(data: &[u8], start: usize) -> Result<(u32, usize)> {
    let mut value: u32 = 0;

    for (i, &byte) in data.iter().enumerate() {
        if value > (u32::MAX >> 7) {
            return Err(Error::decode(start + i, DecodeErrorKind::IntegerOverflow));
        }
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    // Last octet still had the continuation bit set
    Err(Error::decode(
        start + data.len().saturating_sub(1),
        DecodeErrorKind::InvalidOidEncoding,
    ))
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<const N: usize> TryFrom<[u32; N]> for Oid {
    type Error = Error;

    fn try_from(arcs: [u32; N]) -> Result<Self> {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Build an [`Oid`] from literal arcs.
///
/// ```
/// use snmp_codec::oid;
///
/// let enterprise = oid!(1, 3, 6, 1, 4, 1, 1234);
/// assert_eq!(enterprise.to_string(), "1.3.6.1.4.1.1234");
/// assert!(enterprise.starts_with(&oid!(1, 3, 6, 1, 4, 1,)));
/// ```
///
/// Arcs must be constants, and are checked at compile time:
///
/// ```compile_fail
/// let single = snmp_codec::oid!(1);
/// ```
///
/// ```compile_fail
/// let bad_second_arc = snmp_codec::oid!(1, 40, 5);
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {{
        const ARCS: &[u32] = &[$($arc),*];
        const _: () = assert!(
            $crate::oid::Oid::__is_valid_literal(ARCS),
            "invalid OID literal"
        );
        $crate::oid::Oid::__from_literal(ARCS)
    }};
}
