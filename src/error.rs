//! Error types.
//!
//! Decode failures carry the absolute input offset and a [`DecodeErrorKind`];
//! every kind maps to one [`DecodeErrorCategory`].

use crate::ber::tag;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classes of decode failure.
///
/// Every [`DecodeErrorKind`] belongs to exactly one category, which lets callers
/// decide between skipping a message and aborting without matching every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorCategory {
    /// Length octets are missing, malformed, or claim more bytes than exist.
    MalformedLength,
    /// A tag byte is not a known scalar, SEQUENCE, or PDU tag.
    UnknownTag,
    /// A constructed value does not have the shape its context requires.
    StructuralMismatch,
    /// A scalar's content octets are short or do not fit the target type.
    TruncatedScalar,
}

impl std::fmt::Display for DecodeErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLength => write!(f, "malformed length"),
            Self::UnknownTag => write!(f, "unknown tag"),
            Self::StructuralMismatch => write!(f, "structural mismatch"),
            Self::TruncatedScalar => write!(f, "truncated scalar"),
        }
    }
}

/// Why a byte sequence was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A field has a different tag than its position requires.
    UnexpectedTag { expected: u8, actual: u8 },
    /// Tag does not name any known type.
    UnknownTag(u8),
    /// Input ended inside a tag or length.
    TruncatedData,
    /// Length octets are malformed.
    InvalidLength,
    /// The indefinite form (0x80) is not part of SNMP's BER subset.
    IndefiniteLength,
    /// Long-form length with more than four length octets.
    LengthTooLong { octets: usize },
    /// Length above [`MAX_LENGTH`](crate::ber::MAX_LENGTH).
    LengthExceedsMax { length: usize, max: usize },
    /// Declared length runs past the end of the input.
    LengthExceedsInput { length: usize, available: usize },
    /// Content read asked for more bytes than remain.
    InsufficientData { needed: usize, available: usize },
    /// INTEGER or unsigned content does not fit in 32 bits.
    IntegerOverflow,
    /// INTEGER-family value with no content octets.
    ZeroLengthInteger,
    /// Counter64 content longer than nine octets.
    Integer64TooLong { length: usize },
    /// Last OID sub-identifier has its continuation bit set.
    InvalidOidEncoding,
    /// Decoded OID has more arcs than [`MAX_OID_LEN`](crate::oid::MAX_OID_LEN).
    OidTooLong { count: usize, max: usize },
    /// NULL or exception marker with content octets.
    InvalidNull,
    /// IpAddress content is not four octets.
    InvalidIpAddressLength { length: usize },
    /// Constructed OCTET STRING (tag 0x24).
    ConstructedOctetString,
    /// Message version other than 0 (v1) or 1 (v2c).
    UnknownVersion(i32),
    /// Tag is not a PDU tag, or not one the current decoder handles.
    UnknownPduType(u8),
    /// PDU fields need more bytes than the PDU header declared.
    PduLengthMismatch { declared: usize, consumed: usize },
    /// Bytes left over after a complete value.
    TrailingData { remaining: usize },
    /// Constructed values nested deeper than the decoder allows.
    NestingTooDeep { max: usize },
}

impl DecodeErrorKind {
    /// The category this kind belongs to.
    pub fn category(&self) -> DecodeErrorCategory {
        match self {
            Self::TruncatedData
            | Self::InvalidLength
            | Self::IndefiniteLength
            | Self::LengthTooLong { .. }
            | Self::LengthExceedsMax { .. }
            | Self::LengthExceedsInput { .. } => DecodeErrorCategory::MalformedLength,
            Self::UnknownTag(_) | Self::UnknownPduType(_) => DecodeErrorCategory::UnknownTag,
            Self::UnexpectedTag { .. }
            | Self::InvalidNull
            | Self::InvalidIpAddressLength { .. }
            | Self::ConstructedOctetString
            | Self::UnknownVersion(_)
            | Self::PduLengthMismatch { .. }
            | Self::TrailingData { .. }
            | Self::NestingTooDeep { .. } => DecodeErrorCategory::StructuralMismatch,
            Self::InsufficientData { .. }
            | Self::IntegerOverflow
            | Self::ZeroLengthInteger
            | Self::Integer64TooLong { .. }
            | Self::InvalidOidEncoding
            | Self::OidTooLong { .. } => DecodeErrorCategory::TruncatedScalar,
        }
    }
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => write!(
                f,
                "found {} (0x{actual:02X}) where {} (0x{expected:02X}) belongs",
                tag::type_name(*actual),
                tag::type_name(*expected)
            ),
            Self::UnknownTag(t) => write!(f, "unknown tag 0x{t:02X}"),
            Self::TruncatedData => write!(f, "input ends inside a tag or length"),
            Self::InvalidLength => write!(f, "malformed length octets"),
            Self::IndefiniteLength => write!(f, "indefinite-form length"),
            Self::LengthTooLong { octets } => {
                write!(f, "{octets} length octets, at most 4 allowed")
            }
            Self::LengthExceedsMax { length, max } => {
                write!(f, "length {length} above the {max}-byte limit")
            }
            Self::LengthExceedsInput { length, available } => {
                write!(f, "declared length {length} exceeds {available} remaining bytes")
            }
            Self::InsufficientData { needed, available } => {
                write!(f, "{needed} content bytes required, {available} present")
            }
            Self::IntegerOverflow => write!(f, "integer does not fit in 32 bits"),
            Self::ZeroLengthInteger => write!(f, "integer with no content octets"),
            Self::Integer64TooLong { length } => {
                write!(f, "Counter64 content of {length} octets")
            }
            Self::InvalidOidEncoding => write!(f, "unterminated OID sub-identifier"),
            Self::OidTooLong { count, max } => {
                write!(f, "OID of {count} arcs over the {max}-arc limit")
            }
            Self::InvalidNull => write!(f, "NULL-typed value with content"),
            Self::InvalidIpAddressLength { length } => {
                write!(f, "IpAddress of {length} octets, 4 required")
            }
            Self::ConstructedOctetString => write!(f, "constructed OCTET STRING"),
            Self::UnknownVersion(v) => write!(f, "SNMP version {v} is not v1 or v2c"),
            Self::UnknownPduType(t) => write!(f, "unknown PDU tag 0x{t:02X}"),
            Self::PduLengthMismatch { declared, consumed } => {
                write!(f, "PDU declares {declared} bytes but its fields consumed {consumed}")
            }
            Self::TrailingData { remaining } => {
                write!(f, "{remaining} trailing bytes after value")
            }
            Self::NestingTooDeep { max } => {
                write!(f, "constructed values nested deeper than {max}")
            }
        }
    }
}

/// Shape errors found when converting a decoded value tree into a typed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureErrorKind {
    /// Expected a SEQUENCE, found another type.
    ExpectedSequence { actual: u8 },
    /// A variable binding is not a 2-element SEQUENCE.
    VarBindArity { index: usize, count: usize },
    /// A variable binding's first element is not an OBJECT IDENTIFIER.
    VarBindName { index: usize, actual: u8 },
    /// A message envelope does not hold exactly version, community and PDU.
    EnvelopeArity { count: usize },
    /// An envelope element has the wrong type.
    EnvelopeField { position: usize, actual: u8 },
    /// The envelope version is not SNMPv1 or SNMPv2c.
    EnvelopeVersion { value: i32 },
}

impl std::fmt::Display for StructureErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExpectedSequence { actual } => {
                write!(
                    f,
                    "expected SEQUENCE, got {} (0x{:02X})",
                    tag::type_name(*actual),
                    actual
                )
            }
            Self::VarBindArity { index, count } => write!(
                f,
                "varbind {} has {} elements, expected 2",
                index, count
            ),
            Self::VarBindName { index, actual } => write!(
                f,
                "varbind {} name is {} (0x{:02X}), expected OBJECT IDENTIFIER",
                index,
                tag::type_name(*actual),
                actual
            ),
            Self::EnvelopeArity { count } => {
                write!(f, "message has {} elements, expected 3", count)
            }
            Self::EnvelopeField { position, actual } => write!(
                f,
                "message element {} has unexpected type {} (0x{:02X})",
                position,
                tag::type_name(*actual),
                actual
            ),
            Self::EnvelopeVersion { value } => {
                write!(f, "unsupported message version {}", value)
            }
        }
    }
}

/// Reasons an OID is invalid as a value, rather than as bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Dotted text contains an arc that is not a `u32`.
    InvalidArc,
    /// Exactly one arc; the first two arcs share a sub-identifier, so a lone
    /// arc has no encoding.
    SingleArc,
    /// First arc above 2.
    InvalidFirstArc(u32),
    /// Second arc cannot be packed with the first.
    InvalidSecondArc { first: u32, second: u32 },
    /// More than [`MAX_OID_LEN`](crate::oid::MAX_OID_LEN) arcs.
    TooManyArcs { count: usize, max: usize },
    /// Symbolic name not present in the name table.
    UnknownName,
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArc => write!(f, "arc is not a 32-bit unsigned number"),
            Self::SingleArc => write!(f, "a single arc has no BER encoding"),
            Self::InvalidFirstArc(v) => write!(f, "first arc {v} is not 0, 1 or 2"),
            Self::InvalidSecondArc { first, second } => {
                write!(f, "arcs {first}.{second} cannot share one sub-identifier")
            }
            Self::TooManyArcs { count, max } => {
                write!(f, "{count} arcs over the {max}-arc limit")
            }
            Self::UnknownName => write!(f, "unknown name"),
        }
    }
}

macro_rules! error_status_table {
    ($($variant:ident = $code:literal => $name:literal,)+) => {
        /// PDU error-status values (RFC 3416 Section 3).
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[non_exhaustive]
        pub enum ErrorStatus {
            $($variant,)+
            /// A code outside the RFC range, kept as received.
            Unknown(i32),
        }

        impl ErrorStatus {
            /// Map a wire code to a status.
            pub fn from_i32(value: i32) -> Self {
                match value {
                    $($code => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            /// The wire code.
            pub fn as_i32(&self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => *code,
                }
            }

            /// The RFC name (`noError`, `tooBig`, ...), `None` for unknown codes.
            pub fn name(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($name),)+
                    Self::Unknown(_) => None,
                }
            }
        }
    };
}

error_status_table! {
    NoError = 0 => "noError",
    TooBig = 1 => "tooBig",
    NoSuchName = 2 => "noSuchName",
    BadValue = 3 => "badValue",
    ReadOnly = 4 => "readOnly",
    GenErr = 5 => "genErr",
    NoAccess = 6 => "noAccess",
    WrongType = 7 => "wrongType",
    WrongLength = 8 => "wrongLength",
    WrongEncoding = 9 => "wrongEncoding",
    WrongValue = 10 => "wrongValue",
    NoCreation = 11 => "noCreation",
    InconsistentValue = 12 => "inconsistentValue",
    ResourceUnavailable = 13 => "resourceUnavailable",
    CommitFailed = 14 => "commitFailed",
    UndoFailed = 15 => "undoFailed",
    AuthorizationError = 16 => "authorizationError",
    NotWritable = 17 => "notWritable",
    InconsistentName = 18 => "inconsistentName",
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown({})", self.as_i32()),
        }
    }
}

/// Every failure the codec reports.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input bytes rejected at `offset`.
    #[error("decode error at offset {offset}: {kind}")]
    Decode {
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// Decoded value tree does not have the expected shape.
    #[error("structural mismatch: {kind}")]
    Structure { kind: StructureErrorKind },

    /// OID rejected while parsing or validating.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        /// The text that failed to parse, when there was one.
        input: Option<Box<str>>,
    },
}

impl Error {
    /// Decode error at an absolute offset.
    pub fn decode(offset: usize, kind: DecodeErrorKind) -> Self {
        Self::Decode { offset, kind }
    }

    /// Tree-shape error.
    pub fn structure(kind: StructureErrorKind) -> Self {
        Self::Structure { kind }
    }

    /// OID error without source text.
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// OID error carrying the text that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// The decode error kind, if this is a decode error.
    pub fn decode_kind(&self) -> Option<DecodeErrorKind> {
        match self {
            Self::Decode { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The decode category, if this is a decode error.
    ///
    /// Structure errors report [`DecodeErrorCategory::StructuralMismatch`].
    pub fn category(&self) -> Option<DecodeErrorCategory> {
        match self {
            Self::Decode { kind, .. } => Some(kind.category()),
            Self::Structure { .. } => Some(DecodeErrorCategory::StructuralMismatch),
            Self::InvalidOid { .. } => None,
        }
    }
}
