//! Error types for layout operations.

use std::fmt;

use bytestream::ByteError;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors raised by header and tag decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    /// File is too small to contain the fixed header.
    FileTooSmall { actual: usize, required: usize },

    /// Invalid magic number.
    InvalidMagic { found: u32 },

    /// Unsupported format version.
    UnsupportedVersion { found: u16 },

    /// Invalid flags for the variant.
    InvalidFlags { flags: u16 },

    /// Unknown record tag.
    UnknownTag { field: TagField, value: u8 },

    /// Primitive read failed.
    Byte(ByteError),
}

/// Record fields that carry a one-byte tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    ParamKind,
    Boundary,
    CriticalEnding,
    Ending,
    Condition,
    Formula,
}

/// Limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Params,
    Locations,
    Jumps,
    Paragraphs,
    Conditions,
    DisplayRanges,
    StringBytes,
    MediaBlobs,
    MediaBytes,
}

impl From<ByteError> for LayoutError {
    fn from(err: ByteError) -> Self {
        Self::Byte(err)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileTooSmall { actual, required } => {
                write!(f, "file too small: {actual} bytes, need at least {required}")
            }
            Self::InvalidMagic { found } => {
                write!(f, "invalid magic number: 0x{found:08X}")
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version: {found}")
            }
            Self::InvalidFlags { flags } => {
                write!(f, "invalid flags: 0x{flags:04X}")
            }
            Self::UnknownTag { field, value } => {
                write!(f, "unknown {field} tag: {value}")
            }
            Self::Byte(err) => write!(f, "{err}"),
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ParamKind => "param kind",
            Self::Boundary => "critical boundary",
            Self::CriticalEnding => "critical ending",
            Self::Ending => "ending",
            Self::Condition => "condition",
            Self::Formula => "formula",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Params => "param count",
            Self::Locations => "location count",
            Self::Jumps => "jump count",
            Self::Paragraphs => "paragraph count",
            Self::Conditions => "condition count",
            Self::DisplayRanges => "display range count",
            Self::StringBytes => "string length",
            Self::MediaBlobs => "media blob count",
            Self::MediaBytes => "embedded media size",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Byte(err) => Some(err),
            _ => None,
        }
    }
}
