//! Error types for codec operations.

use std::fmt;

use bytestream::ByteError;
use layout::{LayoutError, LimitKind};
use quest::IntegrityError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding or encoding a quest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed, truncated or out-of-limit bytes.
    Format(FormatError),

    /// Dangling or duplicate references between records.
    Integrity(IntegrityError),
}

/// Structural problems with the byte layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Header or tag error.
    Layout(LayoutError),

    /// Primitive read or write failed.
    Byte(ByteError),

    /// A count or size exceeded the configured limits.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A declared count cannot fit in the bytes that remain.
    ImpossibleCount {
        kind: LimitKind,
        count: usize,
        remaining: usize,
    },

    /// Bytes left over after the last record.
    TrailingData { offset: usize, remaining: usize },

    /// Two embedded blobs share a name.
    DuplicateBlob { name: String },

    /// Records decode cleanly but do not form a valid quest.
    Structure(IntegrityError),
}

impl CodecError {
    pub(crate) const fn limit(kind: LimitKind, limit: usize, actual: usize) -> Self {
        Self::Format(FormatError::LimitsExceeded {
            kind,
            limit,
            actual,
        })
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "format error: {e}"),
            Self::Integrity(e) => write!(f, "integrity error: {e}"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "{e}"),
            Self::Byte(e) => write!(f, "{e}"),
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::ImpossibleCount {
                kind,
                count,
                remaining,
            } => {
                write!(
                    f,
                    "{kind} {count} cannot fit in the remaining {remaining} bytes"
                )
            }
            Self::TrailingData { offset, remaining } => {
                write!(f, "{remaining} trailing bytes at offset {offset}")
            }
            Self::DuplicateBlob { name } => write!(f, "duplicate embedded blob {name:?}"),
            Self::Structure(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::Integrity(e) => Some(e),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Byte(e) => Some(e),
            Self::Structure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for CodecError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

impl From<LayoutError> for CodecError {
    fn from(err: LayoutError) -> Self {
        Self::Format(FormatError::Layout(err))
    }
}

impl From<ByteError> for CodecError {
    fn from(err: ByteError) -> Self {
        Self::Format(FormatError::Byte(err))
    }
}

impl From<IntegrityError> for CodecError {
    fn from(err: IntegrityError) -> Self {
        if err.is_referential() {
            Self::Integrity(err)
        } else {
            Self::Format(FormatError::Structure(err))
        }
    }
}
