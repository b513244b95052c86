//! Error types for byte-level operations.

use std::fmt;

use crate::Width;

/// Result type for byte-level operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading or writing primitive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Byte offset where the read started.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A byte has no mapping in the code page.
    UnmappedByte {
        /// Byte offset of the offending byte.
        offset: usize,
        /// The raw byte.
        byte: u8,
    },

    /// A character cannot be represented in the code page.
    Unencodable {
        /// The offending character.
        ch: char,
    },

    /// Value does not fit in the requested field width.
    ValueOutOfRange {
        /// The value that was out of range.
        value: i64,
        /// Width of the target field.
        width: Width,
    },

    /// A length prefix cannot hold the payload length.
    LengthOverflow {
        /// Payload length in bytes.
        length: usize,
        /// Width of the length prefix.
        width: Width,
    },
}

impl ByteError {
    /// Shifts a slice-relative offset to an absolute buffer offset.
    #[must_use]
    pub(crate) fn at_base(self, base: usize) -> Self {
        match self {
            Self::UnexpectedEof {
                offset,
                requested,
                available,
            } => Self::UnexpectedEof {
                offset: base + offset,
                requested,
                available,
            },
            Self::UnmappedByte { offset, byte } => Self::UnmappedByte {
                offset: base + offset,
                byte,
            },
            other => other,
        }
    }
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                offset,
                requested,
                available,
            } => {
                write!(
                    f,
                    "unexpected end of data at offset {offset:#x}: need {requested} bytes, have {available}"
                )
            }
            Self::UnmappedByte { offset, byte } => {
                write!(
                    f,
                    "byte 0x{byte:02X} at offset {offset:#x} has no code page mapping"
                )
            }
            Self::Unencodable { ch } => {
                write!(f, "character {ch:?} (U+{:04X}) is not in the code page", *ch as u32)
            }
            Self::ValueOutOfRange { value, width } => {
                write!(f, "value {value} does not fit in a {width} field")
            }
            Self::LengthOverflow { length, width } => {
                write!(f, "length {length} does not fit in a {width} length prefix")
            }
        }
    }
}

impl std::error::Error for ByteError {}
