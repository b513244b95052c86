//! Little-endian byte cursor and Windows-1251 text codec for quest files.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for the primitive
//! fields of the quest format: fixed-width integers, flags, and
//! length-prefixed strings in the legacy single-byte code page.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about locations, jumps or params.
//! - **Explicit errors** - Truncation and unmapped text bytes are errors, never silent.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter, Width};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_unsigned(Width::Two, 513).unwrap();
//! writer.write_string(Width::Four, "Привет").unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_unsigned(Width::Two).unwrap(), 513);
//! assert_eq!(reader.read_string(Width::Four).unwrap(), "Привет");
//! ```

mod codepage;
mod error;
mod reader;
mod writer;

use std::fmt;

pub use codepage::{decode_cp1251, encode_cp1251};
pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;

/// Width of a fixed-size integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    One,
    Two,
    Four,
}

impl Width {
    /// Size of the field in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    /// Largest unsigned value the field can hold.
    #[must_use]
    pub const fn max_unsigned(self) -> u32 {
        match self {
            Self::One => u8::MAX as u32,
            Self::Two => u16::MAX as u32,
            Self::Four => u32::MAX,
        }
    }

    /// Signed range the field can hold.
    #[must_use]
    pub const fn signed_range(self) -> (i32, i32) {
        match self {
            Self::One => (i8::MIN as i32, i8::MAX as i32),
            Self::Two => (i16::MIN as i32, i16::MAX as i32),
            Self::Four => (i32::MIN, i32::MAX),
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bytes() * 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let writer = ByteWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = ByteReader::new(&bytes);
        assert!(reader.is_empty());
    }

    #[test]
    fn mixed_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_u8(7);
        writer.write_signed(Width::Two, -300).unwrap();
        writer.write_unsigned(Width::Four, 0xDEAD_BEEF).unwrap();
        writer.write_string(Width::Two, "Ёжик").unwrap();
        writer.write_bool(true);
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_signed(Width::Two).unwrap(), -300);
        assert_eq!(reader.read_unsigned(Width::Four).unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_string(Width::Two).unwrap(), "Ёжик");
        assert!(reader.read_bool().unwrap());
        assert!(reader.is_empty());
    }

    #[test]
    fn width_ranges() {
        assert_eq!(Width::One.max_unsigned(), 255);
        assert_eq!(Width::Two.signed_range(), (-32768, 32767));
        assert_eq!(Width::Four.bytes(), 4);
        assert_eq!(Width::Two.to_string(), "16-bit");
    }

    #[test]
    fn doctest_example() {
        let mut writer = ByteWriter::new();
        writer.write_unsigned(Width::Two, 513).unwrap();
        writer.write_string(Width::Four, "Привет").unwrap();
        let bytes = writer.finish();

        // 2 bytes of value + 4 bytes of length + 6 single-byte characters.
        assert_eq!(bytes.len(), 12);
    }
}
