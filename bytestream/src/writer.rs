//! Byte-level writer for encoding quest files.

use crate::codepage::encode_cp1251;
use crate::error::{ByteError, ByteResult};
use crate::Width;

/// A growable little-endian writer.
///
/// Call [`finish`](Self::finish) to get the final byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an unsigned integer of the given width.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::ValueOutOfRange`] if `value` doesn't fit in `width`.
    pub fn write_unsigned(&mut self, width: Width, value: u32) -> ByteResult<()> {
        if value > width.max_unsigned() {
            return Err(ByteError::ValueOutOfRange {
                value: i64::from(value),
                width,
            });
        }
        match width {
            Width::One => self.write_u8(value as u8),
            Width::Two => self.write_u16(value as u16),
            Width::Four => self.write_u32(value),
        }
        Ok(())
    }

    /// Writes a signed integer of the given width.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::ValueOutOfRange`] if `value` doesn't fit in `width`.
    pub fn write_signed(&mut self, width: Width, value: i32) -> ByteResult<()> {
        let (min, max) = width.signed_range();
        if value < min || value > max {
            return Err(ByteError::ValueOutOfRange {
                value: i64::from(value),
                width,
            });
        }
        match width {
            Width::One => self.write_u8(value as i8 as u8),
            Width::Two => self.bytes.extend_from_slice(&(value as i16).to_le_bytes()),
            Width::Four => self.write_i32(value),
        }
        Ok(())
    }

    /// Writes a length-prefixed Windows-1251 string.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::Unencodable`] for characters outside the code page
    /// and [`ByteError::LengthOverflow`] if the prefix cannot hold the length.
    pub fn write_string(&mut self, len_width: Width, text: &str) -> ByteResult<()> {
        let encoded = encode_cp1251(text)?;
        let length = encoded.len();
        let len = u32::try_from(length)
            .ok()
            .filter(|&len| len <= len_width.max_unsigned())
            .ok_or(ByteError::LengthOverflow {
                length,
                width: len_width,
            })?;
        self.write_unsigned(len_width, len)?;
        self.write_bytes(&encoded);
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
