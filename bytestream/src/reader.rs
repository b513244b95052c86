//! Byte-level reader with bounded operations.

use crate::codepage::decode_cp1251;
use crate::error::{ByteError, ByteResult};
use crate::Width;

/// A cursor over little-endian binary data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> ByteResult<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> ByteResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a one-byte flag; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> ByteResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> ByteResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    pub fn read_i16(&mut self) -> ByteResult<i16> {
        Ok(i16::from_le_bytes(self.read_array::<2>()?))
    }

    pub fn read_u32(&mut self) -> ByteResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_i32(&mut self) -> ByteResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads an unsigned integer of the given width.
    pub fn read_unsigned(&mut self, width: Width) -> ByteResult<u32> {
        match width {
            Width::One => self.read_u8().map(u32::from),
            Width::Two => self.read_u16().map(u32::from),
            Width::Four => self.read_u32(),
        }
    }

    /// Reads a signed integer of the given width.
    pub fn read_signed(&mut self, width: Width) -> ByteResult<i32> {
        match width {
            Width::One => self.read_u8().map(|b| i32::from(b as i8)),
            Width::Two => self.read_i16().map(i32::from),
            Width::Four => self.read_i32(),
        }
    }

    /// Reads a length-prefixed Windows-1251 string.
    ///
    /// The prefix holds the byte length (one byte per character).
    pub fn read_string(&mut self, len_width: Width) -> ByteResult<String> {
        let len = self.read_unsigned(len_width)? as usize;
        let start = self.pos;
        let bytes = self.read_bytes(len)?;
        decode_cp1251(bytes).map_err(|err| err.at_base(start))
    }

    /// Fails unless every byte has been consumed.
    pub fn expect_end(&self) -> Result<(), usize> {
        match self.remaining() {
            0 => Ok(()),
            trailing => Err(trailing),
        }
    }

    fn ensure(&self, n: usize) -> ByteResult<()> {
        let available = self.remaining();
        if n > available {
            return Err(ByteError::UnexpectedEof {
                offset: self.pos,
                requested: n,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(result, Err(ByteError::UnexpectedEof { .. })));
    }

    #[test]
    fn read_u32_little_endian() {
        let mut reader = ByteReader::new(&[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_signed_widths() {
        let mut reader = ByteReader::new(&[0xFF, 0xFE, 0xFF, 0xFD, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_signed(Width::One).unwrap(), -1);
        assert_eq!(reader.read_signed(Width::Two).unwrap(), -2);
        assert_eq!(reader.read_signed(Width::Four).unwrap(), -3);
    }

    #[test]
    fn truncated_read_reports_offset() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.read_u8().unwrap();
        let err = reader.read_u32().unwrap_err();
        assert_eq!(
            err,
            ByteError::UnexpectedEof {
                offset: 1,
                requested: 4,
                available: 2
            }
        );
        // A failed read does not advance the cursor.
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn read_string_truncated_body() {
        let mut reader = ByteReader::new(&[5, 0, b'a', b'b']);
        let err = reader.read_string(Width::Two).unwrap_err();
        assert!(matches!(
            err,
            ByteError::UnexpectedEof {
                requested: 5,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn read_string_unmapped_byte_uses_absolute_offset() {
        let mut reader = ByteReader::new(&[0, 2, 0, b'a', 0x98]);
        reader.read_u8().unwrap();
        let err = reader.read_string(Width::Two).unwrap_err();
        assert_eq!(
            err,
            ByteError::UnmappedByte {
                offset: 4,
                byte: 0x98
            }
        );
    }

    #[test]
    fn expect_end_reports_trailing() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.read_u8().unwrap();
        assert_eq!(reader.expect_end(), Err(2));
        reader.read_u16().unwrap();
        assert_eq!(reader.expect_end(), Ok(()));
    }
}
