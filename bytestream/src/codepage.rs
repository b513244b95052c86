//! Windows-1251 code page.
//!
//! Quest texts are stored as single-byte Windows-1251. Bytes below `0x80`
//! are ASCII; `0xC0..=0xFF` map linearly onto `А..я` (U+0410..U+044F); the
//! `0x80..=0xBF` block is the explicit table below. `0x98` is undefined in
//! the code page and is rejected, as are C0 control bytes other than tab,
//! line feed and carriage return. An incorrect table would corrupt text
//! silently, so anything outside the table is an error in both directions.

use crate::error::{ByteError, ByteResult};

/// Unicode scalars for bytes `0x80..=0xBF`; `0` marks an unmapped byte.
const HIGH_TABLE: [u16; 64] = [
    // 0x80
    0x0402, 0x0403, 0x201A, 0x0453, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x20AC, 0x2030, 0x0409, 0x2039, 0x040A, 0x040C, 0x040B, 0x040F, //
    // 0x90
    0x0452, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x0000, 0x2122, 0x0459, 0x203A, 0x045A, 0x045C, 0x045B, 0x045F, //
    // 0xA0
    0x00A0, 0x040E, 0x045E, 0x0408, 0x00A4, 0x0490, 0x00A6, 0x00A7, //
    0x0401, 0x00A9, 0x0404, 0x00AB, 0x00AC, 0x00AD, 0x00AE, 0x0407, //
    // 0xB0
    0x00B0, 0x00B1, 0x0406, 0x0456, 0x0491, 0x00B5, 0x00B6, 0x00B7, //
    0x0451, 0x2116, 0x0454, 0x00BB, 0x0458, 0x0405, 0x0455, 0x0457, //
];

const CYRILLIC_BASE: u32 = 0x0410;

const fn is_allowed_control(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\r')
}

fn decode_byte(byte: u8) -> Option<char> {
    match byte {
        0x00..=0x1F if !is_allowed_control(byte) => None,
        0x00..=0x7F => Some(char::from(byte)),
        0x80..=0xBF => match HIGH_TABLE[usize::from(byte - 0x80)] {
            0 => None,
            scalar => char::from_u32(u32::from(scalar)),
        },
        0xC0..=0xFF => char::from_u32(CYRILLIC_BASE + u32::from(byte - 0xC0)),
    }
}

fn encode_char(ch: char) -> Option<u8> {
    let scalar = ch as u32;
    if scalar < 0x80 {
        let byte = scalar as u8;
        if byte < 0x20 && !is_allowed_control(byte) {
            return None;
        }
        return Some(byte);
    }
    if (CYRILLIC_BASE..CYRILLIC_BASE + 64).contains(&scalar) {
        return Some(0xC0 + (scalar - CYRILLIC_BASE) as u8);
    }
    HIGH_TABLE
        .iter()
        .position(|&entry| entry != 0 && u32::from(entry) == scalar)
        .map(|idx| 0x80 + idx as u8)
}

/// Decodes Windows-1251 bytes into a string.
///
/// Offsets in errors are relative to the start of `bytes`.
pub fn decode_cp1251(bytes: &[u8]) -> ByteResult<String> {
    let mut out = String::with_capacity(bytes.len());
    for (offset, &byte) in bytes.iter().enumerate() {
        let ch = decode_byte(byte).ok_or(ByteError::UnmappedByte { offset, byte })?;
        out.push(ch);
    }
    Ok(out)
}

/// Encodes a string into Windows-1251 bytes.
pub fn encode_cp1251(text: &str) -> ByteResult<Vec<u8>> {
    text.chars()
        .map(|ch| encode_char(ch).ok_or(ByteError::Unencodable { ch }))
        .collect()
}
