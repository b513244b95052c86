//! File header types and constants.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{LayoutError, LayoutResult};

/// Magic number of the text-and-logic-only variant.
///
/// These values are fixed by the legacy format and must never change.
pub const MAGIC_TEXT_ONLY: u32 = 0x423A_35D2;

/// Magic number of the rich variant that carries media references.
pub const MAGIC_RICH: u32 = 0x423A_35D7;

/// Current file format version.
pub const VERSION: u16 = 1;

/// Size of the fixed header prefix in bytes.
pub const HEADER_SIZE: usize = 4 + 2 + 2;

/// On-disk variant, identified by the magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Text and logic only; no media records.
    TextOnly,
    /// Adds media references per paragraph, jump and param, and optionally
    /// a trailing table of embedded media blobs.
    Rich,
}

impl Variant {
    /// Returns the magic number for this variant.
    #[must_use]
    pub const fn magic(self) -> u32 {
        match self {
            Self::TextOnly => MAGIC_TEXT_ONLY,
            Self::Rich => MAGIC_RICH,
        }
    }

    /// Identifies the variant from a magic number.
    pub const fn from_magic(magic: u32) -> LayoutResult<Self> {
        match magic {
            MAGIC_TEXT_ONLY => Ok(Self::TextOnly),
            MAGIC_RICH => Ok(Self::Rich),
            found => Err(LayoutError::InvalidMagic { found }),
        }
    }

    /// Returns `true` if records carry media references.
    #[must_use]
    pub const fn has_media(self) -> bool {
        matches!(self, Self::Rich)
    }
}

/// Header flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileFlags(u16);

impl FileFlags {
    /// A table of embedded media blobs follows the jump records.
    pub const EMBEDDED_MEDIA: u16 = 1 << 0;

    /// Reserved bits mask (must be zero in version 1).
    const RESERVED_MASK: u16 = !0b1;

    /// Creates new flags from a raw value.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw flag bits.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Creates flags with the embedded-media bit set as requested.
    #[must_use]
    pub const fn with_embedded_media(embedded: bool) -> Self {
        if embedded {
            Self(Self::EMBEDDED_MEDIA)
        } else {
            Self(0)
        }
    }

    /// Returns `true` if an embedded media table is present.
    #[must_use]
    pub const fn has_embedded_media(self) -> bool {
        self.0 & Self::EMBEDDED_MEDIA != 0
    }

    /// Returns `true` if the flags are valid for the given variant.
    ///
    /// No reserved bits may be set, and only the rich variant may embed media.
    #[must_use]
    pub const fn is_valid_for(self, variant: Variant) -> bool {
        if self.0 & Self::RESERVED_MASK != 0 {
            return false;
        }
        !self.has_embedded_media() || variant.has_media()
    }
}

/// Fixed file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub variant: Variant,
    pub version: u16,
    pub flags: FileFlags,
}

impl FileHeader {
    /// Creates a current-version header.
    #[must_use]
    pub const fn new(variant: Variant, flags: FileFlags) -> Self {
        Self {
            variant,
            version: VERSION,
            flags,
        }
    }
}

/// Reads and validates the fixed header.
pub fn decode_header(reader: &mut ByteReader<'_>) -> LayoutResult<FileHeader> {
    if reader.remaining() < HEADER_SIZE {
        return Err(LayoutError::FileTooSmall {
            actual: reader.remaining(),
            required: HEADER_SIZE,
        });
    }

    let variant = Variant::from_magic(reader.read_u32()?)?;

    let version = reader.read_u16()?;
    if version != VERSION {
        return Err(LayoutError::UnsupportedVersion { found: version });
    }

    let flags_raw = reader.read_u16()?;
    let flags = FileFlags::from_raw(flags_raw);
    if !flags.is_valid_for(variant) {
        return Err(LayoutError::InvalidFlags { flags: flags_raw });
    }

    Ok(FileHeader {
        variant,
        version,
        flags,
    })
}

/// Writes the fixed header.
pub fn encode_header(header: &FileHeader, writer: &mut ByteWriter) {
    writer.write_u32(header.variant.magic());
    writer.write_u16(header.version);
    writer.write_u16(header.flags.raw());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_values_are_distinct() {
        assert_ne!(MAGIC_TEXT_ONLY, MAGIC_RICH);
        assert_eq!(Variant::TextOnly.magic(), 0x423A_35D2);
    }

    #[test]
    fn header_size_is_correct() {
        // magic(4) + version(2) + flags(2)
        assert_eq!(HEADER_SIZE, 8);
    }

    #[test]
    fn variant_from_magic() {
        assert_eq!(Variant::from_magic(MAGIC_RICH), Ok(Variant::Rich));
        assert_eq!(
            Variant::from_magic(0xDEAD_BEEF),
            Err(LayoutError::InvalidMagic { found: 0xDEAD_BEEF })
        );
    }

    #[test]
    fn flags_validity() {
        assert!(FileFlags::default().is_valid_for(Variant::TextOnly));
        assert!(FileFlags::with_embedded_media(true).is_valid_for(Variant::Rich));
        assert!(!FileFlags::with_embedded_media(true).is_valid_for(Variant::TextOnly));
        assert!(!FileFlags::from_raw(0b10).is_valid_for(Variant::Rich));
        assert!(!FileFlags::from_raw(0xFF01).is_valid_for(Variant::Rich));
    }

    #[test]
    fn header_roundtrip() {
        let header = FileHeader::new(Variant::Rich, FileFlags::with_embedded_media(true));
        let mut writer = ByteWriter::new();
        encode_header(&header, &mut writer);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), HEADER_SIZE);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(decode_header(&mut reader).unwrap(), header);
        assert!(reader.is_empty());
    }

    #[test]
    fn header_too_small() {
        let mut reader = ByteReader::new(&[0xD2, 0x35, 0x3A]);
        assert_eq!(
            decode_header(&mut reader),
            Err(LayoutError::FileTooSmall {
                actual: 3,
                required: HEADER_SIZE
            })
        );
    }

    #[test]
    fn header_rejects_unknown_version() {
        let mut bytes = MAGIC_TEXT_ONLY.to_le_bytes().to_vec();
        bytes.extend_from_slice(&7u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            decode_header(&mut reader),
            Err(LayoutError::UnsupportedVersion { found: 7 })
        );
    }

    #[test]
    fn header_rejects_media_flag_on_text_only() {
        let mut writer = ByteWriter::new();
        encode_header(
            &FileHeader::new(Variant::TextOnly, FileFlags::with_embedded_media(true)),
            &mut writer,
        );
        let bytes = writer.finish();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            decode_header(&mut reader),
            Err(LayoutError::InvalidFlags { flags: 1 })
        );
    }
}
