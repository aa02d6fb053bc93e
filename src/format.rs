//! EOF container format constants and detection
//!
//! This module defines the fixed prefix that identifies an EOF container
//! (EIP-3540) and the section kinds allowed by the version 1 grammar.
//!
//! # Binary Format Overview
//!
//! ```text
//! offset  size       field
//! 0       1          format byte (0xEF)
//! 1       2          magic (0xCA 0xFE)
//! 3       1          version (0x01)
//! 4       3          code section: kind 0x01 + u16 size (big-endian)
//! 7       3          data section (optional): kind 0x02 + u16 size
//! ..      1          terminator (0x00)
//! ..      code_size  code section contents
//! ..      data_size  data section contents
//! ```
//!
//! Anything that fails the format byte or magic check is legacy code and is
//! treated as opaque. The predicates here never fail and never allocate.

use serde::Serialize;
use std::fmt;
use zerocopy::byteorder::big_endian::U16;
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

/// First byte of every EOF container
pub const FORMAT_BYTE: u8 = 0xEF;

/// Magic bytes following the format byte
pub const MAGIC: [u8; 2] = [0xCA, 0xFE];

/// The only supported container version
pub const EOF1_VERSION: u8 = 1;

/// Offset of the version byte
pub const VERSION_OFFSET: usize = 1 + MAGIC.len();

/// Offset of the first section declaration
pub const SECTIONS_OFFSET: usize = VERSION_OFFSET + 1;

/// Width of a section size field
pub const SECTION_SIZE_LEN: usize = 2;

/// Width of a sized section declaration (kind byte + size)
pub const SECTION_DECL_LEN: usize = 1 + SECTION_SIZE_LEN;

/// Section kinds of the version 1 grammar
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// End of section declarations
    Terminator = 0,
    /// The code section
    Code = 1,
    /// The data section
    Data = 2,
}

impl SectionKind {
    /// Map a kind byte to a section kind, `None` for unknown kinds
    #[inline]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(SectionKind::Terminator),
            1 => Some(SectionKind::Code),
            2 => Some(SectionKind::Data),
            _ => None,
        }
    }

    /// Human-readable section name
    pub const fn name(self) -> &'static str {
        match self {
            SectionKind::Terminator => "Terminator",
            SectionKind::Code => "Code",
            SectionKind::Data => "Data",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed prefix shared by every valid EOF1 container (8 bytes, unaligned)
///
/// A valid container always declares its code section first, so the code
/// size sits at a fixed offset and the byte after it is either the data
/// section kind or the terminator.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Eof1Prefix {
    /// Format byte (0xEF)
    pub format: u8,
    /// Magic (0xCAFE)
    pub magic: [u8; 2],
    /// Version (1)
    pub version: u8,
    /// Code section kind (1)
    pub code_kind: u8,
    /// Code section size
    pub code_size: U16,
    /// Data section kind (2) or terminator (0)
    pub next_kind: u8,
}

const _: () = {
    assert!(std::mem::size_of::<Eof1Prefix>() == 8);
};

/// Returns true if `code` starts with the EOF format byte
#[inline]
pub fn has_format_byte(code: &[u8]) -> bool {
    code.first() == Some(&FORMAT_BYTE)
}

/// Returns true if `code` carries the EOF magic after the format byte
#[inline]
pub fn has_eof_magic(code: &[u8]) -> bool {
    code.get(1..1 + MAGIC.len()) == Some(&MAGIC[..])
}

/// Returns true if `code` starts with the format byte and the magic
///
/// This is a cheap classification; it says nothing about whether the rest
/// of the container is well formed.
#[inline]
pub fn is_eof_code(code: &[u8]) -> bool {
    has_format_byte(code) && has_eof_magic(code)
}

/// Coarse classification of a bytecode buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CodeFormat {
    /// No EOF prefix; opaque legacy bytecode
    Legacy,
    /// Starts with the EOF prefix (may still be malformed)
    Eof,
}

impl CodeFormat {
    /// Classify `code` by its prefix only
    pub fn detect(code: &[u8]) -> Self {
        if is_eof_code(code) {
            CodeFormat::Eof
        } else {
            CodeFormat::Legacy
        }
    }
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeFormat::Legacy => write!(f, "legacy"),
            CodeFormat::Eof => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_byte() {
        assert!(!has_format_byte(&[]));
        assert!(!has_format_byte(&[0xFE]));
        assert!(has_format_byte(&[0xEF]));
        assert!(has_format_byte(&[0xEF, 0x00, 0x01]));
    }

    #[test]
    fn test_magic() {
        assert!(!has_eof_magic(&[]));
        assert!(!has_eof_magic(&[0xEF]));
        assert!(!has_eof_magic(&[0xEF, 0xCA]));
        assert!(!has_eof_magic(&[0xEF, 0xCA, 0xFF]));
        assert!(has_eof_magic(&[0xEF, 0xCA, 0xFE]));
        // Magic is checked independently of the format byte
        assert!(has_eof_magic(&[0x00, 0xCA, 0xFE, 0x01]));
    }

    #[test]
    fn test_is_eof_code() {
        assert!(is_eof_code(&[0xEF, 0xCA, 0xFE]));
        assert!(!is_eof_code(&[0xFE, 0xCA, 0xFE]));
        assert!(!is_eof_code(&[0x60, 0x00, 0x60, 0x00]));
    }

    #[test]
    fn test_detect() {
        assert_eq!(CodeFormat::detect(&[]), CodeFormat::Legacy);
        assert_eq!(CodeFormat::detect(&[0x60, 0x01]), CodeFormat::Legacy);
        assert_eq!(CodeFormat::detect(&[0xEF, 0xCA, 0xFE, 0x02]), CodeFormat::Eof);
    }

    #[test]
    fn test_section_kind() {
        assert_eq!(SectionKind::from_u8(0), Some(SectionKind::Terminator));
        assert_eq!(SectionKind::from_u8(1), Some(SectionKind::Code));
        assert_eq!(SectionKind::from_u8(2), Some(SectionKind::Data));
        assert_eq!(SectionKind::from_u8(3), None);
        assert_eq!(SectionKind::from_u8(0xFF), None);
        assert_eq!(SectionKind::Data as u8, 2);
    }

    #[test]
    fn test_layout_offsets() {
        assert_eq!(VERSION_OFFSET, 3);
        assert_eq!(SECTIONS_OFFSET, 4);
        assert_eq!(SECTION_DECL_LEN, 3);
    }

    #[test]
    fn test_prefix_layout() {
        let bytes = [0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x01, 0x02, 0x02, 0x00];
        let Ok((prefix, rest)) = Eof1Prefix::ref_from_prefix(&bytes[..]) else {
            panic!("9 bytes should hold the 8-byte prefix");
        };
        assert_eq!(prefix.format, FORMAT_BYTE);
        assert_eq!(prefix.magic, MAGIC);
        assert_eq!(prefix.version, EOF1_VERSION);
        assert_eq!(prefix.code_size.get(), 0x0102);
        assert_eq!(prefix.next_kind, SectionKind::Data as u8);
        assert_eq!(rest, &[0x00]);
    }
}
