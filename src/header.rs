//! EOF1 header parsing
//!
//! [`read_eof1_header`] performs a single forward pass over the buffer:
//!
//! 1. format byte, magic and version
//! 2. section declarations until the terminator (or end of input)
//! 3. presence of the code section and the exact total size
//!
//! The first rule that is violated ends the scan with that specific
//! [`EofError`]; no partial header is ever returned. There is no
//! backtracking and no recursion, so the cost is linear in the length of
//! the declarations.
//!
//! # Example
//!
//! ```rust
//! use eofcheck::header::{read_eof1_header, Eof1Container};
//!
//! let code = [0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x02, 0x00, 0x60, 0x00];
//! let header = read_eof1_header(&code)?;
//! assert_eq!(header.code_size(), 2);
//! assert_eq!(header.data_size(), 0);
//!
//! let container = Eof1Container::parse(&code)?;
//! assert_eq!(container.code(), &[0x60, 0x00]);
//! assert!(container.data().is_empty());
//! # Ok::<(), eofcheck::EofError>(())
//! ```

use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::error::{EofError, Result};
use crate::format::{
    has_eof_magic, has_format_byte, SectionKind, EOF1_VERSION, SECTIONS_OFFSET,
    SECTION_DECL_LEN, SECTION_SIZE_LEN, VERSION_OFFSET,
};

/// Section sizes declared by an EOF1 container
///
/// Produced by [`read_eof1_header`] (or the trusted reader in
/// [`crate::validation`]). Fields are read-only; the header is only meant to
/// be used to slice the original buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Eof1Header {
    code_size: u16,
    data_size: u16,
}

impl Eof1Header {
    pub(crate) const fn new(code_size: u16, data_size: u16) -> Self {
        Self {
            code_size,
            data_size,
        }
    }

    /// Size of the code section. Never 0 for a parsed header.
    #[inline]
    pub const fn code_size(&self) -> u16 {
        self.code_size
    }

    /// Size of the data section, 0 when the container has none
    #[inline]
    pub const fn data_size(&self) -> u16 {
        self.data_size
    }

    /// Whether a data section was declared
    #[inline]
    pub const fn has_data_section(&self) -> bool {
        self.data_size != 0
    }

    /// Length of the header: prefix, section declarations and terminator
    pub const fn header_size(&self) -> usize {
        let data_decl = if self.has_data_section() {
            SECTION_DECL_LEN
        } else {
            0
        };
        SECTIONS_OFFSET + SECTION_DECL_LEN + data_decl + 1
    }

    /// Offset of the first code byte
    #[inline]
    pub const fn code_offset(&self) -> usize {
        self.header_size()
    }

    /// Offset of the first data byte (equal to the end of code)
    #[inline]
    pub const fn data_offset(&self) -> usize {
        self.code_offset() + self.code_size as usize
    }

    /// Total length of a container with this header
    #[inline]
    pub const fn container_size(&self) -> usize {
        self.data_offset() + self.data_size as usize
    }

    /// Byte range of the code section
    pub fn code_range(&self) -> Range<usize> {
        self.code_offset()..self.data_offset()
    }

    /// Byte range of the data section (empty when absent)
    pub fn data_range(&self) -> Range<usize> {
        self.data_offset()..self.container_size()
    }

    /// Slice the code section out of `code`
    ///
    /// Returns `None` if `code` is shorter than the declared layout.
    pub fn code_section<'a>(&self, code: &'a [u8]) -> Option<&'a [u8]> {
        code.get(self.code_range())
    }

    /// Slice the data section out of `code`
    ///
    /// Returns an empty slice when no data section is declared, `None` if
    /// `code` is shorter than the declared layout.
    pub fn data_section<'a>(&self, code: &'a [u8]) -> Option<&'a [u8]> {
        code.get(self.data_range())
    }
}

impl fmt::Display for Eof1Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Eof1Header {{ code: {} bytes, data: {} bytes, header: {} bytes }}",
            self.code_size,
            self.data_size,
            self.header_size()
        )
    }
}

/// Read a big-endian section size at `pos`, if two bytes are available
#[inline]
fn read_section_size(code: &[u8], pos: usize) -> Option<u16> {
    match code.get(pos..pos + SECTION_SIZE_LEN)? {
        [hi, lo] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Parse and validate an EOF1 container header
///
/// Accepts any buffer, including an empty one. On success the returned
/// header satisfies `header_size + code_size + data_size == code.len()`.
///
/// # Errors
///
/// Returns the [`EofError`] of the first structural rule that `code`
/// violates.
pub fn read_eof1_header(code: &[u8]) -> Result<Eof1Header> {
    if !has_format_byte(code) {
        return Err(EofError::InvalidFormatByte);
    }
    if !has_eof_magic(code) {
        return Err(EofError::InvalidMagic);
    }
    if code.get(VERSION_OFFSET) != Some(&EOF1_VERSION) {
        return Err(EofError::InvalidVersion);
    }

    let mut pos = SECTIONS_OFFSET;
    let mut code_size: Option<u16> = None;
    let mut data_size: Option<u16> = None;

    while let Some(&kind) = code.get(pos) {
        pos += 1;
        match SectionKind::from_u8(kind) {
            Some(SectionKind::Terminator) => break,
            Some(SectionKind::Code) => {
                if code_size.is_some() {
                    return Err(EofError::MultipleCodeSections);
                }
                let size = read_section_size(code, pos).ok_or(EofError::CodeSectionSizeMissing)?;
                if size == 0 {
                    return Err(EofError::EmptyCodeSection);
                }
                code_size = Some(size);
                pos += SECTION_SIZE_LEN;
            }
            Some(SectionKind::Data) => {
                if code_size.is_none() {
                    return Err(EofError::DataSectionBeforeCodeSection);
                }
                if data_size.is_some() {
                    return Err(EofError::MultipleDataSections);
                }
                let size = read_section_size(code, pos).ok_or(EofError::DataSectionSizeMissing)?;
                if size == 0 {
                    return Err(EofError::EmptyDataSection);
                }
                data_size = Some(size);
                pos += SECTION_SIZE_LEN;
            }
            None => return Err(EofError::UnknownSection),
        }
    }

    let code_size = code_size.ok_or(EofError::CodeSectionMissing)?;
    let data_size = data_size.unwrap_or(0);

    // Trailing or missing bytes are not allowed
    if pos + code_size as usize + data_size as usize != code.len() {
        return Err(EofError::InvalidTotalSize);
    }

    Ok(Eof1Header::new(code_size, data_size))
}

/// A validated EOF1 container borrowed from the caller's buffer
///
/// Can only be obtained through [`Eof1Container::parse`], so holding one is
/// proof that the buffer passed every header check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eof1Container<'a> {
    bytes: &'a [u8],
    header: Eof1Header,
}

impl<'a> Eof1Container<'a> {
    /// Validate `bytes` and wrap it
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let header = read_eof1_header(bytes)?;
        Ok(Self { bytes, header })
    }

    /// The parsed header
    #[inline]
    pub fn header(&self) -> Eof1Header {
        self.header
    }

    /// The whole container
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Code section contents
    #[inline]
    pub fn code(&self) -> &'a [u8] {
        &self.bytes[self.header.code_range()]
    }

    /// Data section contents (empty when absent)
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        &self.bytes[self.header.data_range()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_container() {
        let code = [0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00];
        let header = read_eof1_header(&code).unwrap();
        assert_eq!(header, Eof1Header::new(1, 0));
        assert_eq!(header.header_size(), 8);
        assert_eq!(header.container_size(), code.len());
    }

    #[test]
    fn test_offsets_with_data() {
        let header = Eof1Header::new(2, 4);
        assert!(header.has_data_section());
        assert_eq!(header.header_size(), 11);
        assert_eq!(header.code_range(), 11..13);
        assert_eq!(header.data_range(), 13..17);
        assert_eq!(header.container_size(), 17);
    }

    #[test]
    fn test_offsets_without_data() {
        let header = Eof1Header::new(6, 0);
        assert!(!header.has_data_section());
        assert_eq!(header.header_size(), 8);
        assert_eq!(header.code_range(), 8..14);
        assert!(header.data_range().is_empty());
    }

    #[test]
    fn test_section_slices() {
        let code = [
            0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x02, 0x02, 0x00, 0x01, 0x00, 0x60, 0x00, 0xAA,
        ];
        let header = read_eof1_header(&code).unwrap();
        assert_eq!(header.code_section(&code), Some(&[0x60, 0x00][..]));
        assert_eq!(header.data_section(&code), Some(&[0xAA][..]));

        // A buffer shorter than the declared layout slices to None
        assert_eq!(header.data_section(&code[..12]), None);
    }

    #[test]
    fn test_section_size_read() {
        assert_eq!(read_section_size(&[0x01, 0x02], 0), Some(0x0102));
        assert_eq!(read_section_size(&[0x00, 0x01, 0x02], 1), Some(0x0102));
        assert_eq!(read_section_size(&[0x01], 0), None);
        assert_eq!(read_section_size(&[0x01, 0x02], 2), None);
    }

    #[test]
    fn test_terminator_without_code() {
        // Terminator right after the version
        let code = [0xEF, 0xCA, 0xFE, 0x01, 0x00];
        assert_eq!(read_eof1_header(&code), Err(EofError::CodeSectionMissing));
    }

    #[test]
    fn test_max_code_size() {
        let mut code = vec![0xEF, 0xCA, 0xFE, 0x01, 0x01, 0xFF, 0xFF, 0x00];
        code.resize(code.len() + u16::MAX as usize, 0x5B);
        let header = read_eof1_header(&code).unwrap();
        assert_eq!(header.code_size(), u16::MAX);
        assert_eq!(header.container_size(), code.len());
    }

    #[test]
    fn test_container_view() {
        let code = [
            0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x02, 0x02, 0x00, 0x02, 0x00, 0x60, 0x00, 0xAA,
            0xBB,
        ];
        let container = Eof1Container::parse(&code).unwrap();
        assert_eq!(container.code(), &[0x60, 0x00]);
        assert_eq!(container.data(), &[0xAA, 0xBB]);
        assert_eq!(container.as_bytes().len(), 15);
        assert_eq!(container.header().data_size(), 2);
    }

    #[test]
    fn test_container_rejects_invalid() {
        let code = [0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x02, 0x00, 0x60];
        assert_eq!(
            Eof1Container::parse(&code),
            Err(EofError::InvalidTotalSize)
        );
    }

    #[test]
    fn test_display() {
        let header = Eof1Header::new(2, 1);
        assert_eq!(
            header.to_string(),
            "Eof1Header { code: 2 bytes, data: 1 bytes, header: 11 bytes }"
        );
    }
}
