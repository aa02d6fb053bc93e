//! EOF1 container builder
//!
//! Assembles well-formed containers from section contents. Used by the CLI
//! `build` command and by tests that need valid input.

use crate::error::BuildError;
use crate::format::{SectionKind, EOF1_VERSION, FORMAT_BYTE, MAGIC};

/// Builder for EOF1 containers
///
/// # Example
/// ```
/// use eofcheck::builder::Eof1Builder;
/// use eofcheck::header::read_eof1_header;
///
/// let bytes = Eof1Builder::new(vec![0x60, 0x00])
///     .with_data(vec![0xAA])
///     .build()?;
///
/// let header = read_eof1_header(&bytes)?;
/// assert_eq!(header.code_size(), 2);
/// assert_eq!(header.data_size(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Eof1Builder {
    code: Vec<u8>,
    data: Vec<u8>,
}

impl Eof1Builder {
    /// Create a builder with the given code section contents
    pub fn new(code: impl Into<Vec<u8>>) -> Self {
        Self {
            code: code.into(),
            data: Vec::new(),
        }
    }

    /// Set the data section contents
    ///
    /// Empty data means the container has no data section.
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    fn section_size(section: SectionKind, len: usize) -> Result<[u8; 2], BuildError> {
        u16::try_from(len)
            .map(u16::to_be_bytes)
            .map_err(|_| BuildError::SectionTooLarge {
                section: section.name(),
                len,
            })
    }

    /// Serialize the container
    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        if self.code.is_empty() {
            return Err(BuildError::EmptyCode);
        }
        let code_size = Self::section_size(SectionKind::Code, self.code.len())?;
        let data_size = if self.data.is_empty() {
            None
        } else {
            Some(Self::section_size(SectionKind::Data, self.data.len())?)
        };

        let mut out = Vec::with_capacity(11 + self.code.len() + self.data.len());
        out.push(FORMAT_BYTE);
        out.extend_from_slice(&MAGIC);
        out.push(EOF1_VERSION);

        out.push(SectionKind::Code as u8);
        out.extend_from_slice(&code_size);
        if let Some(size) = data_size {
            out.push(SectionKind::Data as u8);
            out.extend_from_slice(&size);
        }
        out.push(SectionKind::Terminator as u8);

        out.extend_from_slice(&self.code);
        out.extend_from_slice(&self.data);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::read_eof1_header;

    #[test]
    fn test_build_minimal() {
        let bytes = Eof1Builder::new(vec![0x00]).build().unwrap();
        assert_eq!(
            bytes,
            vec![0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_build_with_data() {
        let bytes = Eof1Builder::new(vec![0x60, 0x00])
            .with_data(vec![0xAA, 0xBB, 0xCC, 0xDD])
            .build()
            .unwrap();
        assert_eq!(
            bytes,
            vec![
                0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x02, 0x02, 0x00, 0x04, 0x00, 0x60, 0x00,
                0xAA, 0xBB, 0xCC, 0xDD
            ]
        );
        let header = read_eof1_header(&bytes).unwrap();
        assert_eq!(header.container_size(), bytes.len());
    }

    #[test]
    fn test_empty_data_omits_section() {
        let bytes = Eof1Builder::new(vec![0x60, 0x00])
            .with_data(Vec::new())
            .build()
            .unwrap();
        let header = read_eof1_header(&bytes).unwrap();
        assert!(!header.has_data_section());
    }

    #[test]
    fn test_empty_code_rejected() {
        assert_eq!(Eof1Builder::default().build(), Err(BuildError::EmptyCode));
    }

    #[test]
    fn test_oversized_sections_rejected() {
        let big = vec![0u8; u16::MAX as usize + 1];
        assert_eq!(
            Eof1Builder::new(big.clone()).build(),
            Err(BuildError::SectionTooLarge {
                section: "Code",
                len: big.len()
            })
        );
        assert_eq!(
            Eof1Builder::new(vec![0x00]).with_data(big.clone()).build(),
            Err(BuildError::SectionTooLarge {
                section: "Data",
                len: big.len()
            })
        );
    }
}
