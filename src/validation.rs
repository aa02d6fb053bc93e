//! Validation entry points for untrusted bytecode
//!
//! Three ways to get at an EOF1 header, depending on what the caller already
//! knows about the buffer:
//!
//! - [`validate_eof`]: yes/no answer, same checks as the parser
//! - [`validate_code`]: a [`ValidationReport`] with format, header and error
//! - [`read_eof1_header_unchecked`]: fixed-offset fast path for buffers that
//!   have already been validated
//!
//! # Usage
//!
//! ```rust
//! use eofcheck::validation::{read_eof1_header_unchecked, validate_eof};
//!
//! let code = [0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00];
//! if validate_eof(&code) {
//!     // Already paid for validation; skip it on the hot path
//!     let header = read_eof1_header_unchecked(&code);
//!     assert_eq!(header.code_size(), 1);
//! }
//! ```

use serde::Serialize;
use zerocopy::FromBytes;

use crate::error::EofError;
use crate::format::{CodeFormat, Eof1Prefix, SectionKind};
use crate::header::{read_eof1_header, Eof1Header};

/// Returns true if `code` is a well-formed EOF1 container
///
/// Equivalent to `read_eof1_header(code).is_ok()`.
#[inline]
pub fn validate_eof(code: &[u8]) -> bool {
    read_eof1_header(code).is_ok()
}

/// Read the header of an already validated EOF1 container
///
/// Skips every structural check and reads the sizes from their fixed
/// offsets. Only call this on buffers that passed [`read_eof1_header`] or
/// [`validate_eof`]; for anything else the result is meaningless.
///
/// # Panics
///
/// Panics if `code` is too short to hold the fixed header prefix, or if it
/// declares a data section whose size bytes are missing. Such buffers can
/// never have passed validation.
pub fn read_eof1_header_unchecked(code: &[u8]) -> Eof1Header {
    let Ok((prefix, rest)) = Eof1Prefix::ref_from_prefix(code) else {
        panic!(
            "read_eof1_header_unchecked called on {} bytes, which cannot be a validated container",
            code.len()
        );
    };

    let code_size = prefix.code_size.get();
    let data_size = if prefix.next_kind == SectionKind::Data as u8 {
        u16::from_be_bytes([rest[0], rest[1]])
    } else {
        0
    };

    Eof1Header::new(code_size, data_size)
}

/// Outcome of validating one buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Length of the validated buffer
    pub size: usize,
    /// Prefix classification
    pub format: CodeFormat,
    /// Parsed header, present when validation passed
    pub header: Option<Eof1Header>,
    /// First violated rule, present when validation failed
    pub error: Option<EofError>,
}

impl ValidationReport {
    /// True if the buffer is a well-formed EOF1 container
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// True if the buffer is not EOF at all
    pub fn is_legacy(&self) -> bool {
        self.format == CodeFormat::Legacy
    }

    /// One-line summary for human-readable output
    pub fn summary(&self) -> String {
        match (&self.header, &self.error) {
            (Some(header), _) => format!(
                "EOF1 container, {} bytes (code: {}, data: {})",
                self.size,
                header.code_size(),
                header.data_size()
            ),
            (None, Some(err)) if self.is_legacy() => {
                format!("legacy code, {} bytes ({})", self.size, err)
            }
            (None, Some(err)) => format!("malformed EOF, {} bytes: {}", self.size, err),
            (None, None) => format!("{} bytes", self.size),
        }
    }
}

/// Validate `code` and collect the result into a report
pub fn validate_code(code: &[u8]) -> ValidationReport {
    let (header, error) = match read_eof1_header(code) {
        Ok(header) => (Some(header), None),
        Err(err) => (None, Some(err)),
    };
    ValidationReport {
        size: code.len(),
        format: CodeFormat::detect(code),
        header,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: [u8; 9] = [0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00];
    const WITH_DATA: [u8; 17] = [
        0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x02, 0x02, 0x00, 0x04, 0x00, 0x60, 0x00, 0xAA, 0xBB,
        0xCC, 0xDD,
    ];

    #[test]
    fn test_validate_eof() {
        assert!(validate_eof(&MINIMAL));
        assert!(validate_eof(&WITH_DATA));
        assert!(!validate_eof(&[]));
        assert!(!validate_eof(&MINIMAL[..8]));
    }

    #[test]
    fn test_unchecked_matches_parser() {
        for code in [&MINIMAL[..], &WITH_DATA[..]] {
            assert_eq!(
                read_eof1_header_unchecked(code),
                read_eof1_header(code).unwrap()
            );
        }
    }

    #[test]
    #[should_panic(expected = "cannot be a validated container")]
    fn test_unchecked_short_buffer_panics() {
        read_eof1_header_unchecked(&[0xEF, 0xCA, 0xFE]);
    }

    #[test]
    #[should_panic]
    fn test_unchecked_truncated_data_size_panics() {
        // Declares a data section but stops before its size
        read_eof1_header_unchecked(&[0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x02, 0x02]);
    }

    #[test]
    fn test_report_valid() {
        let report = validate_code(&WITH_DATA);
        assert!(report.is_valid());
        assert!(!report.is_legacy());
        assert_eq!(report.size, 17);
        let header = report.header.unwrap();
        assert_eq!((header.code_size(), header.data_size()), (2, 4));
        assert_eq!(
            report.summary(),
            "EOF1 container, 17 bytes (code: 2, data: 4)"
        );
    }

    #[test]
    fn test_report_legacy() {
        let report = validate_code(&[0x60, 0x00, 0x60, 0x00]);
        assert!(!report.is_valid());
        assert!(report.is_legacy());
        assert_eq!(report.error, Some(EofError::InvalidFormatByte));
        assert!(report.summary().starts_with("legacy code, 4 bytes"));
    }

    #[test]
    fn test_report_malformed() {
        let report = validate_code(&[0xEF, 0xCA, 0xFE, 0x02]);
        assert!(!report.is_valid());
        assert_eq!(report.format, CodeFormat::Eof);
        assert_eq!(report.error, Some(EofError::InvalidVersion));
        assert!(report.header.is_none());
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(validate_code(&MINIMAL)).unwrap();
        assert_eq!(json["format"], "Eof");
        assert_eq!(json["header"]["code_size"], 1);
        assert!(json["error"].is_null());
    }
}
