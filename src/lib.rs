//! eofcheck - Strict EOF (EIP-3540) Container Header Validation
//!
//! eofcheck tells structured EOF bytecode containers apart from legacy
//! bytecode and validates EOF1 headers before a VM ever touches the payload.
//! Every offset, section ordering rule and size constraint is enforced
//! exactly: no missing bytes, no trailing bytes, no ambiguous layouts.
//!
//! # Quick Start
//!
//! ```rust
//! use eofcheck::{is_eof_code, read_eof1_header, validate_eof, EofError};
//!
//! let code = [0xEF, 0xCA, 0xFE, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00];
//! assert!(is_eof_code(&code));
//! assert!(validate_eof(&code));
//!
//! let header = read_eof1_header(&code)?;
//! assert_eq!(header.code_size(), 1);
//! assert_eq!(header.data_size(), 0);
//!
//! // Malformed input fails with a specific error kind
//! assert_eq!(read_eof1_header(&code[..8]), Err(EofError::InvalidTotalSize));
//! assert_eq!(read_eof1_header(&[]), Err(EofError::InvalidFormatByte));
//! # Ok::<(), EofError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  format     prefix detection         │  0xEF 0xCA 0xFE
//! ├──────────────────────────────────────┤
//! │  header     single-pass parser       │  -> Eof1Header | EofError
//! ├──────────────────────────────────────┤
//! │  validation facade, trusted reader,  │
//! │             reports                  │
//! └──────────────────────────────────────┘
//! ```
//!
//! All functions are pure and operate on borrowed `&[u8]` buffers, so they
//! can be called from any number of threads without synchronization.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// EOF1 container builder
pub mod builder;
/// Error types for header parsing
pub mod error;
pub mod file_reader;
pub mod format;
pub mod header;
pub mod validation;

// Re-exports for Rust consumers

pub use crate::error::{BuildError, EofError};
pub use crate::format::{has_eof_magic, has_format_byte, is_eof_code, CodeFormat, SectionKind};
pub use crate::header::{read_eof1_header, Eof1Container, Eof1Header};
pub use crate::validation::{
    read_eof1_header_unchecked, validate_code, validate_eof, ValidationReport,
};

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexports_agree() {
        let code = builder::Eof1Builder::new(vec![0x00]).build().unwrap();
        assert!(validate_eof(&code));
        assert_eq!(read_eof1_header_unchecked(&code), read_eof1_header(&code).unwrap());
    }
}
