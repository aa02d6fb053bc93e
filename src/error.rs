/// Error types for the eofcheck library
use serde::Serialize;
use std::fmt;

/// Result type alias for header parsing
pub type Result<T> = std::result::Result<T, EofError>;

/// Reasons an EOF1 container header is rejected
///
/// The set is closed: every malformed input maps to exactly one of these
/// kinds, and parsing stops at the first rule that is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EofError {
    /// Input is empty or does not start with the 0xEF format byte
    InvalidFormatByte,
    /// Magic bytes after the format byte are missing or not 0xCAFE
    InvalidMagic,
    /// Version byte is missing or not a supported version
    InvalidVersion,
    /// No code section was declared
    CodeSectionMissing,
    /// Code section kind is not followed by a two-byte size
    CodeSectionSizeMissing,
    /// More than one code section was declared
    MultipleCodeSections,
    /// Code section declared with size 0
    EmptyCodeSection,
    /// Data section declared before the code section
    DataSectionBeforeCodeSection,
    /// Data section kind is not followed by a two-byte size
    DataSectionSizeMissing,
    /// More than one data section was declared
    MultipleDataSections,
    /// Data section declared with size 0
    EmptyDataSection,
    /// Section kind byte is not terminator, code or data
    UnknownSection,
    /// Declared section sizes do not add up to the buffer length
    InvalidTotalSize,
}

impl EofError {
    /// All error kinds, in the order the parser checks for them
    pub const ALL: [EofError; 13] = [
        EofError::InvalidFormatByte,
        EofError::InvalidMagic,
        EofError::InvalidVersion,
        EofError::CodeSectionMissing,
        EofError::CodeSectionSizeMissing,
        EofError::MultipleCodeSections,
        EofError::EmptyCodeSection,
        EofError::DataSectionBeforeCodeSection,
        EofError::DataSectionSizeMissing,
        EofError::MultipleDataSections,
        EofError::EmptyDataSection,
        EofError::UnknownSection,
        EofError::InvalidTotalSize,
    ];

    /// True for the errors that mean "this is not EOF at all" (legacy code)
    pub fn is_legacy(self) -> bool {
        matches!(self, EofError::InvalidFormatByte | EofError::InvalidMagic)
    }
}

impl fmt::Display for EofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EofError::InvalidFormatByte => "invalid format byte",
            EofError::InvalidMagic => "invalid magic",
            EofError::InvalidVersion => "invalid version",
            EofError::CodeSectionMissing => "no code section",
            EofError::CodeSectionSizeMissing => "code section size missing",
            EofError::MultipleCodeSections => "multiple code sections",
            EofError::EmptyCodeSection => "empty code section",
            EofError::DataSectionBeforeCodeSection => "data section before code section",
            EofError::DataSectionSizeMissing => "data section size missing",
            EofError::MultipleDataSections => "multiple data sections",
            EofError::EmptyDataSection => "empty data section",
            EofError::UnknownSection => "unknown section id",
            EofError::InvalidTotalSize => "invalid total size",
        };
        write!(f, "EOF1 header error: {}", msg)
    }
}

impl std::error::Error for EofError {}

/// Errors from assembling a container with [`crate::builder::Eof1Builder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A container needs at least one byte of code
    EmptyCode,
    /// Section contents do not fit in the two-byte size field
    SectionTooLarge {
        /// Section name
        section: &'static str,
        /// Length of the rejected contents
        len: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyCode => write!(f, "Code section must not be empty"),
            BuildError::SectionTooLarge { section, len } => write!(
                f,
                "{} section too large: {} bytes (max {})",
                section,
                len,
                u16::MAX
            ),
        }
    }
}

impl std::error::Error for BuildError {}
