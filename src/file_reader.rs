//! Reading bytecode from files, stdin and gzip archives
//!
//! Bytecode is commonly stored either as raw bytes or as hex text (with or
//! without a `0x` prefix). This module loads both, decompressing `.gz` files
//! on the fly.
//!
//! # Example
//!
//! ```rust,no_run
//! use eofcheck::file_reader::{read_code, InputEncoding};
//!
//! // Hex text or raw bytes, detected from the file name and content
//! let code = read_code("contract.hex", InputEncoding::Auto)?;
//!
//! // Compressed hex text
//! let code = read_code("contract.hex.gz", InputEncoding::Hex)?;
//!
//! // Stdin
//! let code = read_code("-", InputEncoding::Binary)?;
//! # Ok::<(), std::io::Error>(())
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Buffer size for file reading (64KB, one maximum-size section)
const BUFFER_SIZE: usize = 64 * 1024;

/// How input bytes are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
    /// Hex when the input is marked as text (`.hex`/`.txt` file, `0x`
    /// prefix or trailing newline) and decodes cleanly, raw bytes otherwise
    #[default]
    Auto,
    /// Hex text, optional `0x` prefix, whitespace ignored
    Hex,
    /// Raw bytes
    Binary,
}

impl FromStr for InputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InputEncoding::Auto),
            "hex" => Ok(InputEncoding::Hex),
            "binary" | "bin" | "raw" => Ok(InputEncoding::Binary),
            _ => Err(format!(
                "Invalid encoding: '{}'. Must be: auto, hex, or binary",
                s
            )),
        }
    }
}

/// Open a reader with automatic gzip detection based on file extension
///
/// Files ending in `.gz` (case-insensitive) are decompressed. The path "-"
/// reads from stdin.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn Read + Send>> {
    let path = path.as_ref();

    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let file = File::open(path)?;

    let is_gzip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gzip {
        log::debug!("Decompressing {}", path.display());
        Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            GzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}

/// Strip whitespace and an optional `0x` prefix from hex text
fn normalize_hex(raw: &[u8]) -> Vec<u8> {
    let digits: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    match digits.as_slice() {
        [b'0', b'x' | b'X', rest @ ..] => rest.to_vec(),
        _ => digits,
    }
}

/// Extensions that mark a file as hex text (also under `.gz`)
const HEX_EXTENSIONS: [&str; 2] = ["hex", "txt"];

/// True if the file name marks the input as hex text
fn has_hex_extension(path: &Path) -> bool {
    let mut name = Path::new(path.file_name().unwrap_or_default());
    if name
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    {
        name = Path::new(name.file_stem().unwrap_or_default());
    }
    name.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HEX_EXTENSIONS.iter().any(|h| ext.eq_ignore_ascii_case(h)))
}

/// True if the content itself marks the input as hex text
///
/// Raw bytecode can consist entirely of bytes that happen to be ASCII hex
/// digits (0x30-0x39 and 0x61-0x66 are opcodes), so digits alone are not
/// enough: a `0x` prefix or a trailing newline is required.
fn has_hex_marker(raw: &[u8]) -> bool {
    let trimmed = raw.trim_ascii_start();
    matches!(trimmed, [b'0', b'x' | b'X', ..]) || raw.last() == Some(&b'\n')
}

/// Decode hex text into bytes
pub fn decode_hex(raw: &[u8]) -> io::Result<Vec<u8>> {
    hex::decode(normalize_hex(raw))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid hex: {}", e)))
}

/// Decode `raw` as hex if `is_text`, keeping the raw bytes when that fails
fn decode_auto(raw: Vec<u8>, is_text: bool) -> Vec<u8> {
    if !is_text {
        return raw;
    }
    match decode_hex(&raw) {
        Ok(code) => {
            log::debug!("Input detected as hex text ({} chars)", raw.len());
            code
        }
        Err(e) => {
            log::debug!("Not hex text ({}), using raw bytes", e);
            raw
        }
    }
}

/// Interpret already-loaded input according to `encoding`
///
/// With [`InputEncoding::Auto`] only content markers are considered (a `0x`
/// prefix or a trailing newline); [`read_code`] also honours the file name.
pub fn decode_input(raw: Vec<u8>, encoding: InputEncoding) -> io::Result<Vec<u8>> {
    match encoding {
        InputEncoding::Binary => Ok(raw),
        InputEncoding::Hex => decode_hex(&raw),
        InputEncoding::Auto => {
            let is_text = has_hex_marker(&raw);
            Ok(decode_auto(raw, is_text))
        }
    }
}

/// Read a whole input into memory and decode it
///
/// # Errors
///
/// Returns an error if:
/// - The file doesn't exist or can't be read
/// - Invalid gzip data (for .gz files)
/// - Invalid hex text when `encoding` is [`InputEncoding::Hex`]
pub fn read_code<P: AsRef<Path>>(path: P, encoding: InputEncoding) -> io::Result<Vec<u8>> {
    let mut raw = Vec::new();
    open(path.as_ref())?.read_to_end(&mut raw)?;
    log::debug!("Read {} bytes from {}", raw.len(), path.as_ref().display());
    match encoding {
        InputEncoding::Auto => {
            let is_text = has_hex_extension(path.as_ref()) || has_hex_marker(&raw);
            Ok(decode_auto(raw, is_text))
        }
        _ => decode_input(raw, encoding),
    }
}
