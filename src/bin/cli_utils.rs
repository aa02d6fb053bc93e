use anyhow::{Context, Result};
use eofcheck::file_reader::InputEncoding;

/// Number of bytes shown in section previews
pub const PREVIEW_BYTES: usize = 32;

/// Parse an `--encoding` argument
pub fn parse_encoding(encoding: &str) -> Result<InputEncoding> {
    encoding
        .parse::<InputEncoding>()
        .map_err(anyhow::Error::msg)
}

/// Parse a `-j/--threads` argument; `None`, "auto" and "0" use all cores
pub fn parse_threads(threads: Option<&str>) -> Result<usize> {
    match threads {
        None | Some("auto") | Some("0") => Ok(std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)),
        Some(s) => s.parse::<usize>().with_context(|| {
            format!("Invalid thread count '{}', expected a number or 'auto'", s)
        }),
    }
}

/// Hex-encode `bytes`, truncated to `PREVIEW_BYTES` unless `full` is set
pub fn hex_preview(bytes: &[u8], full: bool) -> String {
    if full || bytes.len() <= PREVIEW_BYTES {
        hex::encode(bytes)
    } else {
        format!(
            "{}... ({} more bytes)",
            hex::encode(&bytes[..PREVIEW_BYTES]),
            bytes.len() - PREVIEW_BYTES
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_preview() {
        assert_eq!(hex_preview(&[0xAA, 0xBB], false), "aabb");
        let long = vec![0x11u8; PREVIEW_BYTES + 3];
        let preview = hex_preview(&long, false);
        assert!(preview.ends_with("... (3 more bytes)"));
        assert_eq!(hex_preview(&long, true).len(), long.len() * 2);
    }

    #[test]
    fn test_parse_threads() {
        assert!(parse_threads(None).unwrap() >= 1);
        assert_eq!(parse_threads(Some("4")).unwrap(), 4);
        assert!(parse_threads(Some("many")).is_err());
    }
}
