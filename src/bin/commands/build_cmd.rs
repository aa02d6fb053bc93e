use anyhow::{Context, Result};
use eofcheck::builder::Eof1Builder;
use eofcheck::file_reader::decode_hex;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub fn cmd_build(
    code_hex: String,
    data_hex: Option<String>,
    output: Option<PathBuf>,
    binary: bool,
) -> Result<()> {
    let code = decode_hex(code_hex.as_bytes()).context("Invalid --code")?;
    let data = match data_hex {
        Some(data_hex) => decode_hex(data_hex.as_bytes()).context("Invalid --data")?,
        None => Vec::new(),
    };

    let container = Eof1Builder::new(code).with_data(data).build()?;
    log::info!("Built EOF1 container of {} bytes", container.len());

    let bytes = if binary {
        container
    } else {
        let mut text = hex::encode(&container).into_bytes();
        text.push(b'\n');
        text
    };

    match output {
        Some(path) => {
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
