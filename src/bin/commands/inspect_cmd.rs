use anyhow::{Context, Result};
use eofcheck::file_reader::read_code;
use eofcheck::{CodeFormat, Eof1Container};
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::{hex_preview, parse_encoding};

pub fn cmd_inspect(
    input: PathBuf,
    encoding_str: String,
    json_output: bool,
    full: bool,
) -> Result<()> {
    let encoding = parse_encoding(&encoding_str)?;
    let code = read_code(&input, encoding)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    let format = CodeFormat::detect(&code);
    let container = Eof1Container::parse(&code);

    if json_output {
        let mut output = json!({
            "file": input.display().to_string(),
            "size": code.len(),
            "format": format,
        });
        match &container {
            Ok(container) => {
                let header = container.header();
                output["header"] = json!({
                    "code_size": header.code_size(),
                    "data_size": header.data_size(),
                    "header_size": header.header_size(),
                    "code_offset": header.code_offset(),
                    "data_offset": header.data_offset(),
                });
                output["code"] = json!(hex::encode(container.code()));
                output["data"] = json!(hex::encode(container.data()));
            }
            Err(err) => {
                output["error"] = json!(err);
                output["message"] = json!(err.to_string());
            }
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File:     {}", input.display());
    println!("Size:     {} bytes", code.len());
    println!("Format:   {}", format);

    match container {
        Ok(container) => {
            let header = container.header();
            println!("Version:  1");
            println!();
            println!("Header ({} bytes):", header.header_size());
            println!(
                "  Code section:  {} bytes at offset {}",
                header.code_size(),
                header.code_offset()
            );
            if header.has_data_section() {
                println!(
                    "  Data section:  {} bytes at offset {}",
                    header.data_size(),
                    header.data_offset()
                );
            } else {
                println!("  Data section:  none");
            }
            println!();
            println!("Code: {}", hex_preview(container.code(), full));
            if header.has_data_section() {
                println!("Data: {}", hex_preview(container.data(), full));
            }
        }
        Err(err) if format == CodeFormat::Legacy => {
            log::debug!("Not an EOF container: {}", err);
            println!();
            println!("Code: {}", hex_preview(&code, full));
        }
        Err(err) => {
            println!();
            println!("❌ Malformed EOF container: {}", err);
        }
    }

    Ok(())
}
