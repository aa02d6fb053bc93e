use anyhow::{Context, Result};
use eofcheck::file_reader::read_code;
use eofcheck::validation::{validate_code, ValidationReport};
use rayon::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli_utils::{parse_encoding, parse_threads};

/// Validation outcome for a single input
struct InputResult {
    input: PathBuf,
    /// Report, or the read error if the input could not be loaded
    outcome: Result<ValidationReport, String>,
}

impl InputResult {
    fn passed(&self, allow_legacy: bool) -> bool {
        match &self.outcome {
            Ok(report) => report.is_valid() || (allow_legacy && report.is_legacy()),
            Err(_) => false,
        }
    }

    fn summary(&self) -> String {
        match &self.outcome {
            Ok(report) => report.summary(),
            Err(err) => err.clone(),
        }
    }
}

pub fn cmd_validate(
    inputs: Vec<PathBuf>,
    encoding_str: String,
    allow_legacy: bool,
    json_output: bool,
    threads: Option<String>,
) -> Result<()> {
    let encoding = parse_encoding(&encoding_str)?;
    let num_threads = parse_threads(threads.as_deref())?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .context("Failed to create worker pool")?;

    log::debug!(
        "Validating {} input(s) with {} thread(s), encoding {:?}",
        inputs.len(),
        num_threads,
        encoding
    );

    // Unreadable inputs are reported as failures alongside the rest
    let start = Instant::now();
    let results: Vec<InputResult> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let outcome = read_code(input, encoding)
                    .map(|code| validate_code(&code))
                    .map_err(|e| {
                        log::warn!("Failed to read {}: {}", input.display(), e);
                        format!("Failed to read: {}", e)
                    });
                InputResult {
                    input: input.clone(),
                    outcome,
                }
            })
            .collect()
    });
    let duration = start.elapsed();

    let failed = results.iter().filter(|r| !r.passed(allow_legacy)).count();

    if json_output {
        let entries: Vec<_> = results
            .iter()
            .map(|r| {
                let mut entry = json!({
                    "input": r.input.display().to_string(),
                    "passed": r.passed(allow_legacy),
                });
                match &r.outcome {
                    Ok(report) => entry["report"] = json!(report),
                    Err(err) => entry["error"] = json!(err),
                }
                entry
            })
            .collect();
        let output = json!({
            "allow_legacy": allow_legacy,
            "duration_ms": duration.as_millis(),
            "failed": failed,
            "results": entries,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for r in &results {
            let mark = if r.passed(allow_legacy) { "✅" } else { "❌" };
            println!("{} {}: {}", mark, r.input.display(), r.summary());
        }
        println!();
        if failed == 0 {
            println!("✅ VALIDATION PASSED ({} input(s))", results.len());
        } else {
            println!(
                "❌ VALIDATION FAILED ({} of {} input(s))",
                failed,
                results.len()
            );
        }
    }

    // Exit with appropriate code
    if failed == 0 {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
