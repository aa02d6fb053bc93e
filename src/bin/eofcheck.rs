mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_build, cmd_inspect, cmd_validate};

#[derive(Parser)]
#[command(name = "eofcheck")]
#[command(
    about = "Validate and inspect EOF (EIP-3540) bytecode containers",
    long_about = "eofcheck - Strict validator for EOF (EIP-3540) bytecode container headers\n\n\
    Distinguishes EOF containers (0xEF 0xCA 0xFE prefix) from legacy bytecode and\n\
    checks the version 1 header: section ordering, section sizes and exact total length.\n\n\
    Inputs may be raw bytes or hex text (optionally 0x-prefixed), plain or .gz compressed.\n\n\
    Examples:\n\
      eofcheck validate contract.hex\n\
      eofcheck validate build/*.bin --encoding binary --json\n\
      eofcheck inspect contract.hex --full\n\
      eofcheck build --code 6000 --data aabb -o contract.hex"
)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more bytecode files
    Validate {
        /// Bytecode files to validate, or "-" for stdin
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Input encoding: auto (default), hex, or binary
        #[arg(short, long, default_value = "auto")]
        encoding: String,

        /// Treat legacy (non-EOF) bytecode as passing
        #[arg(long)]
        allow_legacy: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Number of worker threads (default: auto)
        #[arg(short = 'j', long)]
        threads: Option<String>,
    },

    /// Inspect the header and sections of a bytecode file
    Inspect {
        /// Bytecode file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Input encoding: auto (default), hex, or binary
        #[arg(short, long, default_value = "auto")]
        encoding: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show full section contents instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Build an EOF1 container from hex-encoded sections
    Build {
        /// Code section contents (hex)
        #[arg(short, long, value_name = "HEX")]
        code: String,

        /// Data section contents (hex, omitted if empty)
        #[arg(short, long, value_name = "HEX")]
        data: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write raw bytes instead of hex text
        #[arg(long)]
        binary: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Validate {
            inputs,
            encoding,
            allow_legacy,
            json,
            threads,
        } => cmd_validate(inputs, encoding, allow_legacy, json, threads),
        Commands::Inspect {
            input,
            encoding,
            json,
            full,
        } => cmd_inspect(input, encoding, json, full),
        Commands::Build {
            code,
            data,
            output,
            binary,
        } => cmd_build(code, data, output, binary),
    }
}
