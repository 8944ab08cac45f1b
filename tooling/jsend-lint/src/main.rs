//! JSend linter CLI
//!
//! Checks JSend documents and builds envelopes from the command line. The
//! envelope is written to stdout; logs go to stderr (`RUST_LOG`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsend::{Envelope, WriterSink};
use jsend_lint::{check_document, emit, parse_data, OutputOptions};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jsend-lint", version)]
#[command(about = "Check and build JSend response envelopes", long_about = None)]
struct Cli {
    /// Pretty-print the envelope
    #[arg(long, global = true, env = "JSEND_PRETTY")]
    pretty: bool,

    /// Print a Content-Type header line before the body
    #[arg(long, global = true, env = "JSEND_HEADERS")]
    headers: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a JSend document and print it in canonical form
    Check {
        /// Path to the document; reads stdin when omitted or `-`
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Skip JSON Schema validation
        #[arg(long)]
        no_schema: bool,
    },
    /// Build a success envelope
    Success {
        /// Payload as JSON
        #[arg(long)]
        data: Option<String>,
    },
    /// Build a fail envelope
    Fail {
        /// Payload as JSON
        #[arg(long)]
        data: Option<String>,
    },
    /// Build an error envelope
    Error {
        #[arg(long)]
        message: String,

        /// Numeric error code
        #[arg(long, allow_negative_numbers = true)]
        code: Option<i64>,

        /// Payload as JSON
        #[arg(long)]
        data: Option<String>,
    },
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let envelope = match cli.command {
        Commands::Check { file, no_schema } => {
            let input = read_input(file.as_ref())?;
            check_document(&input, !no_schema)?
        }
        Commands::Success { data } => Envelope::success(parse_data(data.as_deref())?),
        Commands::Fail { data } => Envelope::fail(parse_data(data.as_deref())?),
        Commands::Error {
            message,
            code,
            data,
        } => Envelope::error(message, code, parse_data(data.as_deref())?),
    };

    let mut sink = WriterSink::new(io::stdout().lock()).with_headers(cli.headers);
    emit(
        &envelope,
        &mut sink,
        OutputOptions { pretty: cli.pretty },
    )?;
    println!();
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.to_str() != Some("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}
