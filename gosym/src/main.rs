//! # gosym - Main Entry Point
//!
//! Loads a binary, recovers its Go function symbols and prints them as text
//! or JSON. Exit status is `0` for a complete table, `3` when only a partial
//! table could be recovered (`--allow-partial`), `1` on any other failure and
//! `2` for usage errors (reported by clap).

use anyhow::{Context, Result};
use clap::Parser;
use gosym::cli::Args;
use gosym::export::SymbolReport;
use gosym::loader::load_binary;
use gosym::{extract_symbols, ErrorKind, ParseStage};
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_PARTIAL: i32 = 3;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_PARTIAL,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

/// Returns whether the full table was recovered.
fn run() -> Result<bool> {
    let args = Args::parse();
    let options = args.extract_options();
    let source = args.input.display().to_string();

    let loaded = load_binary(&args.input, args.section.as_deref())?;
    let mut section = loaded.section();
    let mut result = extract_symbols(loaded.bytes(), &options);

    // The usual section may not hold the table; the whole file always does
    if args.section.is_none()
        && section.is_some()
        && matches!(&result, Err(e) if e.kind() == ErrorKind::NotFound)
    {
        info!("No table in section {}, scanning the whole file", section.unwrap_or_default());
        section = None;
        result = extract_symbols(loaded.file_bytes(), &options);
    }

    let (table, failure) = match result {
        Ok(table) => (table, None),
        Err(e) if options.allow_partial && e.stage() == ParseStage::ReadingFunctions => {
            let message = e.error().to_string();
            warn!("Partial table: {} symbols before failure ({message})", e.partial().len());
            (e.into_partial(), Some(message))
        }
        Err(e) => {
            return Err(anyhow::Error::new(e))
                .with_context(|| format!("Failed to recover symbols from {source}"));
        }
    };

    if !args.quiet {
        eprintln!("gosym v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("input: {source}");
        eprintln!("region: {}", section.unwrap_or("whole file"));
        eprintln!("symbols: {}", table.len());
        let mismatches = table.mismatches().count();
        if mismatches > 0 {
            eprintln!("warning: {mismatches} symbols have inconsistent metadata addresses");
        }
    }

    let mut report = SymbolReport::new(&source, section, &table);
    if let Some(ref message) = failure {
        report = report.partial(message);
    }

    match args.output {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            report.write(args.format, BufWriter::new(file))?;
            if !args.quiet {
                eprintln!("output: {}", path.display());
            }
        }
        None => report.write(args.format, std::io::stdout().lock())?,
    }

    Ok(failure.is_none())
}
