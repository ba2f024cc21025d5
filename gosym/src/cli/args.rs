//! CLI argument definitions

use crate::export::OutputFormat;
use crate::options::{ExtractOptions, DEFAULT_MAX_NAME_LENGTH};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gosym",
    about = "Recover function symbols from stripped Go binaries",
    after_help = "\
EXAMPLES:
    gosym ./server                           Scan the usual section, print symbols
    gosym ./server --format json -o syms.json
    gosym dump.bin --allow-partial           Keep what resolves from a damaged table
    gosym app.exe --section .rdata --jobs 0  Explicit section, all cores"
)]
pub struct Args {
    /// Executable, section dump, or memory image to scan
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Section to scan (default: .gopclntab, .data.rel.ro, .rdata, or the whole file)
    #[arg(short, long)]
    pub section: Option<String>,

    /// Longest function name accepted before the table is treated as corrupt
    #[arg(long, default_value_t = DEFAULT_MAX_NAME_LENGTH)]
    pub max_name_length: usize,

    /// Print the symbols resolved before a failure instead of nothing
    #[arg(long)]
    pub allow_partial: bool,

    /// Resolver threads (0 = all cores)
    #[arg(short, long, default_value = "1")]
    pub jobs: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::default()
            .with_max_name_length(self.max_name_length)
            .with_allow_partial(self.allow_partial)
            .with_workers(self.jobs)
    }
}
