//! Symbol report export
//!
//! Renders a recovered symbol table as plain text (one symbol per line,
//! `nm`-style) or as a JSON document for other tools.

pub mod symbol_report;

pub use symbol_report::{OutputFormat, SymbolReport};
