//! # gosym - Function Symbols from Stripped Go Binaries
//!
//! Stripping a Go executable removes its ELF/PE symbol table and DWARF, but
//! not the runtime's own function table (the **pclntab**), which the runtime
//! needs for stack traces and garbage collection. gosym finds that table in
//! an arbitrary byte buffer and recovers the `(address, name)` pair of every
//! compiled function.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   Input bytes (&[u8])                        │
//! │      section dump, whole executable, or memory image         │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  pclntab                                                     │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐   │
//! │  │ locator  │──▶│  header  │──▶│ functab  │──▶│  names   │   │
//! │  │ (magic)  │   │(versioned│   │ (nfunc × │   │ (meta →  │   │
//! │  │          │   │  layout) │   │  records)│   │  string) │   │
//! │  └──────────┘   └──────────┘   └──────────┘   └──────────┘   │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  symtab: builder (sequential or worker pool) → SymbolTable   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! ### Core
//!
//! - [`pclntab`]: bounds-checked buffer, version layouts, and the four
//!   decoding stages
//! - [`symtab`]: assembles resolved symbols into a [`SymbolTable`]
//! - [`extract`]: the [`extract_symbols`] entry point
//! - [`options`]: [`ExtractOptions`] (name cap, partial results, threads)
//! - [`domain`]: pipeline stages and structured errors
//!
//! ### Tooling
//!
//! - [`loader`]: reads a file and picks the section to scan
//! - [`export`]: text and JSON reports
//! - [`cli`]: command-line argument parsing
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! let data = std::fs::read("server")?;
//! let table = gosym::extract_symbols(&data, &gosym::ExtractOptions::default())?;
//! for symbol in &table {
//!     println!("0x{:x} {}", symbol.address, symbol.name);
//! }
//! ```
//!
//! ## Supported Tables
//!
//! Go 1.16 through current releases (magics `0xfffffffa`, `0xfffffff0`,
//! `0xfffffff1`), little-endian, 32- or 64-bit pointers.

pub mod cli;
pub mod domain;
pub mod export;
pub mod extract;
pub mod loader;
pub mod options;
pub mod pclntab;
pub mod symtab;

pub use domain::{ErrorKind, ExtractError, ParseError, ParseStage};
pub use extract::extract_symbols;
pub use options::ExtractOptions;
pub use symtab::{Symbol, SymbolTable};
