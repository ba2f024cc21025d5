//! # Go pclntab Decoding
//!
//! The Go runtime embeds a function table (the **pclntab**) in every binary
//! so that it can print stack traces and run the garbage collector. Stripping
//! a Go binary (`-ldflags="-s -w"`) removes the ELF/PE symbol tables and DWARF,
//! but the pclntab must survive: the runtime itself reads it. This module
//! recovers `(address, name)` pairs from it.
//!
//! ## Finding the Table
//!
//! Each toolchain generation starts the table with a distinct magic:
//!
//! ```text
//! fa ff ff ff 00 00 01 08   Go 1.16, pad 0, quantum 1 (x86), 8-byte pointers
//! f0 ff ff ff 00 00 04 08   Go 1.18, quantum 4 (arm64)
//! f1 ff ff ff 00 00 01 04   Go 1.20, 4-byte pointers
//! ```
//!
//! The locator needs no section boundaries: it searches the whole buffer, so
//! a `.gopclntab` section, a PIE's `.data.rel.ro`, a PE `.rdata` or the entire
//! file all work.
//!
//! ## Walking the Table
//!
//! ```text
//! 1. locate      buffer            → Anchor { offset, version }
//! 2. decode      buffer + anchor   → Header { nfunc, funcnameOffset, pclnOffset, ... }
//! 3. functab     header            → FunctionDescriptor { address, meta_offset } × nfunc
//! 4. names       descriptor        → metadata record → name index → "main.main"
//! ```
//!
//! Each stage is a pure function of the buffer and the previous stage's
//! value, and each can be tested on its own.
//!
//! ## Bounds
//!
//! All reads go through [`Buffer`]. Offsets read from the table are checked
//! before use, name scans are capped, and nothing is ever zero-filled or
//! skipped: a bad record stops the walk with a typed error.
//!
//! ## Module Structure
//!
//! - **`buffer`**: bounds-checked little-endian reads
//! - **`version`**: magic values and per-version layouts
//! - **`locator`**: signature search
//! - **`header`**: fixed-size header decoding and validation
//! - **`functab`**: descriptor records
//! - **`names`**: metadata records and name strings
//!
//! ## Limitations
//!
//! - Tables older than Go 1.16 are recognized but rejected
//! - Big-endian targets are not supported
//! - Line tables, file tables and inlining data are not decoded

pub mod buffer;
pub mod functab;
pub mod header;
pub mod locator;
pub mod names;
pub mod version;

#[cfg(test)]
pub(crate) mod fixture;

pub use buffer::Buffer;
pub use functab::{Descriptors, FunctionDescriptor, FunctionTable, PartialDescriptors};
pub use header::Header;
pub use locator::{candidates, locate, Anchor};
pub use names::{FunctionMeta, NameResolver, ResolvedName};
pub use version::FormatVersion;
