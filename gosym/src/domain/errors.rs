//! Structured error types for gosym
//!
//! Using thiserror for automatic Display implementation and error chaining.

use super::types::ParseStage;
use crate::symtab::SymbolTable;
use thiserror::Error;

/// Failure kinds produced while walking an embedded Go symbol table.
///
/// Every failure is a deterministic function of the input buffer, so none of
/// these are worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No Go symbol table signature found in buffer")]
    NotFound,

    #[error("Read of {len} bytes at offset 0x{offset:x} exceeds buffer length 0x{buffer_len:x}")]
    Truncated { offset: usize, len: usize, buffer_len: usize },

    #[error("Corrupt symbol table: {0}")]
    Corrupt(String),

    #[error("Unsupported symbol table version (magic 0x{magic:08x})")]
    UnsupportedVersion { magic: u32 },
}

/// Field-less discriminant of [`ParseError`], handy for matching and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Truncated,
    Corrupt,
    UnsupportedVersion,
}

impl ParseError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::NotFound => ErrorKind::NotFound,
            ParseError::Truncated { .. } => ErrorKind::Truncated,
            ParseError::Corrupt(_) => ErrorKind::Corrupt,
            ParseError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        ParseError::Corrupt(reason.into())
    }
}

/// Failure of the whole extraction, carrying whatever was resolved before it.
///
/// The partial table is only populated when the caller asked for best-effort
/// output (`ExtractOptions::allow_partial`); otherwise it is empty.
#[derive(Error, Debug)]
#[error("Symbol extraction failed after stage '{stage}': {error}")]
pub struct ExtractError {
    error: ParseError,
    stage: ParseStage,
    partial: SymbolTable,
}

impl ExtractError {
    pub(crate) fn new(error: ParseError, stage: ParseStage) -> Self {
        Self { error, stage, partial: SymbolTable::default() }
    }

    pub(crate) fn with_partial(error: ParseError, stage: ParseStage, partial: SymbolTable) -> Self {
        Self { error, stage, partial }
    }

    /// The first failure encountered.
    #[must_use]
    pub fn error(&self) -> &ParseError {
        &self.error
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Last stage that completed before the failure.
    #[must_use]
    pub fn stage(&self) -> ParseStage {
        self.stage
    }

    /// Symbols resolved before the first failing record.
    #[must_use]
    pub fn partial(&self) -> &SymbolTable {
        &self.partial
    }

    /// Accept the partial table explicitly.
    #[must_use]
    pub fn into_partial(self) -> SymbolTable {
        self.partial
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
