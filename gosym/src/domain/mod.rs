//! Domain model for gosym
//!
//! This module contains the pipeline stage type and the structured errors
//! returned by every parsing component.

pub mod errors;
pub mod types;

pub use types::ParseStage;

pub use errors::{ErrorKind, ExportError, ExtractError, ParseError};
