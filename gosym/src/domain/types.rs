//! Domain types shared across the extraction pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of a single extraction.
///
/// The pipeline only moves forward:
/// `Unstarted → AnchorFound → HeaderDecoded → ReadingFunctions → Complete`.
/// A failure is reported together with the last stage reached, which is
/// how [`ExtractError`](super::ExtractError) encodes the `Failed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    Unstarted,
    AnchorFound,
    HeaderDecoded,
    ReadingFunctions,
    Complete,
}

impl ParseStage {
    /// The stage that follows this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            ParseStage::Unstarted => Some(ParseStage::AnchorFound),
            ParseStage::AnchorFound => Some(ParseStage::HeaderDecoded),
            ParseStage::HeaderDecoded => Some(ParseStage::ReadingFunctions),
            ParseStage::ReadingFunctions => Some(ParseStage::Complete),
            ParseStage::Complete => None,
        }
    }
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseStage::Unstarted => "unstarted",
            ParseStage::AnchorFound => "anchor found",
            ParseStage::HeaderDecoded => "header decoded",
            ParseStage::ReadingFunctions => "reading functions",
            ParseStage::Complete => "complete",
        };
        f.write_str(name)
    }
}
