//! Extraction options

use serde::{Deserialize, Serialize};

/// Default cap on a single function name.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 4096;

/// Options for [`extract_symbols`](crate::extract_symbols).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Longest name accepted before the table is declared corrupt.
    pub max_name_length: usize,
    /// Keep the symbols resolved before a failure instead of discarding them.
    pub allow_partial: bool,
    /// Resolver threads; `1` resolves inline, `0` uses every available core.
    pub workers: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { max_name_length: DEFAULT_MAX_NAME_LENGTH, allow_partial: false, workers: 1 }
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    #[must_use]
    pub fn with_allow_partial(mut self, allow_partial: bool) -> Self {
        self.allow_partial = allow_partial;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Number of resolver threads to actually start.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        match self.workers {
            0 => std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            n => n,
        }
    }
}
