//! Report types produced by the pipeline stages

use crate::error::IngestError;

/// Outcome of schema provisioning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Collections that existed and were deleted
    pub dropped: Vec<String>,

    /// Collections declared fresh
    pub created: Vec<String>,
}

/// One failed record insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// 0-based position of the record in its sequence
    pub ordinal: usize,

    /// Store error message
    pub message: String,
}

/// Outcome of loading one record sequence into one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Target collection
    pub collection: String,

    /// Insert operations attempted
    pub attempted: usize,

    /// Inserts that succeeded
    pub inserted: usize,

    /// Inserts that failed
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Create an empty report for a collection
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    /// Number of failed inserts
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Page accounting for one narrative extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Pages visited
    pub pages_seen: u32,

    /// Pages inside the excluded range
    pub excluded: u32,

    /// Pages whose text extraction failed
    pub unreadable: u32,

    /// Readable pages below the length threshold
    pub too_short: u32,

    /// Passages produced
    pub emitted: u32,
}

/// Everything one pipeline run did
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Schema provisioning outcome
    pub provision: ProvisionReport,

    /// Fact loading outcome
    pub facts: LoadReport,

    /// Passage loading outcome
    pub narrative: LoadReport,

    /// Page accounting
    pub extraction: ExtractStats,

    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Inserts attempted across both collections
    pub fn attempted(&self) -> usize {
        self.facts.attempted + self.narrative.attempted
    }

    /// Inserts failed across both collections
    pub fn failed(&self) -> usize {
        self.facts.failed() + self.narrative.failed()
    }

    /// A run succeeds only if every insert succeeded
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Turn a run with failed inserts into an error
    pub fn into_result(self) -> Result<Self, IngestError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(IngestError::PartialLoad {
                failed: self.failed(),
                attempted: self.attempted(),
            })
        }
    }
}
