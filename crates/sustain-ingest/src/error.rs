//! Error types for the ingestion pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    /// Dropping or declaring a collection failed
    #[error("Provisioning of collection '{collection}' failed: {message}")]
    Provision {
        /// Collection being provisioned
        collection: String,
        /// Store error message
        message: String,
    },

    /// KPI document does not have the expected top-level shape
    #[error("Invalid KPI dataset: {0}")]
    InvalidDataset(String),

    /// One KPI entry is malformed
    #[error("Invalid KPI entry #{index}: field '{field}' {reason}")]
    Validation {
        /// 0-based position in the `kpis` list
        index: usize,
        /// Offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Reading an input file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Source document could not be opened
    #[error("Source document error: {0}")]
    Document(String),

    /// A record insert failed and the loader is configured to abort
    #[error("Insert #{ordinal} into '{collection}' failed: {message}")]
    Insert {
        /// Target collection
        collection: String,
        /// 0-based position of the record in its sequence
        ordinal: usize,
        /// Store error message
        message: String,
    },

    /// Some inserts failed; the run is not successful
    #[error("{failed} of {attempted} inserts failed")]
    PartialLoad {
        /// Failed inserts across both collections
        failed: usize,
        /// Attempted inserts across both collections
        attempted: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        IngestError::JsonParse(e.to_string())
    }
}
