//! Error types for mission operations.

use std::path::PathBuf;

/// Result type for mission operations
pub type MissionResult<T> = Result<T, MissionError>;

/// Error type for catalog lookups, table mutations and import/export.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("Block not found in catalog: {0}")]
    NotFound(String),

    #[error("Block already present in mission: {0}")]
    DuplicateBlock(String),

    #[error("Index {index} out of range for a mission of {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Missing columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Export error: {0}")]
    Export(String),
}

/// Failure to read or parse an imported mission file.
///
/// The table is never touched when one of these is raised.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected data layout: {0}")]
    Shape(String),

    #[error("No columns to parse from file")]
    Empty,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MissionError {
    /// Whether this error is a recoverable user mistake rather than bad
    /// input or a caller bug.
    pub fn is_user_warning(&self) -> bool {
        matches!(self, MissionError::DuplicateBlock(_))
    }
}
