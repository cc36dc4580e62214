//! # Source Error Types
//!
//! Error types for reading the catalog export.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error / calamine::Error / CoreError             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SourceError (this module) ← Adds the path where it helps              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in the app) ← Shown inline, session stays usable            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use quotedesk_core::CoreError;
use thiserror::Error;

/// Catalog source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The export file does not exist.
    #[error("Catalog file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The export file exists but could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid CSV (bad quoting).
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The file is not a readable spreadsheet workbook.
    #[error("Invalid workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook has no worksheet to read.
    #[error("Workbook has no worksheets")]
    EmptyWorkbook,

    /// The rows were read but do not form a catalog.
    #[error(transparent)]
    Catalog(#[from] CoreError),
}

impl SourceError {
    /// Maps a file read failure, keeping the path for the common case.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound { path: path.into() }
        } else {
            SourceError::Io(err)
        }
    }
}

/// Result type for catalog source operations.
pub type SourceResult<T> = Result<T, SourceError>;
