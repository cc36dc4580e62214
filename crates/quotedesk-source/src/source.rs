//! # Catalog Sources
//!
//! Where raw catalog rows come from.
//!
//! ## Port & Adapter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_catalog(&source) ──► source.rows().await ──► Catalog::build()    │
//! │                                  │                                      │
//! │          ┌───────────────────────┼───────────────────────┐              │
//! │          ▼                       ▼                       ▼              │
//! │  CsvCatalogSource       XlsxCatalogSource          StaticSource         │
//! │  (CSV export on disk)   (workbook on disk)         (rows in memory)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`source_for_path`] picks the file adapter from the extension.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quotedesk_core::RawRow;
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::sheet::{decode_export, parse_csv};
use crate::workbook::parse_workbook;

/// Extensions read as spreadsheet workbooks; anything else is read as CSV.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Anything that can produce the header row and data rows of a catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All rows, header first.
    async fn rows(&self) -> SourceResult<Vec<RawRow>>;

    /// Human-readable origin, for log lines.
    fn describe(&self) -> String;
}

// =============================================================================
// CSV File
// =============================================================================

/// A CSV export on disk.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvCatalogSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    async fn rows(&self) -> SourceResult<Vec<RawRow>> {
        debug!(path = %self.path.display(), "Reading catalog export");

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SourceError::from_io(&self.path, e))?;

        let (content, encoding) = decode_export(&bytes);
        debug!(encoding = encoding.name(), "Decoded catalog export");
        parse_csv(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Workbook File
// =============================================================================

/// A spreadsheet workbook on disk; the first worksheet holds the catalog.
#[derive(Debug, Clone)]
pub struct XlsxCatalogSource {
    path: PathBuf,
}

impl XlsxCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        XlsxCatalogSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for XlsxCatalogSource {
    async fn rows(&self) -> SourceResult<Vec<RawRow>> {
        debug!(path = %self.path.display(), "Reading catalog workbook");

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SourceError::from_io(&self.path, e))?;

        parse_workbook(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Whether `path` has one of the [`WORKBOOK_EXTENSIONS`] (case-insensitive).
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
        .unwrap_or(false)
}

/// The file adapter for `path`, chosen by extension (case-insensitive).
///
/// ## Example
/// ```rust
/// use quotedesk_source::source_for_path;
///
/// assert_eq!(source_for_path("exames.XLSX").describe(), "exames.XLSX");
/// ```
pub fn source_for_path(path: impl Into<PathBuf>) -> Box<dyn CatalogSource> {
    let path = path.into();
    if is_workbook_path(&path) {
        Box::new(XlsxCatalogSource::new(path))
    } else {
        Box::new(CsvCatalogSource::new(path))
    }
}

// =============================================================================
// In-Memory Rows
// =============================================================================

/// Rows already in memory, e.g. a catalog embedded in the binary.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<RawRow>,
}

impl StaticSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        StaticSource { rows }
    }

    /// Decodes CSV text up front.
    pub fn from_csv(content: &str) -> SourceResult<Self> {
        Ok(StaticSource::new(parse_csv(content)?))
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn rows(&self) -> SourceResult<Vec<RawRow>> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.rows.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_extensions() {
        assert!(is_workbook_path(Path::new("lista.ods")));
        assert!(is_workbook_path(Path::new("exames.xlsx")));
        assert!(is_workbook_path(Path::new("EXAMES.XLS")));
        assert!(!is_workbook_path(Path::new("exames.csv")));
        assert!(!is_workbook_path(Path::new("exames")));
    }
}
