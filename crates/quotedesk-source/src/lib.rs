//! # quotedesk-source: Catalog Export Reader for QuoteDesk
//!
//! This crate reads the catalog spreadsheet export and builds the
//! [`Catalog`](quotedesk_core::Catalog) the order form searches.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuoteDesk Data Flow                              │
//! │                                                                         │
//! │  App startup (load catalog)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 quotedesk-source (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    source     │    │     sheet     │    │    loader    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ CatalogSource │───►│ parse_csv     │───►│ load_catalog │  │   │
//! │  │   │ CsvCatalog... │    │ parse_workbook│    │ (logs skips) │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quotedesk-core: Catalog::build(rows, schema)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`source`] - The `CatalogSource` port and its CSV / workbook / in-memory adapters
//! - [`sheet`] - CSV decoding (UTF-8 or Windows-1252) and cell typing
//! - [`workbook`] - First worksheet of an `.xlsx` / `.xls` / `.ods` file
//! - [`loader`] - Build + logging of skipped rows
//! - [`error`] - Source error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quotedesk_core::CatalogSchema;
//! use quotedesk_source::{load_catalog, CsvCatalogSource};
//!
//! let source = CsvCatalogSource::new("catalog.csv");
//! let catalog = load_catalog(&source, &CatalogSchema::default()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;
pub mod sheet;
pub mod source;
pub mod workbook;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SourceError, SourceResult};
pub use loader::load_catalog;
pub use sheet::{decode_export, parse_csv};
pub use source::{
    is_workbook_path, source_for_path, CatalogSource, CsvCatalogSource, StaticSource,
    XlsxCatalogSource,
};
pub use workbook::parse_workbook;
