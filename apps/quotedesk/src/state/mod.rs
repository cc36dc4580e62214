//! # State Module
//!
//! Manages application state for the order form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Shell (owner)                              │   │
//! │  │  let config = AppConfig::from_env();                            │   │
//! │  │  let mut session = Session::new();                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │             ┌────────────────┴────────────────┐                        │
//! │             ▼                                 ▼                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │      Session         │          │     AppConfig        │            │
//! │  │                      │          │                      │            │
//! │  │  CatalogState        │          │  catalog_path        │            │
//! │  │  Cart                │          │  store_name          │            │
//! │  │  overall_discount    │          │  currency_symbol     │            │
//! │  │  CustomerDetails     │          │  output_dir          │            │
//! │  └──────────────────────┘          └──────────────────────┘            │
//! │                                                                         │
//! │  Commands borrow the session mutably; config is read-only.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{default_catalog_path, AppConfig, CATALOG_FILE_NAME};
pub use session::{CatalogState, Session};
