//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`QUOTEDESK_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization.

use std::path::PathBuf;

use directories::ProjectDirs;
use quotedesk_core::Money;
use serde::{Deserialize, Serialize};

/// Catalog file name looked up in the data directory.
pub const CATALOG_FILE_NAME: &str = "catalog.csv";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Catalog export read at startup
    pub catalog_path: PathBuf,

    /// Store name (document heading)
    pub store_name: String,

    /// Document title (below the heading)
    pub document_title: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Where exported documents are written
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Catalog: `catalog.csv` in the platform data directory
    /// - Store: "QuoteDesk"
    /// - Currency: R$
    /// - Output: working directory
    fn default() -> Self {
        AppConfig {
            catalog_path: default_catalog_path(),
            store_name: "QuoteDesk".to_string(),
            document_title: "Exam Order".to_string(),
            currency_symbol: "R$".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `QUOTEDESK_CATALOG_PATH`: Catalog CSV export or workbook
    /// - `QUOTEDESK_STORE_NAME`: Document heading
    /// - `QUOTEDESK_DOCUMENT_TITLE`: Document title
    /// - `QUOTEDESK_CURRENCY_SYMBOL`: Display prefix for amounts
    /// - `QUOTEDESK_OUTPUT_DIR`: Folder for exported documents
    pub fn from_env() -> Self {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = var("QUOTEDESK_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(store_name) = var("QUOTEDESK_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(title) = var("QUOTEDESK_DOCUMENT_TITLE") {
            config.document_title = title;
        }

        if let Some(symbol) = var("QUOTEDESK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(dir) = var("QUOTEDESK_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config
    }

    /// Formats an amount with the currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123450)), "R$ 1234.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{} {}", self.currency_symbol, Money::zero() - amount)
        } else {
            format!("{} {}", self.currency_symbol, amount)
        }
    }
}

/// `catalog.csv` in the platform data directory.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.quotedesk.QuoteDesk/catalog.csv`
/// - **Windows**: `%APPDATA%\quotedesk\QuoteDesk\data\catalog.csv`
/// - **Linux**: `~/.local/share/quotedesk/catalog.csv`
///
/// Falls back to the working directory when no home directory is known.
pub fn default_catalog_path() -> PathBuf {
    match ProjectDirs::from("com", "quotedesk", "QuoteDesk") {
        Some(dirs) => dirs.data_dir().join(CATALOG_FILE_NAME),
        None => PathBuf::from(CATALOG_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.currency_symbol, "R$");
        assert!(config.catalog_path.ends_with(CATALOG_FILE_NAME));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_env_overrides() {
        let config = config_with(&[
            ("QUOTEDESK_CATALOG_PATH", "/srv/exames.csv"),
            ("QUOTEDESK_STORE_NAME", "BigFarma"),
            ("QUOTEDESK_CURRENCY_SYMBOL", "$"),
            ("QUOTEDESK_OUTPUT_DIR", "/tmp/out"),
        ]);

        assert_eq!(config.catalog_path, PathBuf::from("/srv/exames.csv"));
        assert_eq!(config.store_name, "BigFarma");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = config_with(&[("QUOTEDESK_STORE_NAME", "  ")]);
        assert_eq!(config.store_name, "QuoteDesk");
    }

    #[test]
    fn test_format_currency() {
        let config = config_with(&[]);
        assert_eq!(config.format_currency(Money::from_cents(123450)), "R$ 1234.50");
        assert_eq!(config.format_currency(Money::from_cents(1)), "R$ 0.01");
        assert_eq!(config.format_currency(Money::zero()), "R$ 0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-R$ 12.34");
    }
}
