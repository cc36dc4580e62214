//! # Catalog Commands
//!
//! Loading the catalog, picker suggestions and the live price preview.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Entry Lookup Flow                                    │
//! │                                                                         │
//! │  User types "hemo" / "Hemograma" / picks "001 - Hemograma"             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  session.catalog()? ──► CatalogUnavailable (not loaded / failed)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_query() ──► ValidationError (blank)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.resolve(query) ──► None ──► NotFound                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogEntry + MatchTier                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quotedesk_core::validation::validate_query;
use quotedesk_core::{normalize, CatalogEntry, CatalogSchema, CoreError, MatchTier, Money};
use quotedesk_source::{source_for_path, CatalogSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::state::{AppConfig, Session};

/// Default number of picker suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 20;

/// Outcome of a catalog load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub source: String,
    pub entries: usize,
}

/// Price preview for the entry a query resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePreview {
    pub code: String,
    pub name: String,
    pub label: String,
    pub price: Money,
    pub tier: MatchTier,
}

/// Loads the catalog file named in the configuration.
///
/// `.xlsx` / `.xls` / `.ods` files are read as workbooks, anything else as CSV.
pub async fn load_catalog(session: &mut Session, config: &AppConfig) -> Result<CatalogSummary, ApiError> {
    let source = source_for_path(&config.catalog_path);
    load_catalog_from(session, source.as_ref()).await
}

/// Loads the catalog from any source.
///
/// On failure the session's catalog is marked failed; the cart keeps working
/// as an empty form.
pub async fn load_catalog_from<S>(session: &mut Session, source: &S) -> Result<CatalogSummary, ApiError>
where
    S: CatalogSource + ?Sized,
{
    debug!(source = %source.describe(), "load_catalog command");

    match quotedesk_source::load_catalog(source, &CatalogSchema::default()).await {
        Ok(catalog) => {
            let summary = CatalogSummary {
                source: source.describe(),
                entries: catalog.len(),
            };
            session.set_catalog(catalog);
            info!(entries = summary.entries, "Catalog ready");
            Ok(summary)
        }
        Err(e) => {
            error!(error = %e, "Catalog unavailable, continuing with an empty form");
            session.mark_catalog_failed(e.to_string());
            Err(ApiError::from(e))
        }
    }
}

/// Resolves a query to a catalog entry.
pub fn resolve_entry(session: &Session, query: &str) -> Result<(CatalogEntry, MatchTier), ApiError> {
    let catalog = session.catalog()?;
    let query = validate_query(query)?;

    let found = catalog.resolve(query).ok_or_else(|| CoreError::NotFound {
        query: query.to_string(),
    })?;

    debug!(query = %query, code = %found.entry.code, tier = ?found.tier, "Query resolved");
    Ok((found.entry.clone(), found.tier))
}

/// Live price preview while the user types.
pub fn preview_price(session: &Session, query: &str) -> Result<PricePreview, ApiError> {
    debug!(query = %query, "preview_price command");

    let (entry, tier) = resolve_entry(session, query)?;
    Ok(PricePreview {
        label: entry.label(),
        code: entry.code,
        name: entry.name,
        price: entry.price,
        tier,
    })
}

/// Picker labels containing `query` (accent/case-insensitive), in catalog order.
///
/// A blank query lists the first `limit` labels.
pub fn suggest(session: &Session, query: &str, limit: usize) -> Result<Vec<String>, ApiError> {
    debug!(query = %query, limit = limit, "suggest command");

    let catalog = session.catalog()?;
    let wanted = normalize(query);

    Ok(catalog
        .suggestions()
        .into_iter()
        .filter(|label| wanted.is_empty() || normalize(label).contains(&wanted))
        .take(limit)
        .collect())
}
