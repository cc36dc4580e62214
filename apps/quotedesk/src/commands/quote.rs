//! # Quote Commands
//!
//! Customer block editing and document export.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  export_quote                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteSnapshot::build(cart, overall, customer, today)                  │
//! │       │                 └── empty cart ──► EmptyCart                    │
//! │       ▼                                                                 │
//! │  renderer.render(&snapshot)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write <output_dir>/quote-<id>.html (or the path given)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use quotedesk_core::{CustomerDetails, CustomerField, QuoteSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::render::DocumentRenderer;
use crate::state::Session;

/// Result of a successful export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub quote_id: String,
    pub path: PathBuf,
}

/// Sets one customer field from form text. Blank text clears it.
pub fn set_customer_field(
    session: &mut Session,
    field: &str,
    value: &str,
) -> Result<CustomerDetails, ApiError> {
    debug!(field = %field, "set_customer_field command");

    let field: CustomerField = field.parse()?;
    session.customer.set(field, value)?;
    Ok(session.customer.clone())
}

/// Takes the quote snapshot of the current order.
pub fn build_quote(session: &Session, today: NaiveDate) -> Result<QuoteSnapshot, ApiError> {
    debug!(lines = session.cart.len(), "build_quote command");

    Ok(QuoteSnapshot::build(
        &session.cart,
        session.overall_discount,
        &session.customer,
        today,
    )?)
}

/// Renders the current order and writes it to disk.
///
/// ## Arguments
/// * `target` - explicit file path; defaults to `quote-<id>.<ext>` in `output_dir`
pub fn export_quote(
    session: &Session,
    renderer: &dyn DocumentRenderer,
    output_dir: &Path,
    target: Option<PathBuf>,
    today: NaiveDate,
) -> Result<ExportResponse, ApiError> {
    let snapshot = build_quote(session, today)?;
    let document = renderer.render(&snapshot);

    let short_id = snapshot.id.simple().to_string();
    let path = target.unwrap_or_else(|| {
        output_dir.join(format!("quote-{}.{}", &short_id[..8], renderer.file_extension()))
    });

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ApiError::internal(format!("Could not create {}: {}", parent.display(), e)))?;
    }
    std::fs::write(&path, document)
        .map_err(|e| ApiError::internal(format!("Could not write {}: {}", path.display(), e)))?;

    info!(quote_id = %snapshot.id, path = %path.display(), lines = snapshot.lines.len(), "Quote exported");

    Ok(ExportResponse {
        quote_id: snapshot.id.to_string(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::render::HtmlRenderer;
    use quotedesk_core::{Catalog, CatalogEntry, Money, Percent};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn renderer() -> HtmlRenderer {
        HtmlRenderer {
            store_name: "QuoteDesk".to_string(),
            title: "Exam Order".to_string(),
            currency_symbol: "R$".to_string(),
        }
    }

    fn session_with_line() -> Session {
        let entry = CatalogEntry {
            code: "001".to_string(),
            name: "Hemograma".to_string(),
            price: Money::from_cents(5000),
        };
        let mut session = Session::with_catalog(Catalog::from_entries(vec![entry.clone()]));
        session.cart.add(&entry, 1, Percent::zero()).unwrap();
        session
    }

    #[test]
    fn test_set_customer_field() {
        let mut session = Session::new();

        let customer = set_customer_field(&mut session, "name", "Maria").unwrap();
        assert_eq!(customer.name.as_deref(), Some("Maria"));

        let err = set_customer_field(&mut session, "email", "x@y").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_customer_field(&mut session, "birth", "31/02/1990").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_export_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new();

        let err = export_quote(&session, &renderer(), dir.path(), None, today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with_line();

        let response = export_quote(&session, &renderer(), dir.path(), None, today()).unwrap();

        assert!(response.path.starts_with(dir.path()));
        assert_eq!(response.path.extension().unwrap(), "html");
        let html = std::fs::read_to_string(&response.path).unwrap();
        assert!(html.contains("<td>001</td><td>Hemograma</td>"));
    }

    #[test]
    fn test_export_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("pedido.html");

        let response =
            export_quote(&session_with_line(), &renderer(), dir.path(), Some(target.clone()), today())
                .unwrap();

        assert_eq!(response.path, target);
        assert!(target.exists());
    }
}
