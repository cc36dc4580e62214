//! # Session State
//!
//! Everything the order form holds between commands.
//!
//! ## Catalog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Session::new() ──► NotLoaded ──► load_catalog() ──┬──► Ready(Catalog) │
//! │                                                     │                   │
//! │                                                     └──► Failed(reason) │
//! │                                                                         │
//! │  NotLoaded / Failed: lookups and add-to-cart return CatalogUnavailable │
//! │  reset(): empties cart, discount and customer; the catalog stays       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is owned by the shell and passed by `&mut` to commands; there
//! is no global state and no locking.

use quotedesk_core::{Cart, Catalog, CoreError, CoreResult, CustomerDetails, Percent};

/// Where the catalog load stands.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    /// Load not finished (or not started).
    #[default]
    NotLoaded,
    /// Catalog available for lookups.
    Ready(Catalog),
    /// Load failed; the session stays usable but empty.
    Failed { reason: String },
}

impl CatalogState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogState::Ready(_))
    }
}

/// The order being put together.
#[derive(Debug, Default)]
pub struct Session {
    catalog: CatalogState,
    pub cart: Cart,
    pub overall_discount: Percent,
    pub customer: CustomerDetails,
}

impl Session {
    /// Creates a session with no catalog and an empty order.
    pub fn new() -> Self {
        Session::default()
    }

    /// Creates a session around an already-loaded catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Session {
            catalog: CatalogState::Ready(catalog),
            ..Session::default()
        }
    }

    /// The loaded catalog.
    ///
    /// ## Errors
    /// `CatalogUnavailable` unless the catalog is `Ready`.
    pub fn catalog(&self) -> CoreResult<&Catalog> {
        match &self.catalog {
            CatalogState::Ready(catalog) => Ok(catalog),
            _ => Err(CoreError::CatalogUnavailable),
        }
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = CatalogState::Ready(catalog);
    }

    pub fn mark_catalog_failed(&mut self, reason: impl Into<String>) {
        self.catalog = CatalogState::Failed {
            reason: reason.into(),
        };
    }

    /// Starts a new order: cart, overall discount and customer are cleared.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.overall_discount = Percent::zero();
        self.customer = CustomerDetails::default();
    }
}
