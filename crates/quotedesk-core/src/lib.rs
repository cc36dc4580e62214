//! # quotedesk-core: Pure Order-Entry Logic for QuoteDesk
//!
//! This crate is the **heart** of QuoteDesk. It contains catalog lookup and
//! cart arithmetic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuoteDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Order Form (terminal shell)                  │   │
//! │  │    Search ──► Add to Cart ──► Discounts ──► Export Document     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    App Commands                                 │   │
//! │  │    add_to_cart, preview_price, set_overall_discount, export    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quotedesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │  catalog  │  │   cart    │  │ discount  │  │   │
//! │  │   │  matcher  │  │   types   │  │   quote   │  │   money   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              quotedesk-source (Catalog Export Reader)           │   │
//! │  │           CSV / workbook ──► RawRow ──► Catalog                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] - Accent/case/whitespace-insensitive comparison keys
//! - [`catalog`] - Catalog built from raw spreadsheet rows
//! - [`matcher`] - Tiered query resolution (code prefix, exact, partial)
//! - [`cart`] - Cart lines keyed by code
//! - [`discount`] - Percent type and the two discount layers
//! - [`money`] - Money type with integer arithmetic
//! - [`quote`] - Customer details and the document snapshot
//! - [`types`] - Domain types (CatalogEntry, CartLine)
//! - [`error`] - Domain error types
//! - [`validation`] - Form input parsing
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system, clock and logging stay in the outer crates
//! 3. **Integer Money**: Amounts are cents (i64), percentages are basis points (u32)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use quotedesk_core::{Cart, Catalog, CatalogEntry, Money, Percent};
//!
//! let catalog = Catalog::from_entries(vec![CatalogEntry {
//!     code: "001".to_string(),
//!     name: "Hemograma".to_string(),
//!     price: Money::from_cents(5000),
//! }]);
//!
//! let entry = catalog.find("hemograma").unwrap();
//! let mut cart = Cart::new();
//! cart.add(entry, 2, Percent::from_f64(10.0)).unwrap();
//!
//! // 2 × 50.00 at 10% off, then 50% overall
//! assert_eq!(cart.subtotal().to_string(), "90.00");
//! assert_eq!(cart.grand_total(Percent::from_f64(50.0)).to_string(), "45.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod error;
pub mod matcher;
pub mod money;
pub mod normalize;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quotedesk_core::Money` instead of
// `use quotedesk_core::money::Money`

pub use cart::{Cart, CartTotals, MAX_QUANTITY};
pub use catalog::{Catalog, CatalogBuild, CatalogSchema, RawCell, RawRow, SkippedRow};
pub use discount::{clamp_percent, Percent};
pub use error::{CoreError, CoreResult, SkipReason, ValidationError};
pub use matcher::{Match, MatchTier};
pub use money::{Money, MAX_PRICE};
pub use normalize::normalize;
pub use quote::{CustomerDetails, CustomerField, QuoteLine, QuoteSnapshot};
pub use types::*;
