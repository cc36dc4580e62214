//! # Error Types
//!
//! Domain-specific error types for quotedesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quotedesk-core errors (this file)                                     │
//! │  ├── CoreError        - Catalog, matching, cart and quote failures     │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── SkipReason       - Why a catalog row was left out (non-fatal)     │
//! │                                                                         │
//! │  quotedesk-source errors (separate crate)                              │
//! │  └── SourceError      - Reading the catalog export                     │
//! │                                                                         │
//! │  App errors                                                             │
//! │  └── ApiError         - What the form shows the user                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SourceError → ApiError → User     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (query, quantity, row)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable at the boundary where it occurs

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// None of these are fatal to the session. A failed catalog load leaves the
/// session usable but empty; every other variant leaves state untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog input is unusable.
    ///
    /// ## When This Occurs
    /// - Fewer than two rows (no header + data)
    /// - Code, name or price column missing from the header row
    /// - Every data row was skipped
    #[error("Malformed catalog input: {reason}")]
    MalformedInput { reason: String },

    /// The query did not resolve to any catalog entry.
    #[error("No catalog entry matches '{query}'")]
    NotFound { query: String },

    /// Quantity is absent, zero or negative.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 0)
    ///      │
    ///      ▼
    /// InvalidQuantity { quantity: Some(0) }
    ///      │
    ///      ▼
    /// UI shows: "Invalid quantity: 0", cart unchanged
    /// ```
    #[error("Invalid quantity: {}", display_quantity(.quantity))]
    InvalidQuantity { quantity: Option<i64> },

    /// A line would hold more than the per-line quantity limit.
    #[error("Quantity {quantity} exceeds the limit of {max} per line")]
    QuantityTooLarge { quantity: i64, max: i64 },

    /// A line or cart total no longer fits in whole cents.
    #[error("Order total is too large")]
    AmountOverflow,

    /// A quote was requested for a cart with no lines.
    #[error("The cart is empty, nothing to export")]
    EmptyCart,

    /// A cart operation was attempted before a catalog was loaded.
    #[error("No catalog loaded")]
    CatalogUnavailable,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn display_quantity(quantity: &Option<i64>) -> String {
    match quantity {
        Some(q) => q.to_string(),
        None => "missing".to_string(),
    }
}

impl CoreError {
    /// Creates a malformed input error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedInput {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. unparseable number or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Skipped Rows
// =============================================================================

/// Why a catalog data row was excluded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Name cell is empty or absent.
    #[error("name is empty")]
    MissingName,
    /// Price cell is absent.
    #[error("price is empty")]
    MissingPrice,
    /// Price could not be read as a non-negative amount within `MAX_PRICE`.
    #[error("price is not a valid amount")]
    InvalidPrice,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
