//! # Domain Types
//!
//! Core domain types used throughout QuoteDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        add()        ┌─────────────────┐           │
//! │  │  CatalogEntry   │ ──────────────────► │    CartLine     │           │
//! │  │  ─────────────  │   (price frozen)    │  ─────────────  │           │
//! │  │  code           │                     │  code (unique)  │           │
//! │  │  name           │                     │  name           │           │
//! │  │  price          │                     │  unit_price     │           │
//! │  └─────────────────┘                     │  quantity ≥ 1   │           │
//! │                                          │  discount       │           │
//! │                                          └─────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The catalog `code` is the only business key. It is not enforced unique in
//! the catalog (lookup takes the first match) but is unique within a cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::Percent;
use crate::money::Money;

// =============================================================================
// Catalog Entry
// =============================================================================

/// A priced item of the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    /// Business code; may be empty when the export left the cell blank.
    pub code: String,

    /// Display name, as written in the export (trimmed).
    pub name: String,

    /// Unit price, never negative.
    pub price: Money,
}

impl CatalogEntry {
    /// Picker label: `"<code> - <name>"`, or just the name without a code.
    ///
    /// The matcher recognises this form and resolves it by code.
    pub fn label(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line of the cart.
/// Uses snapshot pattern: code, name and price are copied from the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub code: String,
    pub name: String,
    /// Unit price at time of adding (frozen).
    pub unit_price: Money,
    /// Always at least 1.
    pub quantity: i64,
    /// Per-line discount.
    pub discount: Percent,
}

impl CartLine {
    /// Creates a line from a catalog entry.
    pub fn from_entry(entry: &CatalogEntry, quantity: i64, discount: Percent) -> Self {
        CartLine {
            code: entry.code.clone(),
            name: entry.name.clone(),
            unit_price: entry.price,
            quantity,
            discount,
        }
    }

    /// Line amount before any discount (unit price × quantity).
    ///
    /// Lines built by `Cart::add` always fit; anything else clamps.
    #[inline]
    pub fn gross(&self) -> Money {
        self.unit_price.saturating_multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, name: &str) -> CatalogEntry {
        CatalogEntry {
            code: code.to_string(),
            name: name.to_string(),
            price: Money::from_cents(5000),
        }
    }

    #[test]
    fn test_label_with_code() {
        assert_eq!(entry("001", "Hemograma").label(), "001 - Hemograma");
    }

    #[test]
    fn test_label_without_code() {
        assert_eq!(entry("", "Hemograma").label(), "Hemograma");
    }

    #[test]
    fn test_cart_line_snapshot() {
        let line = CartLine::from_entry(&entry("001", "Hemograma"), 3, Percent::zero());
        assert_eq!(line.code, "001");
        assert_eq!(line.unit_price.cents(), 5000);
        assert_eq!(line.gross().cents(), 15000);
    }

    #[test]
    fn test_serializes_money_as_cents() {
        let json = serde_json::to_string(&entry("001", "Hemograma")).unwrap();
        assert_eq!(json, r#"{"code":"001","name":"Hemograma","price":5000}"#);
    }
}
