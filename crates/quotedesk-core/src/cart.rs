//! # Cart
//!
//! The lines selected so far, one per catalog code.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Form Action              Operation            Cart Change              │
//! │  ───────────              ─────────            ───────────              │
//! │                                                                         │
//! │  Add (new code) ─────────► add() ────────────► lines.push(line)        │
//! │                                                                         │
//! │  Add (same code) ────────► add() ────────────► qty += n,               │
//! │                                                discount = new value     │
//! │                                                                         │
//! │  Click Remove ───────────► remove() ─────────► lines.retain(≠ code)    │
//! │                                                                         │
//! │  View Cart ──────────────► lines() / totals() (read only)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::{self, Percent};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, CatalogEntry};

/// Most units a single line may hold.
pub const MAX_QUANTITY: i64 = 100_000;

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `code` (adding the same code again updates in place)
/// - Line order is the order of first add
/// - Every quantity is in 1..=MAX_QUANTITY
/// - Every line total and the cart total fit in `Money`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds an entry or updates its existing line.
    ///
    /// ## Behavior
    /// - Code already in cart: quantity increases, discount is overwritten
    /// - Code not in cart: a new line is appended
    ///
    /// ## Errors
    /// The cart is left unchanged on every error.
    /// - `InvalidQuantity` when `quantity <= 0`
    /// - `QuantityTooLarge` when the line would exceed `MAX_QUANTITY`
    /// - `AmountOverflow` when the line or cart total would not fit in `Money`
    pub fn add(&mut self, entry: &CatalogEntry, quantity: i64, discount: Percent) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                quantity: Some(quantity),
            });
        }

        let existing = self.lines.iter().position(|l| l.code == entry.code);
        let new_quantity = match existing {
            Some(index) => self.lines[index].quantity.saturating_add(quantity),
            None => quantity,
        };
        if new_quantity > MAX_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                quantity: new_quantity,
                max: MAX_QUANTITY,
            });
        }

        let unit_price = existing.map_or(entry.price, |index| self.lines[index].unit_price);
        let line_gross = unit_price
            .checked_multiply_quantity(new_quantity)
            .ok_or(CoreError::AmountOverflow)?;
        let others = self
            .lines
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != existing)
            .map(|(_, line)| line.gross());
        Money::checked_sum(others.chain(std::iter::once(line_gross)))
            .ok_or(CoreError::AmountOverflow)?;

        match existing {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = new_quantity;
                line.discount = discount;
            }
            None => self.lines.push(CartLine::from_entry(entry, quantity, discount)),
        }
        Ok(())
    }

    /// Removes the line with `code`. Absent codes are a no-op.
    ///
    /// ## Returns
    /// Whether a line was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.code != code);
        self.lines.len() != initial_len
    }

    /// Ordered read view of the lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Total after line discounts.
    pub fn subtotal(&self) -> Money {
        discount::cart_subtotal(&self.lines)
    }

    /// Total after line discounts and the overall discount.
    pub fn grand_total(&self, overall: Percent) -> Money {
        discount::grand_total(&self.lines, overall)
    }

    /// Totals summary for display.
    pub fn totals(&self, overall: Percent) -> CartTotals {
        let gross = self.lines.iter().map(CartLine::gross).sum();
        CartTotals {
            line_count: self.len(),
            total_quantity: self.total_quantity(),
            gross,
            subtotal: self.subtotal(),
            overall_discount: overall,
            grand_total: self.grand_total(overall),
        }
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    /// Before any discount.
    pub gross: Money,
    /// After line discounts.
    pub subtotal: Money,
    pub overall_discount: Percent,
    /// After both discount layers.
    pub grand_total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, cents: i64) -> CatalogEntry {
        CatalogEntry {
            code: code.to_string(),
            name: format!("Exame {}", code),
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_cart_add_line() {
        let mut cart = Cart::new();
        cart.add(&entry("001", 999), 2, Percent::zero()).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_code_merges_and_overwrites_discount() {
        let mut cart = Cart::new();
        let e = entry("001", 5000);

        cart.add(&e, 2, Percent::from_bps(1000)).unwrap();
        cart.add(&e, 3, Percent::from_bps(500)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.lines()[0].discount, Percent::from_bps(500));
    }

    #[test]
    fn test_cart_readd_keeps_order() {
        let mut cart = Cart::new();
        cart.add(&entry("001", 100), 1, Percent::zero()).unwrap();
        cart.add(&entry("002", 100), 1, Percent::zero()).unwrap();
        cart.add(&entry("001", 100), 1, Percent::zero()).unwrap();

        let codes: Vec<&str> = cart.lines().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["001", "002"]);
    }

    #[test]
    fn test_cart_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let e = entry("001", 100);
        cart.add(&e, 1, Percent::zero()).unwrap();

        for qty in [0, -1] {
            let err = cart.add(&e, qty, Percent::full()).unwrap_err();
            assert!(matches!(err, CoreError::InvalidQuantity { quantity: Some(q) } if q == qty));
        }

        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].discount, Percent::zero());
    }

    #[test]
    fn test_cart_rejects_quantity_above_limit() {
        let mut cart = Cart::new();
        let e = entry("001", 5000);

        let err = cart.add(&e, 2_000_000_000_000_000, Percent::zero()).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { max: MAX_QUANTITY, .. }));
        assert!(cart.is_empty());

        cart.add(&e, MAX_QUANTITY, Percent::zero()).unwrap();
        assert_eq!(cart.lines()[0].quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_cart_merge_above_limit_leaves_line_unchanged() {
        let mut cart = Cart::new();
        let e = entry("001", 5000);
        cart.add(&e, MAX_QUANTITY - 1, Percent::from_bps(1000)).unwrap();

        let err = cart.add(&e, i64::MAX, Percent::full()).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { quantity: i64::MAX, .. }));
        assert_eq!(cart.lines()[0].quantity, MAX_QUANTITY - 1);
        assert_eq!(cart.lines()[0].discount, Percent::from_bps(1000));
    }

    #[test]
    fn test_cart_rejects_total_overflow() {
        let mut cart = Cart::new();
        let huge = entry("001", i64::MAX / 2);

        let err = cart.add(&huge, 3, Percent::zero()).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));
        assert!(cart.is_empty());

        cart.add(&huge, 1, Percent::zero()).unwrap();
        let err = cart.add(&entry("002", i64::MAX / 2 + 10), 1, Percent::zero()).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.totals(Percent::zero()).grand_total.cents(), i64::MAX / 2);
    }

    #[test]
    fn test_cart_remove() {
        let mut cart = Cart::new();
        cart.add(&entry("001", 100), 1, Percent::zero()).unwrap();
        cart.add(&entry("002", 200), 1, Percent::zero()).unwrap();

        assert!(cart.remove("001"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].code, "002");
    }

    #[test]
    fn test_cart_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&entry("001", 100), 1, Percent::from_bps(1000)).unwrap();
        let before = cart.clone();
        let totals_before = cart.totals(Percent::from_bps(500));

        assert!(!cart.remove("999"));
        assert_eq!(cart, before);
        assert_eq!(cart.totals(Percent::from_bps(500)), totals_before);
    }

    #[test]
    fn test_cart_totals() {
        let mut cart = Cart::new();
        cart.add(&entry("001", 5000), 2, Percent::from_bps(1000)).unwrap();
        cart.add(&entry("002", 3000), 1, Percent::zero()).unwrap();

        let totals = cart.totals(Percent::from_bps(5000));
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.gross.cents(), 13000);
        assert_eq!(totals.subtotal.cents(), 12000);
        assert_eq!(totals.grand_total.cents(), 6000);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add(&entry("001", 999), 2, Percent::zero()).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
    }
}
