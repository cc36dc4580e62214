//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats, adding and removing the same lines repeatedly     │
//! │  drifts: 0.1 + 0.2 = 0.30000000000000004                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is a whole number of cents. Percentage discounts       │
//! │    round half-up to the cent once per application.                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quotedesk_core::money::Money;
//! use quotedesk_core::discount::Percent;
//!
//! let price = Money::from_cents(5000); // 50.00
//! let line = price.checked_multiply_quantity(2).unwrap(); // 100.00
//! let discounted = line.apply_discount(Percent::from_f64(10.0));
//! assert_eq!(discounted.to_string(), "90.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::discount::Percent;
use crate::validation::parse_decimal_prefix;

/// Currency prefix stripped from textual prices in the catalog export.
pub const CURRENCY_PREFIX: &str = "R$";

/// Highest unit price a catalog row may carry (R$ 10,000,000.00).
pub const MAX_PRICE: Money = Money(1_000_000_000);

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CatalogEntry.price ──► CartLine.unit_price ──► line subtotal          │
/// │                                                    │                    │
/// │                                      Σ lines ──► cart subtotal          │
/// │                                                    │                    │
/// │                          overall discount ──► grand total               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use quotedesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a native spreadsheet number to cents, rounding half away
    /// from zero. Returns `None` for NaN, infinities and values outside the
    /// range of whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use quotedesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(50.0), Some(Money::from_cents(5000)));
    /// assert_eq!(Money::from_f64(19.99), Some(Money::from_cents(1999)));
    /// assert_eq!(Money::from_f64(f64::NAN), None);
    /// assert_eq!(Money::from_f64(1e300), None);
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Parses a price typed as text in the catalog export.
    ///
    /// The text is read the Brazilian way: the `R$` prefix is dropped,
    /// every `.` is a thousands separator and the first `,` is the decimal
    /// separator. Anything after the leading number is ignored.
    ///
    /// ## Example
    /// ```rust
    /// use quotedesk_core::money::Money;
    ///
    /// assert_eq!(Money::parse_price("R$ 1.234,50"), Some(Money::from_cents(123450)));
    /// assert_eq!(Money::parse_price("30"), Some(Money::from_cents(3000)));
    /// assert_eq!(Money::parse_price("sob consulta"), None);
    /// ```
    pub fn parse_price(text: &str) -> Option<Self> {
        let cleaned = text
            .trim()
            .replacen(CURRENCY_PREFIX, "", 1)
            .replace('.', "")
            .replacen(',', ".", 1);
        parse_decimal_prefix(&cleaned).and_then(Money::from_f64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use quotedesk_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(unit_price.checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, clamping at the `i64` bounds.
    #[inline]
    pub const fn saturating_multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, or `None` if the total leaves the `i64` range.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Applies a percentage discount and returns the discounted amount:
    /// `amount * (1 - pct / 100)`.
    ///
    /// The discount amount is rounded half-up to the cent, then subtracted,
    /// so a 100% discount always yields exactly zero.
    ///
    /// ## Example
    /// ```rust
    /// use quotedesk_core::money::Money;
    /// use quotedesk_core::discount::Percent;
    ///
    /// let subtotal = Money::from_cents(10000);
    /// let discounted = subtotal.apply_discount(Percent::from_bps(1000)); // 10% off
    /// assert_eq!(discounted.cents(), 9000);
    /// ```
    pub fn apply_discount(&self, pct: Percent) -> Money {
        // i128 keeps large line totals from overflowing before the division
        let discount_amount = (self.0 as i128 * pct.bps() as i128 + 5000) / 10000;
        Money::from_cents(self.0.saturating_sub(discount_amount as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// The operators saturate at the i64 bounds. Cart::add rejects lines whose
// totals would not fit, so the clamp is never reached by a valid cart.

/// Plain amount with exactly two fraction digits (`"1234.50"`).
///
/// The currency symbol is a display concern of the app configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.checked_multiply_quantity(3).unwrap().cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_parse_price_brazilian_format() {
        assert_eq!(Money::parse_price("R$ 50,00"), Some(Money::from_cents(5000)));
        assert_eq!(Money::parse_price("R$1.234,56"), Some(Money::from_cents(123456)));
        assert_eq!(Money::parse_price("  75 "), Some(Money::from_cents(7500)));
        assert_eq!(Money::parse_price("12,5"), Some(Money::from_cents(1250)));
    }

    #[test]
    fn test_parse_price_point_is_thousands_separator() {
        // A textual "50.00" reads as fifty thousand: points group thousands
        assert_eq!(Money::parse_price("50.00"), Some(Money::from_cents(500000)));
    }

    #[test]
    fn test_parse_price_rejects_non_numeric() {
        assert_eq!(Money::parse_price(""), None);
        assert_eq!(Money::parse_price("R$"), None);
        assert_eq!(Money::parse_price("free"), None);
    }

    #[test]
    fn test_from_f64_rounds_to_cents() {
        assert_eq!(Money::from_f64(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_from_f64_rejects_out_of_range() {
        assert_eq!(Money::from_f64(1e300), None);
        assert_eq!(Money::from_f64(-1e300), None);
        assert_eq!(Money::from_f64(1e17), None);
        assert!(Money::from_f64(1e16).is_some());
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(big.checked_multiply_quantity(2), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(Money::checked_sum([big, big]), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(100), Money::from_cents(250)]),
            Some(Money::from_cents(350))
        );
    }

    #[test]
    fn test_operators_saturate() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!(max.saturating_multiply_quantity(3).cents(), i64::MAX);
        let total: Money = vec![max, max].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_apply_discount() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.apply_discount(Percent::from_bps(1000)).cents(), 9000);
        assert_eq!(subtotal.apply_discount(Percent::zero()).cents(), 10000);
        assert_eq!(subtotal.apply_discount(Percent::full()).cents(), 0);
    }

    #[test]
    fn test_apply_discount_rounds_half_up() {
        // 0.99 at 50% off: discount 0.495 rounds to 0.50
        let amount = Money::from_cents(99);
        assert_eq!(amount.apply_discount(Percent::from_bps(5000)).cents(), 49);
    }

    #[test]
    fn test_full_discount_is_exactly_zero_for_odd_amounts() {
        for cents in [1, 7, 99, 12345, 999_999] {
            let amount = Money::from_cents(cents);
            assert!(amount.apply_discount(Percent::full()).is_zero());
        }
    }
}
