//! # Discount Calculator
//!
//! Pure arithmetic turning raw line amounts into line and grand totals under
//! two independent discount layers.
//!
//! ## Discount Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit_price × quantity                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  apply_discount(line.discount)  ──► line subtotal                       │
//! │                                          │                              │
//! │                              Σ over lines ──► cart subtotal             │
//! │                                                   │                     │
//! │                       apply_discount(overall) ──► grand total           │
//! │                                                                         │
//! │  10% per line then 50% overall = 55% off, not 60%:                     │
//! │  the layers compose multiplicatively.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::CartLine;
use crate::validation::parse_decimal_prefix;

/// Basis points in 100%.
pub const FULL_BPS: u32 = 10_000;

// =============================================================================
// Percent
// =============================================================================

/// A discount percentage in basis points (1 bp = 0.01%), always in [0, 100].
///
/// ## Why Basis Points?
/// Two fraction digits of a percent is what the form shows, and integer
/// storage keeps discount math exact up to the final cent rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage from basis points, clamped to 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > FULL_BPS {
            Percent(FULL_BPS)
        } else {
            Percent(bps)
        }
    }

    /// Creates a percentage from a native number, clamped to [0, 100].
    /// NaN maps to zero.
    ///
    /// ## Example
    /// ```rust
    /// use quotedesk_core::discount::Percent;
    ///
    /// assert_eq!(Percent::from_f64(12.5).bps(), 1250);
    /// assert_eq!(Percent::from_f64(-3.0), Percent::zero());
    /// assert_eq!(Percent::from_f64(250.0), Percent::full());
    /// ```
    pub fn from_f64(pct: f64) -> Self {
        if pct.is_nan() {
            return Percent::zero();
        }
        let clamped = pct.clamp(0.0, 100.0);
        Percent::from_bps((clamped * 100.0).round() as u32)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// One hundred percent.
    #[inline]
    pub const fn full() -> Self {
        Percent(FULL_BPS)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// `"12.50%"`
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Calculator Functions
// =============================================================================

/// Reads a percentage typed by the user.
///
/// Accepts a comma or a point as decimal separator and uses the leading
/// number of the text. Anything non-numeric reads as 0; the result is
/// clamped to [0, 100].
///
/// ## Example
/// ```rust
/// use quotedesk_core::discount::{clamp_percent, Percent};
///
/// assert_eq!(clamp_percent("12,5").bps(), 1250);
/// assert_eq!(clamp_percent("abc"), Percent::zero());
/// assert_eq!(clamp_percent("150"), Percent::full());
/// ```
pub fn clamp_percent(raw: &str) -> Percent {
    let text = raw.replacen(',', ".", 1);
    match parse_decimal_prefix(&text) {
        Some(value) => Percent::from_f64(value),
        None => Percent::zero(),
    }
}

/// `amount * (1 - pct / 100)`, rounded to the cent.
#[inline]
pub fn apply_discount(amount: Money, pct: Percent) -> Money {
    amount.apply_discount(pct)
}

/// Line amount after the line's own discount.
pub fn line_subtotal(line: &CartLine) -> Money {
    apply_discount(line.gross(), line.discount)
}

/// Sum of line subtotals: the total after line discounts.
pub fn cart_subtotal(lines: &[CartLine]) -> Money {
    lines.iter().map(line_subtotal).sum()
}

/// Overall discount applied once, to the already line-discounted sum.
pub fn grand_total(lines: &[CartLine], overall: Percent) -> Money {
    apply_discount(cart_subtotal(lines), overall)
}

// =============================================================================
// Unit Tests
// =============================================================================
