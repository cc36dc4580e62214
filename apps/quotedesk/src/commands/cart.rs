//! # Cart Commands
//!
//! Commands for cart manipulation and the overall discount.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Customer │────►│ Exported │       │
//! │  │  Cart    │     │          │     │  Block   │     │ Document │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                      export_quote        │
//! │                   remove_from_cart                 (quote.rs)          │
//! │                   set_overall_discount                                  │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quotedesk_core::discount::{clamp_percent, line_subtotal};
use quotedesk_core::{Cart, CartLine, CartTotals, CoreError, Money, Percent};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::catalog::resolve_entry;
use crate::error::ApiError;
use crate::state::Session;

/// A cart line with its discounted subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub code: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub discount: Percent,
    pub subtotal: Money,
}

impl From<&CartLine> for CartLineDto {
    fn from(line: &CartLine) -> Self {
        CartLineDto {
            code: line.code.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount: line.discount,
            subtotal: line_subtotal(line),
        }
    }
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineDto>,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn new(cart: &Cart, overall: Percent) -> Self {
        CartResponse {
            lines: cart.lines().iter().map(CartLineDto::from).collect(),
            totals: cart.totals(overall),
        }
    }
}

impl From<&Session> for CartResponse {
    fn from(session: &Session) -> Self {
        CartResponse::new(&session.cart, session.overall_discount)
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(session)
}

/// Adds the entry a query resolves to.
///
/// ## Behavior
/// - Entry already in cart: quantity increases, discount is replaced
/// - Entry not in cart: appended as a new line
/// - Price is "frozen" at time of adding
///
/// ## Check Order
/// catalog loaded → query not blank → entry found → quantity in range.
/// Any failure leaves the cart unchanged.
///
/// ## Arguments
/// * `query` - name, code or `"<code> - <name>"` label
/// * `quantity` - parsed quantity; `None` when the field was not a number
/// * `discount` - per-line discount as typed (`"10"`, `"12,5"`)
pub fn add_to_cart(
    session: &mut Session,
    query: &str,
    quantity: Option<i64>,
    discount: &str,
) -> Result<CartResponse, ApiError> {
    debug!(query = %query, quantity = ?quantity, discount = %discount, "add_to_cart command");

    let (entry, _) = resolve_entry(session, query)?;

    let quantity = match quantity {
        Some(q) if q > 0 => q,
        other => return Err(CoreError::InvalidQuantity { quantity: other }.into()),
    };

    session.cart.add(&entry, quantity, clamp_percent(discount))?;
    Ok(CartResponse::from(&*session))
}

/// Removes a line by code. Unknown codes leave the cart as it is.
pub fn remove_from_cart(session: &mut Session, code: &str) -> CartResponse {
    let removed = session.cart.remove(code.trim());
    debug!(code = %code, removed = removed, "remove_from_cart command");
    CartResponse::from(&*session)
}

/// Sets the discount applied to the already line-discounted total.
pub fn set_overall_discount(session: &mut Session, raw: &str) -> CartResponse {
    session.overall_discount = clamp_percent(raw);
    debug!(raw = %raw, overall = %session.overall_discount, "set_overall_discount command");
    CartResponse::from(&*session)
}

/// Clears all lines. The overall discount and customer block are kept.
pub fn clear_cart(session: &mut Session) -> CartResponse {
    debug!("clear_cart command");
    session.cart.clear();
    CartResponse::from(&*session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use quotedesk_core::{Catalog, CatalogEntry};

    fn session() -> Session {
        Session::with_catalog(Catalog::from_entries(vec![
            CatalogEntry {
                code: "001".to_string(),
                name: "Hemograma".to_string(),
                price: Money::from_cents(5000),
            },
            CatalogEntry {
                code: "002".to_string(),
                name: "Glicose".to_string(),
                price: Money::from_cents(3000),
            },
        ]))
    }

    #[test]
    fn test_order_scenario() {
        let mut session = session();

        let response = add_to_cart(&mut session, "001", Some(2), "10").unwrap();
        assert_eq!(response.lines[0].subtotal.cents(), 9000);

        add_to_cart(&mut session, "Glicose", Some(1), "0").unwrap();
        let response = set_overall_discount(&mut session, "50");

        assert_eq!(response.totals.subtotal.cents(), 12000);
        assert_eq!(response.totals.grand_total.cents(), 6000);
    }

    #[test]
    fn test_add_requires_catalog() {
        let mut session = Session::new();
        let err = add_to_cart(&mut session, "001", Some(1), "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut session = session();

        let err = add_to_cart(&mut session, "", Some(1), "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_to_cart(&mut session, "colesterol", Some(1), "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&mut session, "001", Some(0), "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let err = add_to_cart(&mut session, "001", None, "0").unwrap_err();
        assert_eq!(err.message, "Invalid quantity: missing");

        assert!(session.cart.is_empty());
    }

    #[test]
    fn test_add_rejects_huge_quantity() {
        let mut session = session();
        add_to_cart(&mut session, "001", Some(1), "0").unwrap();

        let err = add_to_cart(&mut session, "001", Some(2_000_000_000_000_000), "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert_eq!(session.cart.lines()[0].quantity, 1);
        assert_eq!(get_cart(&session).totals.grand_total.cents(), 5000);
    }

    #[test]
    fn test_discounts_are_clamped() {
        let mut session = session();
        let response = add_to_cart(&mut session, "001", Some(1), "150").unwrap();
        assert_eq!(response.lines[0].discount, Percent::full());
        assert_eq!(response.lines[0].subtotal, Money::zero());

        let response = set_overall_discount(&mut session, "abc");
        assert_eq!(response.totals.overall_discount, Percent::zero());
    }

    #[test]
    fn test_remove_unknown_code_is_noop() {
        let mut session = session();
        add_to_cart(&mut session, "001", Some(2), "10").unwrap();

        let before = get_cart(&session);
        let after = remove_from_cart(&mut session, "999");
        assert_eq!(after.totals, before.totals);
        assert_eq!(after.lines.len(), 1);

        let after = remove_from_cart(&mut session, "001");
        assert!(after.lines.is_empty());
    }

    #[test]
    fn test_response_json_shape() {
        let mut session = session();
        let response = add_to_cart(&mut session, "002", Some(1), "0").unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["lines"][0]["unitPrice"], 3000);
        assert_eq!(json["totals"]["grand_total"], 3000);
    }
}
