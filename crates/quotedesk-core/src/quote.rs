//! # Quote Snapshot
//!
//! A frozen copy of the cart, its totals and the customer block, taken when
//! the user asks for the printable document.
//!
//! ## Snapshot Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart ─────────────┐                                                    │
//! │  OverallDiscount ──┼──► QuoteSnapshot::build() ──► DocumentRenderer     │
//! │  CustomerDetails ──┤          │                                         │
//! │  today ────────────┘          └── empty cart? ──► EmptyCart             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `today` is passed in: this crate never reads the clock.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::discount::{self, Percent};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CartLine;
use crate::validation::{parse_optional_date, ValidationResult};

/// Display format of every date on the document.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// =============================================================================
// Customer Details
// =============================================================================

/// Editable fields of the customer block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    DocumentId,
    Phone,
    BirthDate,
    OrderDate,
    Notes,
}

impl CustomerField {
    /// Every field, in document order.
    pub const ALL: [CustomerField; 6] = [
        CustomerField::Name,
        CustomerField::DocumentId,
        CustomerField::BirthDate,
        CustomerField::Phone,
        CustomerField::OrderDate,
        CustomerField::Notes,
    ];

    /// Name accepted by `FromStr` and shown in help text.
    pub fn key(&self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::DocumentId => "document",
            CustomerField::Phone => "phone",
            CustomerField::BirthDate => "birth",
            CustomerField::OrderDate => "date",
            CustomerField::Notes => "notes",
        }
    }
}

impl FromStr for CustomerField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        CustomerField::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "customer field".to_string(),
                reason: format!("unknown field '{}'", s.trim()),
            })
    }
}

/// The customer block of the document. Blank values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub document_id: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub order_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CustomerDetails {
    /// Sets one field from raw form text. Blank text clears the field.
    ///
    /// ## Errors
    /// `InvalidFormat` when a date field is neither `yyyy-mm-dd` nor
    /// `dd/mm/yyyy`; the field keeps its previous value.
    pub fn set(&mut self, field: CustomerField, raw: &str) -> ValidationResult<()> {
        match field {
            CustomerField::Name => self.name = non_blank(raw),
            CustomerField::DocumentId => self.document_id = non_blank(raw),
            CustomerField::Phone => self.phone = non_blank(raw),
            CustomerField::Notes => self.notes = non_blank_notes(raw),
            CustomerField::BirthDate => self.birth_date = parse_optional_date("birth date", raw)?,
            CustomerField::OrderDate => self.order_date = parse_optional_date("order date", raw)?,
        }
        Ok(())
    }

    /// Drops blank strings that may have come in through deserialization.
    pub fn normalized(self) -> Self {
        CustomerDetails {
            name: self.name.as_deref().and_then(non_blank),
            document_id: self.document_id.as_deref().and_then(non_blank),
            phone: self.phone.as_deref().and_then(non_blank),
            notes: self.notes.as_deref().and_then(non_blank_notes),
            ..self
        }
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Notes keep their inner line breaks; only the outer whitespace goes.
fn non_blank_notes(raw: &str) -> Option<String> {
    non_blank(&raw.replace("\\n", "\n"))
}

// =============================================================================
// Quote Snapshot
// =============================================================================

/// A cart line with its discounted subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    #[serde(flatten)]
    pub line: CartLine,
    pub subtotal: Money,
}

/// Everything the document shows, computed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub id: Uuid,
    pub customer: CustomerDetails,
    /// `customer.order_date`, or the day the snapshot was taken.
    pub order_date: NaiveDate,
    pub lines: Vec<QuoteLine>,
    pub cart_subtotal: Money,
    pub overall_discount: Percent,
    pub grand_total: Money,
}

impl QuoteSnapshot {
    /// Takes the snapshot.
    ///
    /// Blank customer fields are dropped, so a customer block that came in
    /// through deserialization renders the same as one typed into the form.
    ///
    /// ## Errors
    /// `EmptyCart` when the cart has no lines.
    pub fn build(
        cart: &Cart,
        overall: Percent,
        customer: &CustomerDetails,
        today: NaiveDate,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let lines: Vec<QuoteLine> = cart
            .lines()
            .iter()
            .map(|line| QuoteLine {
                line: line.clone(),
                subtotal: discount::line_subtotal(line),
            })
            .collect();

        let cart_subtotal: Money = lines.iter().map(|l| l.subtotal).sum();

        Ok(QuoteSnapshot {
            id: Uuid::new_v4(),
            customer: customer.clone().normalized(),
            order_date: customer.order_date.unwrap_or(today),
            lines,
            cart_subtotal,
            overall_discount: overall,
            grand_total: discount::apply_discount(cart_subtotal, overall),
        })
    }

    /// `dd/mm/yyyy` form of the order date.
    pub fn order_date_display(&self) -> String {
        format_date(self.order_date)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
