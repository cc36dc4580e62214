//! # Catalog
//!
//! The ordered, read-only list of priced entries, built once from the rows of
//! a spreadsheet export.
//!
//! ## Build Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows[0] (header)  ──► normalize each cell ──► locate code/name/price  │
//! │                                                     │                   │
//! │                                  missing column? ───┴──► MalformedInput │
//! │                                                                         │
//! │  rows[1..] (data)  ──► per row:                                         │
//! │                        name empty?   ──► skipped (MissingName)          │
//! │                        price absent? ──► skipped (MissingPrice)         │
//! │                        price bad or  ──► skipped (InvalidPrice)         │
//! │                        > MAX_PRICE?                                     │
//! │                        otherwise     ──► CatalogEntry                   │
//! │                                                                         │
//! │  zero entries ──► MalformedInput                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, SkipReason};
use crate::matcher::{self, Match};
use crate::money::{Money, MAX_PRICE};
use crate::normalize::normalize;
use crate::types::CatalogEntry;

// =============================================================================
// Raw Input
// =============================================================================

/// One cell of the tabular input, typed the way a spreadsheet types it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Number(f64),
    Text(String),
}

impl RawCell {
    /// Builds a text cell; blank text becomes `Empty`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(value)
        }
    }

    /// Cell content as text, trimmed. Numbers print without a trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Number(n) => n.to_string(),
            RawCell::Text(s) => s.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Number(_) => false,
            RawCell::Text(s) => s.trim().is_empty(),
        }
    }
}

/// A row of cells. Rows may be shorter than the header.
pub type RawRow = Vec<RawCell>;

// =============================================================================
// Schema
// =============================================================================

/// Accepted header names for each required column, compared normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSchema {
    pub code: Vec<String>,
    pub name: Vec<String>,
    pub price: Vec<String>,
}

impl Default for CatalogSchema {
    /// `CODIGO / EXAME / VALOR`, plus their English names.
    fn default() -> Self {
        CatalogSchema {
            code: vec!["codigo".to_string(), "code".to_string()],
            name: vec!["exame".to_string(), "name".to_string()],
            price: vec!["valor".to_string(), "price".to_string()],
        }
    }
}

/// Column positions located in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    code: usize,
    name: usize,
    price: usize,
}

impl CatalogSchema {
    fn locate(&self, header: &[RawCell]) -> CoreResult<Columns> {
        let normalized: Vec<String> = header.iter().map(|c| normalize(&c.as_text())).collect();
        let find = |aliases: &[String]| {
            let aliases: Vec<String> = aliases.iter().map(|a| normalize(a)).collect();
            normalized.iter().position(|h| aliases.contains(h))
        };

        let (code, name, price) = (find(&self.code), find(&self.name), find(&self.price));

        match (code, name, price) {
            (Some(code), Some(name), Some(price)) => Ok(Columns { code, name, price }),
            _ => {
                let missing: Vec<&str> = [(code, "code"), (name, "name"), (price, "price")]
                    .iter()
                    .filter(|(idx, _)| idx.is_none())
                    .map(|(_, label)| *label)
                    .collect();
                Err(CoreError::malformed(format!(
                    "header row is missing the {} column(s)",
                    missing.join(", ")
                )))
            }
        }
    }
}

// =============================================================================
// Build Result
// =============================================================================

/// A data row left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Spreadsheet row number (the header is row 1).
    pub row: usize,
    pub reason: SkipReason,
}

/// Outcome of a successful build: the catalog plus the rows it left out.
#[derive(Debug, Clone)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRow>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, read-only collection of priced entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds the catalog from a header row followed by data rows.
    ///
    /// ## Errors
    /// `MalformedInput` when there is no data row, a required column is
    /// missing from the header, or no data row is usable.
    ///
    /// ## Example
    /// ```rust
    /// use quotedesk_core::catalog::{Catalog, CatalogSchema, RawCell};
    ///
    /// let rows = vec![
    ///     vec![RawCell::text("CODIGO"), RawCell::text("EXAME"), RawCell::text("VALOR")],
    ///     vec![RawCell::text("001"), RawCell::text("Hemograma"), RawCell::Number(50.0)],
    ///     vec![RawCell::text("002"), RawCell::Empty, RawCell::Number(30.0)],
    /// ];
    ///
    /// let build = Catalog::build(&rows, &CatalogSchema::default()).unwrap();
    /// assert_eq!(build.catalog.len(), 1);
    /// assert_eq!(build.skipped.len(), 1);
    /// ```
    pub fn build(rows: &[RawRow], schema: &CatalogSchema) -> CoreResult<CatalogBuild> {
        if rows.len() < 2 {
            return Err(CoreError::malformed("the sheet is empty or has no data rows"));
        }

        let columns = schema.locate(&rows[0])?;
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for (index, row) in rows.iter().enumerate().skip(1) {
            if row.iter().all(RawCell::is_empty) {
                continue;
            }

            match parse_row(row, columns) {
                Ok(entry) => entries.push(entry),
                Err(reason) => skipped.push(SkippedRow {
                    row: index + 1,
                    reason,
                }),
            }
        }

        if entries.is_empty() {
            return Err(CoreError::malformed(
                "no usable rows: check the code, name and price columns",
            ));
        }

        Ok(CatalogBuild {
            catalog: Catalog { entries },
            skipped,
        })
    }

    /// Wraps already-parsed entries, keeping their order.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Catalog { entries }
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a free-form query to an entry. See [`matcher::find`].
    pub fn find(&self, query: &str) -> Option<&CatalogEntry> {
        matcher::find(query, self)
    }

    /// Resolves a query and reports which tier matched.
    pub fn resolve(&self, query: &str) -> Option<Match<'_>> {
        matcher::resolve(query, self)
    }

    /// Picker labels for every entry, in catalog order.
    pub fn suggestions(&self) -> Vec<String> {
        self.entries.iter().map(CatalogEntry::label).collect()
    }
}

static EMPTY_CELL: RawCell = RawCell::Empty;

fn cell(row: &[RawCell], index: usize) -> &RawCell {
    row.get(index).unwrap_or(&EMPTY_CELL)
}

fn parse_row(row: &[RawCell], columns: Columns) -> Result<CatalogEntry, SkipReason> {
    let name = cell(row, columns.name);
    if name.is_empty() {
        return Err(SkipReason::MissingName);
    }

    let price = match cell(row, columns.price) {
        RawCell::Empty => return Err(SkipReason::MissingPrice),
        RawCell::Text(s) if s.trim().is_empty() => return Err(SkipReason::MissingPrice),
        RawCell::Number(n) => Money::from_f64(*n),
        RawCell::Text(s) => Money::parse_price(s),
    };

    let price = match price {
        Some(p) if !p.is_negative() && p <= MAX_PRICE => p,
        _ => return Err(SkipReason::InvalidPrice),
    };

    Ok(CatalogEntry {
        code: cell(row, columns.code).as_text(),
        name: name.as_text(),
        price,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::text(s)
    }

    fn header() -> RawRow {
        vec![text("CÓDIGO"), text("Exame"), text("  VALOR ")]
    }

    #[test]
    fn test_build_basic() {
        let rows = vec![
            header(),
            vec![text("001"), text("Hemograma"), RawCell::Number(50.0)],
            vec![text("002"), text(" Glicose "), text("R$ 30,00")],
        ];

        let build = Catalog::build(&rows, &CatalogSchema::default()).unwrap();
        let entries = build.catalog.entries();

        assert_eq!(entries.len(), 2);
        assert!(build.skipped.is_empty());
        assert_eq!(entries[0].code, "001");
        assert_eq!(entries[0].price, Money::from_cents(5000));
        assert_eq!(entries[1].name, "Glicose");
        assert_eq!(entries[1].price, Money::from_cents(3000));
    }

    #[test]
    fn test_columns_in_any_order() {
        let rows = vec![
            vec![text("valor"), text("outro"), text("exame"), text("codigo")],
            vec![RawCell::Number(12.5), text("x"), text("TSH"), text("010")],
        ];

        let build = Catalog::build(&rows, &CatalogSchema::default()).unwrap();
        let entry = &build.catalog.entries()[0];
        assert_eq!(entry.code, "010");
        assert_eq!(entry.name, "TSH");
        assert_eq!(entry.price, Money::from_cents(1250));
    }

    #[test]
    fn test_english_header_aliases() {
        let rows = vec![
            vec![text("Code"), text("Name"), text("Price")],
            vec![text("A1"), text("Panel"), RawCell::Number(10.0)],
        ];
        assert!(Catalog::build(&rows, &CatalogSchema::default()).is_ok());
    }

    #[test]
    fn test_too_few_rows() {
        let err = Catalog::build(&[header()], &CatalogSchema::default()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedInput { .. }));

        let err = Catalog::build(&[], &CatalogSchema::default()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedInput { .. }));
    }

    #[test]
    fn test_missing_columns_are_named() {
        let rows = vec![
            vec![text("codigo"), text("descricao")],
            vec![text("001"), text("Hemograma")],
        ];

        let err = Catalog::build(&rows, &CatalogSchema::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("name, price"), "{message}");
    }

    #[test]
    fn test_rows_are_skipped_not_fatal() {
        let rows = vec![
            header(),
            vec![text("001"), RawCell::Empty, RawCell::Number(50.0)],
            vec![text("002"), text("Glicose")],
            vec![text("003"), text("Ureia"), text("consultar")],
            vec![text("004"), text("Creatinina"), RawCell::Number(-1.0)],
            vec![RawCell::Empty, RawCell::Empty, RawCell::Empty],
            vec![text("005"), text("TSH"), RawCell::Number(42.0)],
        ];

        let build = Catalog::build(&rows, &CatalogSchema::default()).unwrap();

        assert_eq!(build.catalog.len(), 1);
        assert_eq!(
            build.skipped,
            vec![
                SkippedRow { row: 2, reason: SkipReason::MissingName },
                SkippedRow { row: 3, reason: SkipReason::MissingPrice },
                SkippedRow { row: 4, reason: SkipReason::InvalidPrice },
                SkippedRow { row: 5, reason: SkipReason::InvalidPrice },
            ]
        );
    }

    #[test]
    fn test_prices_above_limit_are_skipped() {
        let rows = vec![
            header(),
            vec![text("001"), text("Hemograma"), RawCell::Number(1e300)],
            vec![text("002"), text("Glicose"), text("R$ 10.000.000,01")],
            vec![text("003"), text("Ureia"), text("R$ 10.000.000,00")],
        ];

        let build = Catalog::build(&rows, &CatalogSchema::default()).unwrap();

        assert_eq!(build.catalog.len(), 1);
        assert_eq!(build.catalog.entries()[0].price, MAX_PRICE);
        assert_eq!(
            build.skipped,
            vec![
                SkippedRow { row: 2, reason: SkipReason::InvalidPrice },
                SkippedRow { row: 3, reason: SkipReason::InvalidPrice },
            ]
        );
    }

    #[test]
    fn test_zero_usable_rows_fails() {
        let rows = vec![header(), vec![text("001"), text("Hemograma"), text("n/a")]];
        let err = Catalog::build(&rows, &CatalogSchema::default()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedInput { .. }));
    }

    #[test]
    fn test_missing_code_cell_yields_empty_code() {
        let rows = vec![header(), vec![RawCell::Empty, text("Hemograma"), RawCell::Number(5.0)]];
        let build = Catalog::build(&rows, &CatalogSchema::default()).unwrap();
        assert_eq!(build.catalog.entries()[0].code, "");
    }

    #[test]
    fn test_numeric_code_prints_without_fraction() {
        let rows = vec![header(), vec![RawCell::Number(7.0), text("Hemograma"), RawCell::Number(5.0)]];
        let build = Catalog::build(&rows, &CatalogSchema::default()).unwrap();
        assert_eq!(build.catalog.entries()[0].code, "7");
    }

    #[test]
    fn test_suggestions() {
        let catalog = Catalog::from_entries(vec![
            CatalogEntry {
                code: "001".to_string(),
                name: "Hemograma".to_string(),
                price: Money::from_cents(5000),
            },
            CatalogEntry {
                code: String::new(),
                name: "Glicose".to_string(),
                price: Money::from_cents(3000),
            },
        ]);
        assert_eq!(catalog.suggestions(), vec!["001 - Hemograma", "Glicose"]);
    }
}
