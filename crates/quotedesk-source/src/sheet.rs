//! # CSV Sheet Decoding
//!
//! Turns the text of a CSV export into raw rows, typing each cell the way the
//! spreadsheet it came from would.
//!
//! ## Cell Typing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "" / "   "          ──► RawCell::Empty                                 │
//! │  "50" "12.5" "-3"    ──► RawCell::Number   (plain numeric literal)      │
//! │  "001" "1e3"         ──► RawCell::Text     (zero-padded codes stay text)│
//! │  "R$ 1.234,50"       ──► RawCell::Text     (core parses it as a price)  │
//! │  "Hemograma"         ──► RawCell::Text                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Brazilian spreadsheet tools export with `;` as the field separator; the
//! separator is picked from the first line. Excel on Windows saves "CSV"
//! in Windows-1252 rather than UTF-8, so [`decode_export`] falls back to it.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use quotedesk_core::{RawCell, RawRow};
use regex::Regex;

use crate::error::SourceResult;

/// Plain decimal literal without padding zeros: what a spreadsheet stores as a number.
static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?$").expect("numeric literal pattern is valid")
});

const BOM: char = '\u{feff}';

/// Decodes the bytes of a CSV export.
///
/// Valid UTF-8 (with or without BOM) is used as is; anything else is read as
/// Windows-1252, which maps every byte, so decoding never fails.
///
/// ## Example
/// ```rust
/// use quotedesk_source::sheet::decode_export;
///
/// let (text, encoding) = decode_export(b"C\xD3DIGO;EXAME");
/// assert_eq!(text, "CÓDIGO;EXAME");
/// assert_eq!(encoding.name(), "windows-1252");
/// ```
pub fn decode_export(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), UTF_8),
        Err(_) => (WINDOWS_1252.decode_without_bom_handling(bytes).0, WINDOWS_1252),
    }
}

/// Decodes CSV text into rows. The header row is returned as row 0.
///
/// Rows may have different lengths; quoting follows RFC 4180.
///
/// ## Errors
/// `SourceError::Csv` on malformed quoting.
pub fn parse_csv(content: &str) -> SourceResult<Vec<RawRow>> {
    let content = content.trim_start_matches(BOM);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(content))
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(type_cell).collect());
    }

    Ok(rows)
}

/// `;` when the first line has more semicolons than commas, `,` otherwise.
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or_default();
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Types one CSV field.
pub fn type_cell(field: &str) -> RawCell {
    let trimmed = field.trim();
    if NUMERIC_LITERAL.is_match(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            return RawCell::Number(n);
        }
    }
    RawCell::text(field)
}

// =============================================================================
// Unit Tests
// =============================================================================
