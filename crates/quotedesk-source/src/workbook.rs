//! # Workbook Decoding
//!
//! Reads the first worksheet of a spreadsheet file (`.xlsx`, `.xls`, `.ods`)
//! into raw rows. The workbook already knows which cells are numbers, so no
//! guessing is needed here.
//!
//! ## Cell Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Empty                      ──► RawCell::Empty                          │
//! │  Int / Float                ──► RawCell::Number                         │
//! │  DateTime (serial)          ──► RawCell::Number  (serial day count)     │
//! │  String / ISO date / Bool   ──► RawCell::Text                           │
//! │  Error (#N/A, #REF!, ...)   ──► RawCell::Text    (price rows then skip) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use quotedesk_core::{RawCell, RawRow};

use crate::error::{SourceError, SourceResult};

/// Decodes workbook bytes into the rows of the first worksheet.
///
/// ## Errors
/// - `SourceError::Workbook` when the bytes are not a readable workbook
/// - `SourceError::EmptyWorkbook` when it has no worksheet
pub fn parse_workbook(bytes: Vec<u8>) -> SourceResult<Vec<RawRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let first = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or(SourceError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(&first)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect())
}

/// Types one workbook cell.
pub fn data_to_cell(data: &Data) -> RawCell {
    match data {
        Data::Empty => RawCell::Empty,
        Data::Int(n) => RawCell::Number(*n as f64),
        Data::Float(n) => RawCell::Number(*n),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::text(s.as_str()),
        Data::Bool(b) => RawCell::text(b.to_string()),
        Data::Error(e) => RawCell::text(e.to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_data_to_cell() {
        assert_eq!(data_to_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(data_to_cell(&Data::Int(50)), RawCell::Number(50.0));
        assert_eq!(data_to_cell(&Data::Float(12.5)), RawCell::Number(12.5));
        assert_eq!(
            data_to_cell(&Data::String("001".to_string())),
            RawCell::Text("001".to_string())
        );
        assert_eq!(data_to_cell(&Data::String("  ".to_string())), RawCell::Empty);
        assert_eq!(data_to_cell(&Data::Bool(true)), RawCell::Text("true".to_string()));
    }

    #[test]
    fn test_error_cells_become_text() {
        let cell = data_to_cell(&Data::Error(CellErrorType::NA));
        assert!(matches!(cell, RawCell::Text(ref s) if s.starts_with('#')));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let err = parse_workbook(b"not a workbook".to_vec()).unwrap_err();
        assert!(matches!(err, SourceError::Workbook(_)));
    }
}
