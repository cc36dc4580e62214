//! # Validation Module
//!
//! Input validation and parsing utilities for the order-entry form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form                                                         │
//! │  └── Raw text from the query, quantity, discount and date fields       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Lenient number reading (leading number of the text)               │
//! │  └── Required checks                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Domain (cart, matcher)                                       │
//! │  └── Business rules: quantity ≤ MAX_QUANTITY, query must resolve       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog search query.
///
/// ## Rules
/// - Must not be blank
///
/// ## Returns
/// The trimmed query string.
///
/// ## Example
/// ```rust
/// use quotedesk_core::validation::validate_query;
///
/// assert_eq!(validate_query("  Hemograma ").unwrap(), "Hemograma");
/// assert!(validate_query("   ").is_err());
/// ```
pub fn validate_query(query: &str) -> ValidationResult<&str> {
    let query = query.trim();

    if query.is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }

    Ok(query)
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Reads the leading decimal number of a text, ignoring leading whitespace.
///
/// Accepts an optional sign, digits with an optional `.` fraction and an
/// optional exponent. Trailing text is ignored: `"12abc"` reads as 12.
/// Returns `None` when the text does not start with a number.
///
/// ## Example
/// ```rust
/// use quotedesk_core::validation::parse_decimal_prefix;
///
/// assert_eq!(parse_decimal_prefix(" 12.5%"), Some(12.5));
/// assert_eq!(parse_decimal_prefix("-3"), Some(-3.0));
/// assert_eq!(parse_decimal_prefix(".5"), Some(0.5));
/// assert_eq!(parse_decimal_prefix("abc"), None);
/// ```
pub fn parse_decimal_prefix(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Reads a quantity typed by the user: the leading integer of the text.
///
/// Returns `None` for blank or non-numeric text. Range checks (> 0) are the
/// cart's business.
///
/// ## Example
/// ```rust
/// use quotedesk_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("3"), Some(3));
/// assert_eq!(parse_quantity(" 2 un"), Some(2));
/// assert_eq!(parse_quantity("-1"), Some(-1));
/// assert_eq!(parse_quantity(""), None);
/// ```
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let digits = count_digits(&bytes[sign_len..]);

    if digits == 0 {
        return None;
    }

    text[..sign_len + digits].parse::<i64>().ok()
}

// =============================================================================
// Date Parsers
// =============================================================================

/// Parses a date typed as `yyyy-mm-dd` (date input) or `dd/mm/yyyy`.
///
/// Blank text means "not provided" and yields `Ok(None)`.
pub fn parse_optional_date(field: &str, raw: &str) -> ValidationResult<Option<NaiveDate>> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected yyyy-mm-dd or dd/mm/yyyy".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("001 - Hemograma").unwrap(), "001 - Hemograma");
        assert!(validate_query("").is_err());
        assert!(validate_query(" \t ").is_err());
        assert_eq!(validate_query(&"a".repeat(500)).unwrap().len(), 500);
    }

    #[test]
    fn test_parse_decimal_prefix() {
        assert_eq!(parse_decimal_prefix("10"), Some(10.0));
        assert_eq!(parse_decimal_prefix("10."), Some(10.0));
        assert_eq!(parse_decimal_prefix("1e2"), Some(100.0));
        assert_eq!(parse_decimal_prefix("1e"), Some(1.0));
        assert_eq!(parse_decimal_prefix("+4.25xyz"), Some(4.25));
        assert_eq!(parse_decimal_prefix("."), None);
        assert_eq!(parse_decimal_prefix("-"), None);
        assert_eq!(parse_decimal_prefix(""), None);
        assert_eq!(parse_decimal_prefix("NaN"), None);
        assert_eq!(parse_decimal_prefix("Infinity"), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), Some(5));
        assert_eq!(parse_quantity("0"), Some(0));
        assert_eq!(parse_quantity("2.7"), Some(2));
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity("+"), None);
    }

    #[test]
    fn test_parse_optional_date() {
        let expected = NaiveDate::from_ymd_opt(1990, 4, 23);
        assert_eq!(parse_optional_date("birth date", "1990-04-23").unwrap(), expected);
        assert_eq!(parse_optional_date("birth date", "23/04/1990").unwrap(), expected);
        assert_eq!(parse_optional_date("birth date", "  ").unwrap(), None);
        assert!(parse_optional_date("birth date", "April 23").is_err());
    }
}
