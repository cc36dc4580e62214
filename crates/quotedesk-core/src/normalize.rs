//! # Text Normalizer
//!
//! Canonical comparison keys for catalog names, queries and header cells.
//!
//! ```text
//! "  Hemoglobina   Glicada  "  ──►  "hemoglobina glicada"
//! "ÁCIDO ÚRICO"                ──►  "acido urico"
//! "Código"                     ──►  "codigo"
//! ```
//!
//! Keys are only ever compared, never displayed: the data model keeps the
//! original strings.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Produces the comparison key of a text.
///
/// Trims, lower-cases, decomposes accented characters (NFD) dropping the
/// combining diacritical marks, and collapses whitespace runs to one space.
/// `normalize(normalize(x)) == normalize(x)` for every input.
///
/// ## Example
/// ```rust
/// use quotedesk_core::normalize::normalize;
///
/// assert_eq!(normalize("  Ácido   Úrico "), "acido urico");
/// assert_eq!(normalize("GLICOSE"), "glicose");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_diacritic(c: char) -> bool {
    DIACRITICS.contains(&c)
}

/// Trimmed, case-folded code, for code comparisons.
///
/// Codes keep their accents and inner spacing; only case and surrounding
/// whitespace are ignored.
pub fn fold_code(code: &str) -> String {
    code.trim().to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================
