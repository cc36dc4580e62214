//! # Entry Matcher
//!
//! Resolves free-form text to a single catalog entry.
//!
//! ## Resolution Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  query: "001 - Hemograma" | "hemograma" | "001" | "hemo"                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. CodePrefix  "<token> - <rest>"  → token == code (case-insensitive) │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  2. Exact       normalized name == query   OR  code == query           │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  3. Partial     normalized name ⊇ query    OR  code ⊇ query            │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  4. Label       query == "<code> - <name>"  (codes containing a dash)   │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  None                                                                   │
//! │                                                                         │
//! │  Each tier scans the whole catalog in order; first hit wins.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller never needs to know whether the user typed a name, a code, or
//! picked a `"<code> - <name>"` suggestion.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::normalize::{fold_code, normalize};
use crate::types::CatalogEntry;

/// `<token><dash><rest>`; hyphen, en dash and em dash all separate.
static CODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^-–—]+?)\s*[-–—]\s*(.+?)\s*$").expect("code prefix pattern is valid")
});

/// Which tier resolved a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Code taken from a `"<code> - <name>"` label.
    CodePrefix,
    /// Whole name or whole code.
    Exact,
    /// Name or code contains the query.
    Partial,
    /// Whole suggestion label, for codes the prefix split cannot isolate.
    Label,
}

/// A resolved query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub entry: &'a CatalogEntry,
    pub tier: MatchTier,
}

/// Extracts the code token of a `"<code> - <name>"` text.
///
/// ## Example
/// ```rust
/// use quotedesk_core::matcher::extract_code_token;
///
/// assert_eq!(extract_code_token("001 - Hemograma"), Some("001"));
/// assert_eq!(extract_code_token("  A12 – Glicose "), Some("A12"));
/// assert_eq!(extract_code_token("Hemograma"), None);
/// ```
pub fn extract_code_token(text: &str) -> Option<&str> {
    CODE_PREFIX
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|token| !token.is_empty())
}

/// Resolves `query` against `catalog`, reporting the tier that matched.
///
/// Blank queries resolve to nothing.
pub fn resolve<'a>(query: &str, catalog: &'a Catalog) -> Option<Match<'a>> {
    let raw = query.trim();
    if raw.is_empty() {
        return None;
    }

    let entries = catalog.entries();

    if let Some(token) = extract_code_token(raw) {
        let token = fold_code(token);
        if let Some(entry) = entries.iter().find(|e| fold_code(&e.code) == token) {
            return Some(Match {
                entry,
                tier: MatchTier::CodePrefix,
            });
        }
    }

    let wanted_name = normalize(raw);
    let wanted_code = fold_code(raw);

    let exact = entries
        .iter()
        .find(|e| normalize(&e.name) == wanted_name || fold_code(&e.code) == wanted_code);
    if let Some(entry) = exact {
        return Some(Match {
            entry,
            tier: MatchTier::Exact,
        });
    }

    let partial = entries.iter().find(|e| {
        normalize(&e.name).contains(&wanted_name) || fold_code(&e.code).contains(&wanted_code)
    });
    if let Some(entry) = partial {
        return Some(Match {
            entry,
            tier: MatchTier::Partial,
        });
    }

    // "HB-10 - Hemoglobina" splits at the first dash, so tier 1 sees "HB"
    entries
        .iter()
        .find(|e| normalize(&e.label()) == wanted_name)
        .map(|entry| Match {
            entry,
            tier: MatchTier::Label,
        })
}

/// Resolves `query` against `catalog`.
pub fn find<'a>(query: &str, catalog: &'a Catalog) -> Option<&'a CatalogEntry> {
    resolve(query, catalog).map(|m| m.entry)
}

// =============================================================================
// Unit Tests
// =============================================================================
