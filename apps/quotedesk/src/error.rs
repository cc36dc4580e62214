//! # API Error Type
//!
//! Unified error type for app commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in QuoteDesk                              │
//! │                                                                         │
//! │  Shell                       Commands                                   │
//! │  ─────                       ────────                                   │
//! │                                                                         │
//! │  "add 0 10 hemograma"                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Source Error? ─── SourceError::NotFound { path } ──┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Core Error? ──── CoreError::InvalidQuantity ───── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  shell prints `message` inline and waits for the next command          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! `ApiError` implements `Serialize` so a browser front end can receive both a
//! machine-readable `code` and a human-readable `message`.

use serde::Serialize;
use quotedesk_core::{CoreError, ValidationError};
use quotedesk_source::SourceError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "No catalog entry matches 'hemo'"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Query resolved to no catalog entry
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Quantity missing, zero, negative or above the per-line limit
    InvalidQuantity,

    /// Export requested with an empty cart
    EmptyCart,

    /// Cart or lookup used before a catalog was loaded
    CatalogUnavailable,

    /// Catalog export could not be read or built
    CatalogError,

    /// Writing the document failed
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::MalformedInput { .. } => ErrorCode::CatalogError,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::InvalidQuantity { .. } | CoreError::QuantityTooLarge { .. } => {
                ErrorCode::InvalidQuantity
            }
            CoreError::AmountOverflow => ErrorCode::ValidationError,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::CatalogUnavailable => ErrorCode::CatalogUnavailable,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts catalog source errors to API errors.
impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Catalog(core) => ApiError::from(core),
            SourceError::Io(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Catalog read failed: {}", e);
                ApiError::new(ErrorCode::CatalogError, "Could not read the catalog file")
            }
            other => ApiError::new(ErrorCode::CatalogError, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
