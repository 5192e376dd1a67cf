//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally POS                              │
//! │                                                                         │
//! │  Presentation                Register Host                              │
//! │  ────────────                ─────────────                              │
//! │                                                                         │
//! │  commit_sale(...)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Registry Error? ── CoreError::InsufficientStock ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "INSUFFICIENT_STOCK", "message": "..." }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// API error returned from register commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 404"
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
    /// Product or sale not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Product code already registered
    DuplicateCode,

    /// Not enough stock for a line or a commit
    InsufficientStock,

    /// Sale is not in a state that allows the operation
    InvalidState,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(code) => ApiError::not_found("Product", &code),
            CoreError::SaleNotFound(id) => ApiError::not_found("Sale", &id),
            CoreError::DuplicateCode { code } => ApiError::new(
                ErrorCode::DuplicateCode,
                format!("A product with code {} already exists", code),
            ),
            CoreError::InsufficientStock {
                code,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    code, available, requested
                ),
            ),
            CoreError::InvalidSaleStatus {
                sale_id,
                current_status,
            } => ApiError::new(
                ErrorCode::InvalidState,
                format!("Sale {} is {}", sale_id, current_status),
            ),
            CoreError::SaleTooLarge { max } => {
                ApiError::validation(format!("A sale cannot have more than {} lines", max))
            }
            CoreError::AmountOverflow { context } => {
                ApiError::validation(format!("Amount too large: {}", context))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Errors that stop the register from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not seed the sample catalog: {0}")]
    Seed(#[from] CoreError),

    #[error("could not serialize the catalog summary: {0}")]
    Summary(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::DuplicateCode {
            code: "001".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::DuplicateCode);

        let err: ApiError = CoreError::InsufficientStock {
            code: "002".to_string(),
            available: 2,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(
            err.message,
            "Insufficient stock for 002: 2 available, 5 requested"
        );

        let err: ApiError = CoreError::ProductNotFound("404".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 404");

        let err: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "price".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "price must be positive");

        let err: ApiError = CoreError::AmountOverflow {
            context: "cash balance".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Amount too large: cash balance");
    }

    #[test]
    fn test_api_error_serialization() {
        let err = ApiError::not_found("Sale", "abc");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Sale not found: abc");

        let json = serde_json::to_value(ApiError::new(ErrorCode::InsufficientStock, "x")).unwrap();
        assert_eq!(json["code"], "INSUFFICIENT_STOCK");
    }

    #[test]
    fn test_display() {
        let err = ApiError::validation("Sale has no items");
        assert_eq!(err.to_string(), "[ValidationError] Sale has no items");
    }
}
