//! # Gateway Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Gateway                            │
//! │                                                                         │
//! │  Handler: Result<Json<T>, GatewayError>                                 │
//! │         │                                                               │
//! │         ├── bad JSON / query ───── InvalidRequest ──┐                   │
//! │         ├── CoreError::ItemNotFound ── NotFound ────┤                   │
//! │         ├── CoreError (other) ──── Validation ──────┼──► IntoResponse   │
//! │         ├── ValidationError ────── Validation ──────┤     status +      │
//! │         └── TableError ──────────── TableError ─────┘     JSON body     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "Item not found: 42"
//! }
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use storefront_core::{CoreError, TableError, ValidationError};

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart limits exceeded (400)
    CartError,

    /// Bad table column or page size (400)
    TableError,
}

/// JSON body sent with every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// Gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        GatewayError::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Core(CoreError::ItemNotFound(_)) => ErrorCode::NotFound,
            GatewayError::Core(CoreError::CartTooLarge { .. }) => ErrorCode::CartError,
            GatewayError::Core(_) => ErrorCode::ValidationError,
            GatewayError::Table(_) => ErrorCode::TableError,
            GatewayError::Validation(_) => ErrorCode::ValidationError,
            GatewayError::NotFound { .. } => ErrorCode::NotFound,
            GatewayError::InvalidRequest(_) => ErrorCode::ValidationError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code() {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::CartError | ErrorCode::TableError => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request failed");

        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::from(CoreError::ItemNotFound("9".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::from(CoreError::NegativeQuantity {
                id: "1".into(),
                requested: -2
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::from(TableError::InvalidPageSize).code(),
            ErrorCode::TableError
        );
        assert_eq!(
            GatewayError::not_found("Product", "42").to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            GatewayError::from(CoreError::AmountOverflow {
                at: "subtotal".into()
            })
            .code(),
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ValidationError).unwrap();
        assert_eq!(json, "\"VALIDATION_ERROR\"");
    }
}
