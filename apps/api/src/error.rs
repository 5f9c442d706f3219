//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Storefront                             │
//! │                                                                         │
//! │  Client                       Rust Backend                              │
//! │  ──────                       ────────────                              │
//! │                                                                         │
//! │  POST /api/cart/u1/checkout                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler                                                         │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  StoreError::DiscountMismatch ──► ApiError ──► 422 + JSON body   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "DISCOUNT_MISMATCH", "message": "discount code mismatch" }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! | Store error            | HTTP status               |
//! |------------------------|---------------------------|
//! | `InvalidItem`          | 400 Bad Request           |
//! | `CartEmpty`            | 400 Bad Request           |
//! | `DiscountNotActive`    | 422 Unprocessable Entity  |
//! | `DiscountAlreadyUsed`  | 422 Unprocessable Entity  |
//! | `DiscountMismatch`     | 422 Unprocessable Entity  |
//! | `DiscountNotEligible`  | 409 Conflict              |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use storefront_core::StoreError;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what clients receive when a request fails:
/// ```json
/// {
///   "code": "CART_EMPTY",
///   "message": "cart is empty"
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
///
/// ## Usage in Frontend
/// ```typescript
/// const res = await fetch(checkoutUrl, { method: 'POST', body });
/// if (!res.ok) {
///   const err = await res.json();
///   switch (err.code) {
///     case 'DISCOUNT_MISMATCH':
///       showNotification('That code is not valid');
///       break;
///     case 'CART_EMPTY':
///       showNotification('Add something first');
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed cart item (400)
    InvalidItem,

    /// Checkout on an empty cart (400)
    CartEmpty,

    /// No discount code is active (422)
    DiscountNotActive,

    /// The active code was already redeemed (422)
    DiscountAlreadyUsed,

    /// Supplied code does not match the active one (422)
    DiscountMismatch,

    /// Code generation before eligibility (409)
    DiscountNotEligible,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidItem | ErrorCode::CartEmpty => StatusCode::BAD_REQUEST,
            ErrorCode::DiscountNotActive
            | ErrorCode::DiscountAlreadyUsed
            | ErrorCode::DiscountMismatch => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::DiscountNotEligible => StatusCode::CONFLICT,
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::InvalidItem(_) => ErrorCode::InvalidItem,
            StoreError::CartEmpty => ErrorCode::CartEmpty,
            StoreError::DiscountNotActive => ErrorCode::DiscountNotActive,
            StoreError::DiscountAlreadyUsed => ErrorCode::DiscountAlreadyUsed,
            StoreError::DiscountMismatch => ErrorCode::DiscountMismatch,
            StoreError::DiscountNotEligible => ErrorCode::DiscountNotEligible,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Renders the error as an HTTP response with a JSON body.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
