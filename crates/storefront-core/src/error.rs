//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── StoreError       - Caller-facing store operation failures         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  apps/api errors (separate crate)                                      │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → ApiError → JSON body             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is expected and recoverable. Nothing here is fatal to the
//! process, and no operation returns an error after mutating state.

use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Store operation errors.
///
/// These errors represent business rule violations. They should be caught
/// by the serving layer and translated to status codes and user-facing
/// messages.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed cart item: empty SKU or non-positive price/quantity.
    /// The HTTP layer validates too, but the store never trusts its callers.
    #[error("invalid item: {0}")]
    InvalidItem(#[from] ValidationError),

    /// Checkout attempted with no items in the cart.
    #[error("cart is empty")]
    CartEmpty,

    /// A discount code was supplied but none is currently active.
    #[error("no active discount code")]
    DiscountNotActive,

    /// The active code was already redeemed.
    ///
    /// Unreachable while the single-active invariant holds (redemption
    /// clears the slot), but checked anyway.
    #[error("discount code already used")]
    DiscountAlreadyUsed,

    /// The supplied code does not match the active code (case-sensitive).
    #[error("discount code mismatch")]
    DiscountMismatch,

    /// Discount generation requested before the order threshold is reached
    /// or while a code is still outstanding.
    #[error("not eligible to generate discount code yet")]
    DiscountNotEligible,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
