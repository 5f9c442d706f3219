//! # Admin Routes
//!
//! Discount code issuance and the stats dashboard feed.
//!
//! No authentication: the admin surface is expected to sit behind the
//! deployment's own access control, not this process.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use storefront_core::{DiscountCode, StoreStats};

use crate::error::ApiError;
use crate::routes::AppState;

/// Issues a new discount code if the store has earned one.
///
/// ## Returns
/// `201 Created` with the code, or `409 Conflict` while the store is not
/// eligible (threshold not reached, or a code is still outstanding).
pub async fn generate_discount(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<DiscountCode>), ApiError> {
    let code = state.store.generate_discount()?;
    info!(code = %code.code, eligible_order = code.eligible_order_number, "discount code issued");
    Ok((StatusCode::CREATED, Json(code)))
}

/// Returns aggregate store metrics. Never fails.
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StoreStats> {
    debug!("stats requested");
    Json(state.store.stats())
}

// =============================================================================
// Unit Tests
// =============================================================================
