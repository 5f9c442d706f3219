//! # Routes
//!
//! Router construction and shared application state.
//!
//! ## Route Tree
//! ```text
//! /api
//! ├── /health                          GET   liveness probe
//! ├── /cart/{user_id}
//! │   ├── /items                       POST  add item, GET view cart
//! │   └── /checkout                    POST  finalize order
//! └── /admin
//!     ├── /discounts/generate          POST  issue a discount code
//!     └── /stats                       GET   aggregate metrics
//! ```

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use storefront_core::MemoryStore;

pub mod admin;
pub mod cart;

/// Shared application state handed to every handler.
///
/// The store carries its own lock; state is cloned as an `Arc` per
/// request task.
pub struct AppState {
    pub store: MemoryStore,
}

/// Builds the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/cart/{user_id}/items",
            post(cart::add_item).get(cart::view_cart),
        )
        .route("/api/cart/{user_id}/checkout", post(cart::checkout))
        .route("/api/admin/discounts/generate", post(admin::generate_discount))
        .route("/api/admin/stats", get(admin::stats))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
