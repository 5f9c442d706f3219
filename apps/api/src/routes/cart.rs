//! # Cart Routes
//!
//! Handlers for cart manipulation and checkout.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/cart/{user_id}/items     { sku, name, unitPriceCents,       │
//! │                                       quantity }                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate here (fast 400) ──► store validates again (never trusts us)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  201 Created + full cart snapshot                                      │
//! │                                                                         │
//! │  POST /api/cart/{user_id}/checkout  { discountCode? }   body optional  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  200 OK + order, or 400/422 with a typed error body                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use storefront_core::{Cart, CartItem, Order};

use crate::error::ApiError;
use crate::routes::AppState;

/// Body of an add-item request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub sku: String,
    #[serde(default)]
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

/// Body of a checkout request. The whole body may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutRequest {
    pub discount_code: Option<String>,
}

/// Adds an item to the user's cart.
///
/// ## Returns
/// `201 Created` with the full updated cart snapshot.
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<Cart>), ApiError> {
    debug!(user_id = %user_id, sku = %req.sku, quantity = req.quantity, "add item");

    let cart = state.store.add_item(
        &user_id,
        CartItem {
            sku: req.sku,
            name: req.name,
            unit_price_cents: req.unit_price_cents,
            quantity: req.quantity,
        },
    )?;

    Ok((StatusCode::CREATED, Json(cart)))
}

/// Returns the user's current cart. Never fails; an unknown user gets a
/// fresh empty cart.
pub async fn view_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Cart> {
    debug!(user_id = %user_id, "view cart");
    Json(state.store.view_cart(&user_id))
}

/// Finalizes the user's cart into an order.
///
/// The body is optional; an absent body or empty `discountCode` means no
/// code is being redeemed.
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    body: Option<Json<CheckoutRequest>>,
) -> Result<Json<Order>, ApiError> {
    let discount_code = body.and_then(|Json(req)| req.discount_code);
    debug!(
        user_id = %user_id,
        with_code = discount_code.is_some(),
        "checkout"
    );

    let order = state.store.checkout(&user_id, discount_code.as_deref())?;
    Ok(Json(order))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::MemoryStore;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            store: MemoryStore::new(3),
        })
    }

    fn add_req(sku: &str, price: i64, qty: i64) -> AddItemRequest {
        AddItemRequest {
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            unit_price_cents: price,
            quantity: qty,
        }
    }

    #[tokio::test]
    async fn test_add_item_returns_created_with_cart() {
        let state = test_state();

        let (status, Json(cart)) = add_item(
            State(state),
            Path("u1".to_string()),
            Json(add_req("COKE-330", 250, 2)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_add_item_rejects_bad_quantity() {
        let state = test_state();

        let err = add_item(
            State(state),
            Path("u1".to_string()),
            Json(add_req("COKE-330", 250, 0)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidItem);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_view_cart_unknown_user_is_empty() {
        let state = test_state();
        let Json(cart) = view_cart(State(state), Path("nobody".to_string())).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_without_body() {
        let state = test_state();
        state
            .store
            .add_item(
                "u1",
                CartItem {
                    sku: "A".into(),
                    name: "A".into(),
                    unit_price_cents: 1000,
                    quantity: 1,
                },
            )
            .unwrap();

        let Json(order) = checkout(State(state), Path("u1".to_string()), None)
            .await
            .unwrap();

        assert_eq!(order.total_cents, 1000);
        assert_eq!(order.discount_code, None);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_maps_to_cart_empty() {
        let state = test_state();
        let err = checkout(State(state), Path("u1".to_string()), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartEmpty);
    }

    #[tokio::test]
    async fn test_checkout_with_unknown_code() {
        let state = test_state();
        state
            .store
            .add_item(
                "u1",
                CartItem {
                    sku: "A".into(),
                    name: "A".into(),
                    unit_price_cents: 1000,
                    quantity: 1,
                },
            )
            .unwrap();

        let body = CheckoutRequest {
            discount_code: Some("DISC-ABC234".to_string()),
        };
        let err = checkout(State(state), Path("u1".to_string()), Some(Json(body)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DiscountNotActive);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
