//! # storefront-core: Pure Business Logic for Storefront
//!
//! This crate is the **heart** of Storefront. It contains the in-memory
//! store and all business rules as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront Frontend (JS)                     │   │
//! │  │     Cart UI ──► Checkout UI ──► Admin Dashboard                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                      apps/api (Axum)                            │   │
//! │  │    route parsing, status-code mapping, request logging          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │   cart   │ │  ledger  │ │    discount      │  │   │
//! │  │   │  Money   │ │  Carts   │ │  Orders  │ │  Code lifecycle  │  │   │
//! │  │   │  Rates   │ │  per user│ │  Totals  │ │  Eligibility     │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────────────────────────────────────────────┐  │   │
//! │  │   │  store: MemoryStore - one lock around all of the above  │  │   │
//! │  │   └─────────────────────────────────────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • IN-MEMORY ONLY           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartItem, Order, DiscountCode, StoreStats)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Per-user cart registry
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`store`] - The MemoryStore facade the serving layer talks to
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 2. **Snapshots Out**: Callers receive copies, never references into the store
//! 3. **One Lock**: Every public operation runs under a single exclusive lock
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartItem, MemoryStore};
//!
//! let store = MemoryStore::new(3); // discount every 3rd order
//!
//! let cart = store
//!     .add_item(
//!         "user-1",
//!         CartItem {
//!             sku: "COKE-330".into(),
//!             name: "Coca-Cola 330ml".into(),
//!             unit_price_cents: 250,
//!             quantity: 2,
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(cart.total_quantity(), 2);
//!
//! let order = store.checkout("user-1", None).unwrap();
//! assert_eq!(order.total_cents, 500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
mod discount;
pub mod error;
mod ledger;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use cart::Cart;
pub use error::{StoreError, StoreResult, ValidationError};
pub use money::Money;
pub use store::MemoryStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fallback "every Nth order" threshold when the configured value is not
/// a positive number.
pub const DEFAULT_NTH_ORDER_THRESHOLD: i64 = 5;

/// Discount percentage granted by generated codes, in basis points.
/// 1000 bps = 10%. Every code carries this rate; there are no tiers.
pub const DISCOUNT_RATE_BPS: u32 = 1000;

/// Maximum distinct SKUs allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity accepted by a single add-to-cart call
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Repeated adds may still accumulate beyond this per-call cap.
pub const MAX_ITEM_QUANTITY: i64 = 999;
