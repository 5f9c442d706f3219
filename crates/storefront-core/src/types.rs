//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │     Order       │   │  DiscountCode   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  sku (identity) │   │  id (UUID)      │   │  code (unique)  │       │
//! │  │  name           │   │  user_id        │   │  percentage_bps │       │
//! │  │  unit_price ¢   │   │  items snapshot │   │  is_redeemed    │       │
//! │  │  quantity       │   │  total ¢        │   │  eligible_order │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  DiscountRate   │   │   StoreStats    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  running totals │                             │
//! │  │  1000 = 10%     │   │  code history   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Orders freeze cart items at checkout time. A later price change on the
//! same SKU never rewrites history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the only rate issued today, but the math stays exact
/// for any future tier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A purchasable line held in a cart or frozen into an order.
///
/// ## Identity
/// `sku` is the identity key within a cart: adding the same SKU again merges
/// into the existing line (quantity sums, name/price take the latest value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Stock Keeping Unit - caller-supplied business identifier.
    pub sku: String,

    /// Display name shown in the cart and on the order.
    pub name: String,

    /// Unit price in cents (smallest currency unit).
    pub unit_price_cents: i64,

    /// Quantity in the cart.
    pub quantity: i64,
}

impl CartItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A finalized purchase. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owner of the cart that was checked out.
    pub user_id: String,

    /// Cart items at checkout time (frozen snapshot).
    pub items: Vec<CartItem>,

    /// Amount charged in cents (gross minus discount).
    pub total_cents: i64,

    /// Discount code redeemed on this order, if any.
    pub discount_code: Option<String>,

    /// Discount amount in cents (0 when no code was used).
    pub discount_cents: i64,

    /// When the order was finalized.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the charged total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the discount amount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the pre-discount gross amount as Money.
    #[inline]
    pub fn gross(&self) -> Money {
        Money::from_cents(self.total_cents + self.discount_cents)
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A promotional code issued to customers.
///
/// ## Lifecycle
/// ```text
/// generate() ──► active (unredeemed) ──► checkout redeems ──► history
///                      │                                        │
///                      └── at most ONE active code exists ──────┘
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// The code string customers type in (e.g. `DISC-7KQ2MW`).
    pub code: String,

    /// Discount granted on redemption, in basis points.
    pub percentage_bps: u32,

    /// When the code was generated.
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,

    /// When the code was redeemed, if it has been.
    #[ts(as = "Option<String>")]
    pub redeemed_at: Option<DateTime<Utc>>,

    /// Whether the code has been redeemed.
    pub is_redeemed: bool,

    /// The order-count threshold that unlocked this code.
    pub eligible_order_number: i64,
}

impl DiscountCode {
    /// Returns the discount rate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.percentage_bps)
    }
}

// =============================================================================
// Store Stats
// =============================================================================

/// Aggregated store metrics for the admin dashboard.
///
/// Running sums are maintained incrementally for O(1) reads, but always
/// equal what re-deriving them from the full order list would produce.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Count of finalized orders.
    pub total_orders: i64,

    /// Sum of item quantities across all orders.
    pub total_items_sold: i64,

    /// Pre-discount revenue across all orders, in cents.
    pub gross_revenue_cents: i64,

    /// Total discount granted across all orders, in cents.
    pub total_discount_given_cents: i64,

    /// All codes ever issued: redeemed history first, then the currently
    /// active code (if any) last.
    pub discount_codes: Vec<DiscountCode>,

    /// The currently active (unredeemed) code, if one exists.
    pub active_discount: Option<DiscountCode>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_cart_item_line_total() {
        let item = CartItem {
            sku: "COKE-330".into(),
            name: "Coca-Cola 330ml".into(),
            unit_price_cents: 250,
            quantity: 4,
        };
        assert_eq!(item.line_total().cents(), 1000);
    }

    #[test]
    fn test_order_gross_recovers_pre_discount_amount() {
        let order = Order {
            id: "test".into(),
            user_id: "u1".into(),
            items: vec![],
            total_cents: 4500,
            discount_code: Some("DISC-ABC234".into()),
            discount_cents: 500,
            created_at: Utc::now(),
        };
        assert_eq!(order.gross().cents(), 5000);
        assert_eq!(order.total().cents(), 4500);
        assert_eq!(order.discount().cents(), 500);
    }
}
