//! # Memory Store
//!
//! The single in-memory store instance behind the whole API.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MemoryStore Operations                             │
//! │                                                                         │
//! │  HTTP handler              Store call               State change        │
//! │  ────────────              ──────────               ────────────        │
//! │                                                                         │
//! │  POST items ─────────────► add_item() ────────────► cart line merged    │
//! │                                                                         │
//! │  GET items ──────────────► view_cart() ───────────► (lazy cart create)  │
//! │                                                                         │
//! │  POST checkout ──────────► checkout() ────────────► order recorded,     │
//! │                                                     cart emptied,       │
//! │                                                     code consumed       │
//! │                                                                         │
//! │  POST generate ──────────► generate_discount() ───► active code set     │
//! │                                                                         │
//! │  GET stats ──────────────► stats() ───────────────► (read only)         │
//! │                                                                         │
//! │  NOTE: every operation takes the one store-wide Mutex for its whole     │
//! │        duration. Two checkouts never interleave, and neither do a       │
//! │        checkout and a generate, for ANY pair of users.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The store is wrapped in `Mutex` because:
//! 1. Request handlers run concurrently, one task per inbound request
//! 2. Checkout reads carts, the ledger and the discount engine together
//!    and must observe them consistently
//! 3. All work under the lock is in-memory arithmetic, so hold times are
//!    bounded and short
//!
//! ## Why Not RwLock?
//! Most operations modify state, and the read-mostly ones (view, stats)
//! are cheap. A RwLock would add complexity with minimal benefit.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::cart::{Cart, CartRegistry};
use crate::discount::DiscountEngine;
use crate::error::{StoreError, StoreResult};
use crate::ledger::OrderLedger;
use crate::money::Money;
use crate::types::{CartItem, DiscountCode, Order, StoreStats};

// =============================================================================
// Store Inner State
// =============================================================================

/// Everything the lock guards. Components are plain structs that never
/// lock on their own; the guard at this level is the only one.
#[derive(Debug)]
struct StoreInner {
    carts: CartRegistry,
    ledger: OrderLedger,
    discounts: DiscountEngine,
}

// =============================================================================
// Memory Store
// =============================================================================

/// The in-memory store. Constructed once at startup and handed to the
/// serving layer by reference - there is no global instance.
///
/// Callers receive snapshots, never references into the store, so nothing
/// outside this module can mutate store state.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

impl MemoryStore {
    /// Creates a store granting a discount code every `nth_order` orders.
    ///
    /// A non-positive `nth_order` falls back to
    /// [`DEFAULT_NTH_ORDER_THRESHOLD`](crate::DEFAULT_NTH_ORDER_THRESHOLD).
    pub fn new(nth_order: i64) -> Self {
        MemoryStore {
            inner: Mutex::new(StoreInner {
                carts: CartRegistry::new(),
                ledger: OrderLedger::new(),
                discounts: DiscountEngine::new(nth_order),
            }),
        }
    }

    /// Acquires the store-wide lock.
    ///
    /// A poisoned mutex means another thread panicked mid-operation; the
    /// store cannot vouch for its invariants after that, so propagating
    /// the panic is the only honest option.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds an item to the user's cart, returning the full updated cart.
    ///
    /// ## Behavior
    /// - SKU already in cart: quantity sums; name and price take the
    ///   latest values
    /// - SKU not in cart: appended as a new line
    ///
    /// ## Errors
    /// [`StoreError::InvalidItem`] for an empty SKU, non-positive price or
    /// quantity, or an over-limit cart.
    pub fn add_item(&self, user_id: &str, item: CartItem) -> StoreResult<Cart> {
        self.lock().carts.add_item(user_id, item)
    }

    /// Returns a snapshot of the user's cart. Never fails.
    ///
    /// First access for a user creates their (empty) cart entry - a view
    /// is enough to register a user, and a later view will find the same
    /// cart. Tests depend on this.
    pub fn view_cart(&self, user_id: &str) -> Cart {
        self.lock().carts.snapshot(user_id)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Finalizes the user's cart into an order, optionally redeeming a
    /// discount code.
    ///
    /// ## Steps (one lock acquisition end to end)
    /// 1. Empty cart → [`StoreError::CartEmpty`]
    /// 2. Snapshot items, compute gross
    /// 3. Code supplied → redeem it; ANY redemption failure aborts the
    ///    whole checkout with nothing mutated
    /// 4. total = gross - discount
    /// 5. Record the order, fold aggregates, empty the cart
    ///
    /// The redemption happens before the ledger append and cart clear, and
    /// nothing after it can fail, so a checkout either lands completely or
    /// not at all.
    ///
    /// An empty code string is treated as "no code supplied".
    pub fn checkout(&self, user_id: &str, discount_code: Option<&str>) -> StoreResult<Order> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        let cart = inner.carts.snapshot(user_id);
        if cart.is_empty() {
            return Err(StoreError::CartEmpty);
        }
        let gross = cart.gross();

        let redemption = match discount_code.filter(|c| !c.is_empty()) {
            Some(code) => Some(inner.discounts.redeem(code)?),
            None => None,
        };

        let (discount, code_used) = match redemption {
            Some(r) => (gross.discount_amount(r.rate), Some(r.code)),
            None => (Money::zero(), None),
        };

        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            items: cart.items,
            total_cents: (gross - discount).cents(),
            discount_code: code_used,
            discount_cents: discount.cents(),
            created_at: Utc::now(),
        };

        inner.ledger.record(order.clone());
        inner.carts.clear(user_id);

        Ok(order)
    }

    // =========================================================================
    // Discount Operations
    // =========================================================================

    /// Generates a new discount code if the store has earned one.
    ///
    /// ## Errors
    /// [`StoreError::DiscountNotEligible`] before the order threshold is
    /// reached, or while a previously generated code is still unredeemed.
    pub fn generate_discount(&self) -> StoreResult<DiscountCode> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let total_orders = inner.ledger.total_orders();
        inner.discounts.generate(total_orders)
    }

    // =========================================================================
    // Stats
    // =========================================================================

    /// Returns the aggregate store metrics. Never fails.
    pub fn stats(&self) -> StoreStats {
        let guard = self.lock();
        StoreStats {
            total_orders: guard.ledger.total_orders(),
            total_items_sold: guard.ledger.total_items_sold(),
            gross_revenue_cents: guard.ledger.gross_revenue().cents(),
            total_discount_given_cents: guard.ledger.total_discount().cents(),
            discount_codes: guard.discounts.all_codes(),
            active_discount: guard.discounts.active().cloned(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, price: i64, qty: i64) -> CartItem {
        CartItem {
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            unit_price_cents: price,
            quantity: qty,
        }
    }

    /// Runs `count` single-item checkouts of `price` cents each.
    fn run_checkouts(store: &MemoryStore, count: usize, price: i64) {
        for n in 0..count {
            let user = format!("user-{n}");
            store.add_item(&user, item("SKU-A", price, 1)).unwrap();
            store.checkout(&user, None).unwrap();
        }
    }

    #[test]
    fn test_checkout_empties_cart_and_snapshots_items() {
        let store = MemoryStore::new(3);
        store.add_item("u1", item("A", 250, 2)).unwrap();
        store.add_item("u1", item("B", 1000, 1)).unwrap();

        let before = store.view_cart("u1");
        let order = store.checkout("u1", None).unwrap();

        assert_eq!(order.items, before.items);
        assert_eq!(order.total_cents, 1500);
        assert_eq!(order.discount_cents, 0);
        assert_eq!(order.discount_code, None);
        assert!(!order.id.is_empty());

        // Cart is empty but still retrievable
        assert!(store.view_cart("u1").is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_fails_without_side_effects() {
        let store = MemoryStore::new(3);
        let err = store.checkout("u1", None).unwrap_err();
        assert!(matches!(err, StoreError::CartEmpty));

        let stats = store.stats();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_items_sold, 0);
        assert_eq!(stats.gross_revenue_cents, 0);
    }

    #[test]
    fn test_checkout_with_code_but_none_active_fails_atomically() {
        let store = MemoryStore::new(3);
        store.add_item("u1", item("A", 500, 2)).unwrap();

        let err = store.checkout("u1", Some("DISC-ABC234")).unwrap_err();
        assert!(matches!(err, StoreError::DiscountNotActive));

        // The failed checkout recorded nothing and kept the cart intact
        let stats = store.stats();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_items_sold, 0);
        assert_eq!(stats.gross_revenue_cents, 0);
        assert_eq!(store.view_cart("u1").total_quantity(), 2);
    }

    #[test]
    fn test_checkout_with_wrong_code_fails_atomically() {
        let store = MemoryStore::new(1);
        run_checkouts(&store, 1, 1000);
        store.generate_discount().unwrap();

        store.add_item("u1", item("A", 500, 1)).unwrap();
        let err = store.checkout("u1", Some("DISC-WRONG2")).unwrap_err();
        assert!(matches!(err, StoreError::DiscountMismatch));

        // Code still active, order count unchanged, cart intact
        let stats = store.stats();
        assert_eq!(stats.total_orders, 1);
        assert!(stats.active_discount.is_some());
        assert!(!store.view_cart("u1").is_empty());
    }

    #[test]
    fn test_empty_code_string_means_no_code() {
        let store = MemoryStore::new(3);
        store.add_item("u1", item("A", 100, 1)).unwrap();

        // An empty string must not trip DiscountNotActive
        let order = store.checkout("u1", Some("")).unwrap();
        assert_eq!(order.discount_cents, 0);
    }

    #[test]
    fn test_generate_needs_threshold_orders() {
        let store = MemoryStore::new(3);
        run_checkouts(&store, 2, 1000);

        assert!(matches!(
            store.generate_discount(),
            Err(StoreError::DiscountNotEligible)
        ));

        run_checkouts(&store, 1, 1000);
        let code = store.generate_discount().unwrap();
        assert_eq!(code.eligible_order_number, 3);

        // Exactly once: the outstanding code blocks another generate
        assert!(matches!(
            store.generate_discount(),
            Err(StoreError::DiscountNotEligible)
        ));
    }

    /// The full advertised scenario: threshold 3, three $10 orders, a 10%
    /// code, a $50 cart redeeming it.
    #[test]
    fn test_nth_order_discount_scenario() {
        let store = MemoryStore::new(3);
        run_checkouts(&store, 3, 1000);
        assert_eq!(store.stats().total_orders, 3);

        let code = store.generate_discount().unwrap();
        assert_eq!(code.percentage_bps, 1000);

        store.add_item("buyer", item("BIG", 5000, 1)).unwrap();
        let order = store.checkout("buyer", Some(&code.code)).unwrap();

        assert_eq!(order.total_cents, 4500); // $45.00
        assert_eq!(order.discount_cents, 500); // $5.00
        assert_eq!(order.discount_code.as_deref(), Some(code.code.as_str()));

        let stats = store.stats();
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.total_discount_given_cents, 500);
        assert_eq!(stats.gross_revenue_cents, 3000 + 5000);
        assert!(stats.active_discount.is_none());

        // Next eligibility is at 6 orders; 4 is not enough
        assert!(matches!(
            store.generate_discount(),
            Err(StoreError::DiscountNotEligible)
        ));
    }

    #[test]
    fn test_code_cannot_be_redeemed_twice() {
        let store = MemoryStore::new(1);
        run_checkouts(&store, 1, 1000);
        let code = store.generate_discount().unwrap();

        store.add_item("u1", item("A", 1000, 1)).unwrap();
        store.checkout("u1", Some(&code.code)).unwrap();

        // Replaying the same string finds an empty slot
        store.add_item("u2", item("B", 1000, 1)).unwrap();
        let err = store.checkout("u2", Some(&code.code)).unwrap_err();
        assert!(matches!(err, StoreError::DiscountNotActive));
    }

    #[test]
    fn test_view_cart_lazily_creates_entry() {
        let store = MemoryStore::new(3);
        let cart = store.view_cart("fresh-user");
        assert!(cart.is_empty());

        // The view registered the user; adding then viewing agrees
        store.add_item("fresh-user", item("A", 100, 1)).unwrap();
        assert_eq!(store.view_cart("fresh-user").total_quantity(), 1);
    }

    #[test]
    fn test_stats_history_orders_redeemed_before_active() {
        let store = MemoryStore::new(1);
        run_checkouts(&store, 1, 1000);
        let first = store.generate_discount().unwrap();

        store.add_item("u1", item("A", 1000, 1)).unwrap();
        store.checkout("u1", Some(&first.code)).unwrap();

        let second = store.generate_discount().unwrap();

        let stats = store.stats();
        assert_eq!(stats.discount_codes.len(), 2);
        assert_eq!(stats.discount_codes[0].code, first.code);
        assert!(stats.discount_codes[0].is_redeemed);
        assert_eq!(stats.discount_codes[1].code, second.code);
        assert!(!stats.discount_codes[1].is_redeemed);
        assert_eq!(
            stats.active_discount.as_ref().map(|c| c.code.as_str()),
            Some(second.code.as_str())
        );
    }

    #[test]
    fn test_add_item_quantities_sum_across_calls() {
        let store = MemoryStore::new(3);
        store.add_item("u1", item("A", 100, 1)).unwrap();
        store.add_item("u1", item("A", 120, 4)).unwrap();
        let cart = store.add_item("u1", item("A", 110, 2)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 7);
        assert_eq!(cart.items[0].unit_price_cents, 110);
    }

    #[test]
    fn test_invalid_item_rejected_by_store() {
        let store = MemoryStore::new(3);
        assert!(matches!(
            store.add_item("u1", item("", 100, 1)),
            Err(StoreError::InvalidItem(_))
        ));
        assert!(store.add_item("u1", item("A", -1, 1)).is_err());
        assert!(store.add_item("u1", item("A", 100, 0)).is_err());
    }

    #[test]
    fn test_concurrent_checkouts_keep_aggregates_consistent() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new(1000)); // no discounts in play
        let mut handles = Vec::new();
        for t in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for n in 0..25 {
                    let user = format!("t{t}-u{n}");
                    store.add_item(&user, item("A", 100, 2)).unwrap();
                    store.checkout(&user, None).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = store.stats();
        assert_eq!(stats.total_orders, 200);
        assert_eq!(stats.total_items_sold, 400);
        assert_eq!(stats.gross_revenue_cents, 200 * 200);
        assert_eq!(stats.total_discount_given_cents, 0);
    }
}
