//! # Cart Registry
//!
//! Per-user shopping carts.
//!
//! ## Invariants
//! - Items are unique by `sku` (adding the same SKU merges into the line)
//! - A cart is created lazily the first time a user is seen, including on
//!   plain reads, and is never deleted - checkout empties it but the entry
//!   stays for the lifetime of the process
//! - All access happens under the store lock; nothing here locks

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::StoreResult;
use crate::money::Money;
use crate::types::CartItem;
use crate::validation;

// =============================================================================
// Cart
// =============================================================================

/// The items a single user has pending checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart lines, unique by SKU.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct SKUs in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the gross amount (sum of line totals, before discount).
    pub fn gross(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Merges an item into the cart.
    ///
    /// ## Behavior
    /// - SKU already present: quantity is summed; name and price take the
    ///   latest values (the newest add wins a price change)
    /// - SKU not present: appended as a new line
    fn merge(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.sku == item.sku) {
            existing.quantity += item.quantity;
            existing.unit_price_cents = item.unit_price_cents;
            existing.name = item.name;
        } else {
            self.items.push(item);
        }
    }

    /// Empties the cart. The cart itself remains usable.
    fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Cart Registry
// =============================================================================

/// Maps user identifiers to their carts.
#[derive(Debug, Default)]
pub(crate) struct CartRegistry {
    carts: HashMap<String, Cart>,
}

impl CartRegistry {
    pub(crate) fn new() -> Self {
        CartRegistry {
            carts: HashMap::new(),
        }
    }

    /// Fetches the user's cart, creating an empty one on first access.
    ///
    /// Deliberately also used by read paths: viewing a cart registers the
    /// user. Callers depend on a viewed cart being retrievable afterwards.
    fn get_or_create(&mut self, user_id: &str) -> &mut Cart {
        self.carts.entry(user_id.to_string()).or_default()
    }

    /// Validates and merges an item into the user's cart, returning the
    /// full updated cart snapshot.
    pub(crate) fn add_item(&mut self, user_id: &str, item: CartItem) -> StoreResult<Cart> {
        validation::validate_item(&item)?;

        let cart = self.get_or_create(user_id);
        let is_new_line = !cart.items.iter().any(|i| i.sku == item.sku);
        if is_new_line {
            validation::validate_cart_size(cart.item_count())?;
        }

        cart.merge(item);
        Ok(cart.clone())
    }

    /// Returns a snapshot of the user's (possibly empty) cart. Never fails.
    pub(crate) fn snapshot(&mut self, user_id: &str) -> Cart {
        self.get_or_create(user_id).clone()
    }

    /// Empties the user's cart after a successful checkout.
    pub(crate) fn clear(&mut self, user_id: &str) {
        self.get_or_create(user_id).clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
