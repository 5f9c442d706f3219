//! # Order Ledger
//!
//! Append-only record of finalized orders plus running aggregates.
//!
//! ## Aggregate Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Counters are updated in exactly one place: record().                   │
//! │                                                                         │
//! │  record(order) ──► orders.push                                          │
//! │                ──► total_items_sold += Σ quantity                       │
//! │                ──► gross_revenue    += order gross (pre-discount)       │
//! │                ──► total_discount   += order discount                   │
//! │                                                                         │
//! │  Incremental sums give O(1) stats reads, but must always equal what    │
//! │  re-deriving from `orders` would produce. Tests assert both.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `record` has no failure modes: the checkout orchestrator only calls it
//! after every check has passed, while holding the store lock.

use crate::money::Money;
use crate::types::Order;

/// The append-only order log with its running totals.
#[derive(Debug, Default)]
pub(crate) struct OrderLedger {
    orders: Vec<Order>,
    total_items_sold: i64,
    gross_revenue: Money,
    total_discount: Money,
}

impl OrderLedger {
    pub(crate) fn new() -> Self {
        OrderLedger::default()
    }

    /// Appends a finalized order and folds it into the aggregates.
    pub(crate) fn record(&mut self, order: Order) {
        self.total_items_sold += order.total_quantity();
        self.gross_revenue += order.gross();
        self.total_discount += order.discount();
        self.orders.push(order);
    }

    /// Count of finalized orders.
    pub(crate) fn total_orders(&self) -> i64 {
        self.orders.len() as i64
    }

    /// Sum of item quantities across all orders.
    pub(crate) fn total_items_sold(&self) -> i64 {
        self.total_items_sold
    }

    /// Pre-discount revenue across all orders.
    pub(crate) fn gross_revenue(&self) -> Money {
        self.gross_revenue
    }

    /// Total discount granted across all orders.
    pub(crate) fn total_discount(&self) -> Money {
        self.total_discount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CartItem;
    use chrono::Utc;

    fn order(total: i64, discount: i64, quantities: &[i64]) -> Order {
        Order {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u1".into(),
            items: quantities
                .iter()
                .enumerate()
                .map(|(n, &q)| CartItem {
                    sku: format!("SKU-{n}"),
                    name: "Item".into(),
                    unit_price_cents: 100,
                    quantity: q,
                })
                .collect(),
            total_cents: total,
            discount_code: None,
            discount_cents: discount,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = OrderLedger::new();
        assert_eq!(ledger.total_orders(), 0);
        assert_eq!(ledger.total_items_sold(), 0);
        assert_eq!(ledger.gross_revenue().cents(), 0);
        assert_eq!(ledger.total_discount().cents(), 0);
    }

    #[test]
    fn test_record_accumulates_aggregates() {
        let mut ledger = OrderLedger::new();
        ledger.record(order(1000, 0, &[2, 3]));
        ledger.record(order(4500, 500, &[1]));

        assert_eq!(ledger.total_orders(), 2);
        assert_eq!(ledger.total_items_sold(), 6);
        // Gross is pre-discount: 1000 + (4500 + 500)
        assert_eq!(ledger.gross_revenue().cents(), 6000);
        assert_eq!(ledger.total_discount().cents(), 500);
    }

    #[test]
    fn test_aggregates_match_rederivation() {
        let mut ledger = OrderLedger::new();
        ledger.record(order(999, 0, &[1, 1, 1]));
        ledger.record(order(1798, 200, &[4]));
        ledger.record(order(50, 0, &[2]));

        let derived_items: i64 = ledger.orders.iter().map(Order::total_quantity).sum();
        let derived_gross: i64 = ledger.orders.iter().map(|o| o.gross().cents()).sum();
        let derived_discount: i64 = ledger.orders.iter().map(|o| o.discount().cents()).sum();

        assert_eq!(ledger.total_items_sold(), derived_items);
        assert_eq!(ledger.gross_revenue().cents(), derived_gross);
        assert_eq!(ledger.total_discount().cents(), derived_discount);
    }
}
