//! # Discount Engine
//!
//! Tracks discount eligibility and the code lifecycle.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Discount Code Lifecycle                            │
//! │                                                                         │
//! │                 total_orders >= next_eligible_order                     │
//! │  ┌──────────────┐        generate()         ┌──────────────────┐       │
//! │  │ NoActiveCode │──────────────────────────►│ ActiveUnredeemed │       │
//! │  └──────────────┘                           └────────┬─────────┘       │
//! │         ▲                                            │                  │
//! │         │         redeem(code) at checkout           │                  │
//! │         │   • stamp redeemed_at, move to history     │                  │
//! │         │   • next_eligible_order += threshold       │                  │
//! │         └────────────────────────────────────────────┘                  │
//! │                                                                         │
//! │  generate() while a code is active, or before the threshold,           │
//! │  fails with DiscountNotEligible. Codes never expire.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use rand::Rng;

use crate::error::{StoreError, StoreResult};
use crate::types::{DiscountCode, DiscountRate};
use crate::{DEFAULT_NTH_ORDER_THRESHOLD, DISCOUNT_RATE_BPS};

// =============================================================================
// Code Format
// =============================================================================

/// Prefix on every generated code.
const CODE_PREFIX: &str = "DISC-";

/// Length of the random suffix.
const CODE_SUFFIX_LEN: usize = 6;

/// Alphabet for code suffixes. Excludes 0/O and 1/I so codes survive being
/// read aloud or copied from a receipt.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

// =============================================================================
// Redemption
// =============================================================================

/// What a successful redemption hands back to the checkout orchestrator.
#[derive(Debug)]
pub(crate) struct Redemption {
    /// The code string that was consumed.
    pub code: String,
    /// The rate to apply to the order's gross amount.
    pub rate: DiscountRate,
}

// =============================================================================
// Discount Engine
// =============================================================================

/// Owns the eligibility counter, the single active code slot, and the
/// history of redeemed codes.
#[derive(Debug)]
pub(crate) struct DiscountEngine {
    /// Configured "every Nth order" interval.
    threshold: i64,
    /// Order count that must be reached before the next generate() works.
    /// Monotonically non-decreasing; advances only on redemption.
    next_eligible_order: i64,
    /// The single outstanding unredeemed code, if any.
    active: Option<DiscountCode>,
    /// Redeemed codes, oldest first.
    history: Vec<DiscountCode>,
}

impl DiscountEngine {
    /// Creates an engine for the given "every Nth order" interval.
    ///
    /// A non-positive interval falls back to
    /// [`DEFAULT_NTH_ORDER_THRESHOLD`](crate::DEFAULT_NTH_ORDER_THRESHOLD).
    pub(crate) fn new(nth_order: i64) -> Self {
        let threshold = if nth_order <= 0 {
            DEFAULT_NTH_ORDER_THRESHOLD
        } else {
            nth_order
        };
        DiscountEngine {
            threshold,
            next_eligible_order: threshold,
            active: None,
            history: Vec::new(),
        }
    }

    /// The currently active (unredeemed) code, if any.
    pub(crate) fn active(&self) -> Option<&DiscountCode> {
        self.active.as_ref()
    }

    /// All codes ever issued: redeemed history first, then the active code.
    pub(crate) fn all_codes(&self) -> Vec<DiscountCode> {
        let mut codes = self.history.clone();
        if let Some(active) = &self.active {
            codes.push(active.clone());
        }
        codes
    }

    /// Generates a fresh code if the store has earned one.
    ///
    /// ## Failure
    /// `DiscountNotEligible` when the order count has not reached
    /// `next_eligible_order`, or while a previous code is still
    /// outstanding.
    pub(crate) fn generate(&mut self, total_orders: i64) -> StoreResult<DiscountCode> {
        let eligible = total_orders >= self.next_eligible_order;
        if !eligible || self.active.is_some() {
            return Err(StoreError::DiscountNotEligible);
        }

        let code = DiscountCode {
            code: self.fresh_code(),
            percentage_bps: DISCOUNT_RATE_BPS,
            generated_at: Utc::now(),
            redeemed_at: None,
            is_redeemed: false,
            eligible_order_number: self.next_eligible_order,
        };
        self.active = Some(code.clone());
        Ok(code)
    }

    /// Redeems the active code against a supplied string.
    ///
    /// ## Check Order
    /// 1. `DiscountNotActive` - no code outstanding
    /// 2. `DiscountAlreadyUsed` - slot holds a redeemed code (unreachable
    ///    while the invariant holds; checked anyway)
    /// 3. `DiscountMismatch` - case-sensitive string inequality
    ///
    /// All checks run before any mutation, so a failed redemption leaves
    /// the engine untouched.
    pub(crate) fn redeem(&mut self, supplied: &str) -> StoreResult<Redemption> {
        let active = self.active.as_ref().ok_or(StoreError::DiscountNotActive)?;
        if active.is_redeemed {
            return Err(StoreError::DiscountAlreadyUsed);
        }
        if active.code != supplied {
            return Err(StoreError::DiscountMismatch);
        }

        // Checks passed: consume the slot
        let mut redeemed = self
            .active
            .take()
            .ok_or(StoreError::DiscountNotActive)?;
        redeemed.is_redeemed = true;
        redeemed.redeemed_at = Some(Utc::now());

        let redemption = Redemption {
            code: redeemed.code.clone(),
            rate: redeemed.rate(),
        };
        self.history.push(redeemed);
        self.next_eligible_order += self.threshold;

        Ok(redemption)
    }

    /// Draws a code no previous code has used.
    ///
    /// Collisions are astronomically unlikely (32^6 suffixes), so the loop
    /// is effectively a single draw.
    fn fresh_code(&self) -> String {
        loop {
            let code = random_code();
            let taken = self.history.iter().any(|c| c.code == code)
                || self.active.as_ref().is_some_and(|c| c.code == code);
            if !taken {
                return code;
            }
        }
    }
}

/// Draws one `DISC-XXXXXX` code from the unambiguous alphabet.
fn random_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("{CODE_PREFIX}{suffix}")
}

// =============================================================================
// Unit Tests
// =============================================================================
