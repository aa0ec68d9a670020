//! # Concrete Pricing Rules
//!
//! Two parameterized promotions plus the store's preset instances.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EveryNthFree { sku: "atv", n: 3 }                                      │
//! │    atv atv atv vga                                                      │
//! │    base 358.50 ─ floor(3/3) × 109.50 ──► 249.00                         │
//! │                                                                         │
//! │  BulkPriceBreak { sku: "ipd", threshold: 4, bulk_price: 499.99 }        │
//! │    atv atv ipd ipd ipd ipd ipd   (5 > 4, every ipd reprices)            │
//! │    2 × 109.50 + 5 × 499.99 ──────────────────► 2718.95                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each rule recomputes the full cart price from the raw items. Neither sees
//! what another rule would have charged.

use tracing::trace;

use crate::cart::{checked_base_total, count_sku, first_price_of};
use crate::error::{CoreResult, RuleError, RuleResult};
use crate::money::Money;
use crate::rule::PricingRule;
use crate::types::Item;
use crate::validation::{validate_price, validate_rule_id, validate_sku};

/// Registry id of the Apple TV 3-for-2 preset.
pub const APPLE_TV_BULK_DISCOUNT: &str = "appleTVBulkDiscount";

/// Registry id of the iPad bulk price preset.
pub const IPAD_BULK_DISCOUNT: &str = "ipadBulkDiscount";

// =============================================================================
// Every Nth Unit Free
// =============================================================================

/// Every `n`th unit of `sku` is free.
///
/// The free unit is valued at the price of the first `sku` unit scanned, so
/// a basket with mixed prices for one SKU discounts at the earliest price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EveryNthFree {
    id: String,
    sku: String,
    n: usize,
}

impl EveryNthFree {
    /// Builds the rule, rejecting blank ids, malformed SKUs and `n == 0`.
    pub fn new(id: impl Into<String>, sku: impl Into<String>, n: usize) -> CoreResult<Self> {
        let id = id.into();
        let sku = sku.into();
        validate_rule_id(&id)?;
        validate_sku(&sku)?;

        if n == 0 {
            return Err(RuleError::InvalidParameter {
                rule: id,
                reason: "n must be at least 1".to_string(),
            }
            .into());
        }

        Ok(EveryNthFree { id, sku, n })
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

impl PricingRule for EveryNthFree {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, items: &[Item]) -> RuleResult<Money> {
        let base = checked_base_total(items).ok_or_else(|| overflow(&self.id))?;
        let free_units = (count_sku(items, &self.sku) / self.n) as i64;
        let discount = match first_price_of(items, &self.sku) {
            Some(unit) => unit
                .checked_mul_quantity(free_units)
                .ok_or_else(|| overflow(&self.id))?,
            None => Money::zero(),
        };

        trace!(rule = %self.id, free_units, discount = %discount, "Applied every-nth-free");
        let total = base.checked_sub(discount).ok_or_else(|| overflow(&self.id))?;
        Ok(total.max(Money::zero()))
    }
}

// =============================================================================
// Bulk Price Break
// =============================================================================

/// Once more than `threshold` units of `sku` are scanned, every unit of that
/// SKU is charged `bulk_price` instead of its scanned price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPriceBreak {
    id: String,
    sku: String,
    threshold: usize,
    bulk_price: Money,
}

impl BulkPriceBreak {
    /// Builds the rule, rejecting blank ids, malformed SKUs and a negative
    /// bulk price.
    pub fn new(
        id: impl Into<String>,
        sku: impl Into<String>,
        threshold: usize,
        bulk_price: Money,
    ) -> CoreResult<Self> {
        let id = id.into();
        let sku = sku.into();
        validate_rule_id(&id)?;
        validate_sku(&sku)?;
        validate_price(bulk_price)?;

        Ok(BulkPriceBreak {
            id,
            sku,
            threshold,
            bulk_price,
        })
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn bulk_price(&self) -> Money {
        self.bulk_price
    }
}

impl PricingRule for BulkPriceBreak {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, items: &[Item]) -> RuleResult<Money> {
        let units = count_sku(items, &self.sku);
        if units <= self.threshold {
            let base = checked_base_total(items).ok_or_else(|| overflow(&self.id))?;
            return Ok(base.max(Money::zero()));
        }

        let repriced = Money::checked_sum(items.iter().map(|item| {
            if item.is_sku(&self.sku) {
                self.bulk_price
            } else {
                item.price
            }
        }))
        .ok_or_else(|| overflow(&self.id))?;

        trace!(rule = %self.id, units, total = %repriced, "Applied bulk price break");
        Ok(repriced.max(Money::zero()))
    }
}

fn overflow(rule: &str) -> RuleError {
    RuleError::Failed {
        rule: rule.to_string(),
        reason: "amount overflow".to_string(),
    }
}

// =============================================================================
// Presets
// =============================================================================

/// Buy three Apple TVs, pay for two.
pub fn apple_tv_bulk_discount() -> EveryNthFree {
    EveryNthFree {
        id: APPLE_TV_BULK_DISCOUNT.to_string(),
        sku: "atv".to_string(),
        n: 3,
    }
}

/// iPads drop to $499.99 each when more than four are bought.
pub fn ipad_bulk_discount() -> BulkPriceBreak {
    BulkPriceBreak {
        id: IPAD_BULK_DISCOUNT.to_string(),
        sku: "ipd".to_string(),
        threshold: 4,
        bulk_price: Money::from_major_minor(499, 99),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
