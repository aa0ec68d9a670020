//! # Checkout
//!
//! Owns one [`Cart`] and one rule registry, and folds the former through the
//! latter to produce a total.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total()                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  base = Σ item.price                                                    │
//! │     │                                                                   │
//! │     ├── registry empty ──────────────────────────────► base             │
//! │     │                                                                   │
//! │     ├── LastRuleWins:  base ─r₁─► t₁ ─r₂─► t₂ ... ─rₙ─► tₙ              │
//! │     │                  (each tᵢ = rᵢ.apply(items), replaces the last)   │
//! │     │                                                                   │
//! │     └── Compose:       base − Σ max(0, base − rᵢ.apply(items))          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registry Order
//! Rules enumerate in the order their id was first registered. Re-adding an
//! id swaps the rule in place without moving it; removing an id closes the
//! gap and keeps the rest in order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cart::{checked_base_total, Cart};
use crate::config::{CheckoutConfig, RulePolicy};
use crate::error::{CoreError, CoreResult, RuleResult};
use crate::money::Money;
use crate::rule::PricingRule;
use crate::types::Item;
use crate::validation::validate_item;

// =============================================================================
// Checkout
// =============================================================================

/// A single checkout session: scanned items plus active pricing rules.
///
/// ```rust
/// use tally_core::rules::{apple_tv_bulk_discount, ipad_bulk_discount};
/// use tally_core::{Checkout, Item, Money};
///
/// let mut checkout = Checkout::new();
/// checkout.add_pricing_rule(ipad_bulk_discount());
/// checkout.add_pricing_rule(apple_tv_bulk_discount());
///
/// for _ in 0..3 {
///     checkout.scan(Item::new("atv", Money::from_cents(10950))).unwrap();
/// }
/// checkout.scan(Item::new("vga", Money::from_cents(3000))).unwrap();
///
/// assert_eq!(checkout.total().unwrap().to_string(), "$249.00");
/// ```
#[derive(Debug, Default)]
pub struct Checkout {
    cart: Cart,
    rules: IndexMap<String, Box<dyn PricingRule>>,
    config: CheckoutConfig,
}

impl Checkout {
    /// Creates a checkout with an empty cart, no rules and default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checkout pre-loaded with `rules`.
    ///
    /// Duplicate ids resolve exactly as repeated
    /// [`add_pricing_rule`](Self::add_pricing_rule) calls would: the later
    /// rule wins, in the earlier one's position.
    pub fn with_rules<I, R>(rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: PricingRule + 'static,
    {
        let mut checkout = Self::new();
        for rule in rules {
            checkout.add_pricing_rule(rule);
        }
        checkout
    }

    /// Creates an empty checkout with explicit config.
    pub fn with_config(config: CheckoutConfig) -> Self {
        Checkout {
            cart: Cart::new(),
            rules: IndexMap::new(),
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Adds an item to the cart.
    ///
    /// Always succeeds unless `validate_items` is enabled in the config, in
    /// which case an empty/malformed SKU or a negative price is rejected and
    /// the cart is left untouched.
    pub fn scan(&mut self, item: Item) -> CoreResult<()> {
        if self.config.validate_items {
            validate_item(&item)?;
        }

        debug!(sku = %item.sku, price = %item.price, "Scanning item");
        self.cart.scan(item);
        Ok(())
    }

    /// Empties the cart. Rules are kept.
    pub fn clear_items(&mut self) {
        debug!(dropped = self.cart.len(), "Clearing cart");
        self.cart.clear();
    }

    pub fn items(&self) -> &[Item] {
        self.cart.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of scanned prices before any rule. Unchecked like the `Money`
    /// operators; `total()` reports overflow as an error instead.
    pub fn base_total(&self) -> Money {
        self.cart.base_total()
    }

    // -------------------------------------------------------------------------
    // Rule registry
    // -------------------------------------------------------------------------

    /// Inserts `rule` under its id, replacing any rule already registered
    /// with that id.
    pub fn add_pricing_rule<R>(&mut self, rule: R)
    where
        R: PricingRule + 'static,
    {
        let id = rule.id().to_string();
        let replaced = self.rules.insert(id.clone(), Box::new(rule)).is_some();
        debug!(rule = %id, replaced, count = self.rules.len(), "Registered pricing rule");
    }

    /// Removes the rule registered under `id`.
    ///
    /// Unknown ids are a no-op. Returns whether a rule was removed.
    pub fn remove_pricing_rule(&mut self, id: &str) -> bool {
        let removed = self.rules.shift_remove(id).is_some();
        debug!(rule = %id, removed, "Removing pricing rule");
        removed
    }

    pub fn has_rule(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Registered rule ids in enumeration order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.keys().map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Prices the cart under the configured [`RulePolicy`].
    ///
    /// Does not modify the cart or the registry. A rule error aborts the
    /// whole call.
    pub fn total(&self) -> CoreResult<Money> {
        self.total_with(self.config.rule_policy)
    }

    /// Prices the cart under `policy`, ignoring the configured one.
    ///
    /// A base total or savings sum outside the `i64` cent range is
    /// [`CoreError::AmountOverflow`], never a panic.
    pub fn total_with(&self, policy: RulePolicy) -> CoreResult<Money> {
        let items = self.cart.items();
        let base = checked_base_total(items).ok_or_else(|| overflow("base total"))?;

        let results = self.rules.values().map(|rule| rule.apply(items));
        let total = fold_rule_results(policy, base, results)
            .inspect_err(|err| warn!(error = %err, "Pricing failed"))?;

        debug!(
            items = items.len(),
            rules = self.rules.len(),
            policy = %policy,
            base = %base,
            total = %total,
            "Priced cart"
        );
        Ok(total)
    }

    /// Prices the cart and reports every rule's individual answer.
    pub fn breakdown(&self) -> CoreResult<PriceBreakdown> {
        let items = self.cart.items();
        let base = checked_base_total(items).ok_or_else(|| overflow("base total"))?;
        let policy = self.config.rule_policy;

        let rules = self
            .rules
            .values()
            .map(|rule| {
                rule.apply(items).map(|total| RuleOutcome {
                    rule_id: rule.id().to_string(),
                    total,
                })
            })
            .collect::<RuleResult<Vec<_>>>()?;

        let results = rules.iter().map(|outcome| Ok(outcome.total));
        let total = fold_rule_results(policy, base, results)?;

        Ok(PriceBreakdown {
            item_count: items.len(),
            base_total: base,
            policy,
            rules,
            total,
        })
    }
}

/// Combines per-rule cart prices into one total.
///
/// Every result is consumed even under `LastRuleWins`, so a failing rule
/// anywhere in the registry fails the total.
fn fold_rule_results<I>(policy: RulePolicy, base: Money, results: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = RuleResult<Money>>,
{
    match policy {
        RulePolicy::LastRuleWins => Ok(results.into_iter().try_fold(base, |_, result| result)?),
        RulePolicy::Compose => {
            let savings = results
                .into_iter()
                .try_fold(Money::zero(), |acc, result| -> CoreResult<Money> {
                    let saved = base
                        .checked_sub(result?)
                        .ok_or_else(|| overflow("rule savings"))?
                        .max(Money::zero());
                    acc.checked_add(saved).ok_or_else(|| overflow("rule savings"))
                })?;

            // No rule saved anything: the base stands.
            if savings.is_zero() {
                return Ok(base);
            }
            let total = base
                .checked_sub(savings)
                .ok_or_else(|| overflow("composed total"))?;
            Ok(total.max(Money::zero()))
        }
    }
}

fn overflow(what: &str) -> CoreError {
    CoreError::AmountOverflow(what.to_string())
}

// =============================================================================
// Breakdown
// =============================================================================

/// One rule's price for the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOutcome {
    pub rule_id: String,
    pub total: Money,
}

/// Itemized view of a `total()` computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub item_count: usize,
    pub base_total: Money,
    pub policy: RulePolicy,
    /// In registry enumeration order.
    pub rules: Vec<RuleOutcome>,
    pub total: Money,
}

impl PriceBreakdown {
    /// How much cheaper the total is than the base.
    pub fn savings(&self) -> Money {
        self.base_total - self.total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
