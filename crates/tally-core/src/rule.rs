//! # Pricing Rule Protocol
//!
//! A pricing rule is a named, pure function from the cart's items to the
//! price of the *whole* cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   &[Item] ──► rule.apply() ──► Money (full cart price, not a delta)    │
//! │                                                                         │
//! │   • Same items in, same Money out                                      │
//! │   • No access to other rules' results                                  │
//! │   • Must price an empty slice without failing                          │
//! │   • Must not keep the slice past the call                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules come in two flavours: structs implementing [`PricingRule`] (see
//! [`crate::rules`]) and closures wrapped in [`FnRule`].

use std::fmt;

use crate::error::RuleResult;
use crate::money::Money;
use crate::types::Item;

/// A named pricing function over a cart snapshot.
///
/// `Send + Sync` so a [`crate::Checkout`] can sit behind a
/// [`crate::SharedCheckout`] lock.
pub trait PricingRule: Send + Sync {
    /// Registry key. Registering another rule with the same id replaces this one.
    fn id(&self) -> &str;

    /// Prices the entire cart, discount included.
    ///
    /// An `Err` aborts the `total()` call that invoked it.
    fn apply(&self, items: &[Item]) -> RuleResult<Money>;
}

impl fmt::Debug for dyn PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingRule").field("id", &self.id()).finish()
    }
}

// =============================================================================
// Closure Rules
// =============================================================================

/// Adapts a closure into a [`PricingRule`].
///
/// ```rust
/// use tally_core::{cart, Checkout, FnRule, Item, Money};
///
/// let flat_five_off = FnRule::new("fiveOff", |items: &[Item]| {
///     Ok((cart::base_total(items) - Money::from_cents(500)).max(Money::zero()))
/// });
///
/// let mut checkout = Checkout::with_rules([flat_five_off]);
/// checkout.scan(Item::new("vga", Money::from_cents(3000))).unwrap();
/// assert_eq!(checkout.total().unwrap().cents(), 2500);
/// ```
pub struct FnRule<F> {
    id: String,
    apply: F,
}

impl<F> FnRule<F> {
    pub fn new(id: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&[Item]) -> RuleResult<Money> + Send + Sync,
    {
        FnRule {
            id: id.into(),
            apply,
        }
    }
}

impl<F> PricingRule for FnRule<F>
where
    F: Fn(&[Item]) -> RuleResult<Money> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, items: &[Item]) -> RuleResult<Money> {
        (self.apply)(items)
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("id", &self.id).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::base_total;
    use crate::error::RuleError;

    #[test]
    fn test_fn_rule_delegates_to_closure() {
        let double = FnRule::new("double", |items: &[Item]| Ok(base_total(items) * 2));
        let items = [Item::new("vga", Money::from_cents(3000))];

        assert_eq!(double.id(), "double");
        assert_eq!(double.apply(&items).unwrap().cents(), 6000);
        assert_eq!(double.apply(&[]).unwrap(), Money::zero());
    }

    #[test]
    fn test_fn_rule_error_passes_through() {
        let broken = FnRule::new("broken", |_: &[Item]| {
            Err(RuleError::Failed {
                rule: "broken".to_string(),
                reason: "price feed unavailable".to_string(),
            })
        });

        assert!(matches!(
            broken.apply(&[]),
            Err(RuleError::Failed { .. })
        ));
    }

    #[test]
    fn test_debug_shows_id() {
        let rule: Box<dyn PricingRule> =
            Box::new(FnRule::new("fiveOff", |items: &[Item]| Ok(base_total(items))));
        assert_eq!(format!("{rule:?}"), "PricingRule { id: \"fiveOff\" }");
    }
}
