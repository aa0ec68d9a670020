//! Property tests: checkout invariants over arbitrary carts.

use proptest::prelude::*;
use tally_core::rules::{apple_tv_bulk_discount, ipad_bulk_discount};
use tally_core::{cart, Checkout, FnRule, Item, Money, PricingRule, RuleResult};

fn item_strategy() -> impl Strategy<Value = Item> {
    (
        prop::sample::select(vec!["atv", "ipd", "mbp", "vga"]),
        0i64..200_000,
    )
        .prop_map(|(sku, cents)| Item::new(sku, Money::from_cents(cents)))
}

fn cart_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 0..40)
}

fn checkout_with(items: &[Item]) -> Checkout {
    let mut checkout = Checkout::new();
    for item in items {
        checkout.scan(item.clone()).unwrap();
    }
    checkout
}

fn offset_rule(id: &str, offset: i64) -> FnRule<impl Fn(&[Item]) -> RuleResult<Money> + Send + Sync> {
    FnRule::new(id, move |items: &[Item]| {
        Ok(cart::base_total(items) + Money::from_cents(offset))
    })
}

proptest! {
    /// With no rules the total is the plain sum of prices.
    #[test]
    fn prop_no_rules_total_is_sum(items in cart_strategy()) {
        let checkout = checkout_with(&items);
        let expected: Money = items.iter().map(|item| item.price).sum();
        prop_assert_eq!(checkout.total().unwrap(), expected);
    }

    /// With two rules, only the second one's answer counts.
    #[test]
    fn prop_last_rule_wins(items in cart_strategy(), a in 1i64..1_000, b in 1_000i64..2_000) {
        let mut checkout = checkout_with(&items);
        checkout.add_pricing_rule(offset_rule("first", a));
        checkout.add_pricing_rule(offset_rule("second", b));

        let base = checkout.base_total();
        prop_assert_eq!(checkout.total().unwrap(), base + Money::from_cents(b));
    }

    /// Registering the same rule twice is the same as registering it once.
    #[test]
    fn prop_re_adding_rule_is_idempotent(items in cart_strategy()) {
        let mut once = checkout_with(&items);
        once.add_pricing_rule(apple_tv_bulk_discount());

        let mut twice = checkout_with(&items);
        twice.add_pricing_rule(apple_tv_bulk_discount());
        twice.add_pricing_rule(apple_tv_bulk_discount());

        prop_assert_eq!(once.total().unwrap(), twice.total().unwrap());
        prop_assert_eq!(twice.rule_count(), 1);
    }

    /// Removing an id that was never registered changes nothing.
    #[test]
    fn prop_remove_unknown_rule_is_safe(items in cart_strategy()) {
        let mut checkout = checkout_with(&items);
        checkout.add_pricing_rule(ipad_bulk_discount());
        let before = checkout.total().unwrap();

        prop_assert!(!checkout.remove_pricing_rule("noSuchRule"));
        prop_assert_eq!(checkout.total().unwrap(), before);
    }

    /// After clearing, the total is each rule's price for an empty cart.
    #[test]
    fn prop_clear_resets(items in cart_strategy()) {
        let mut bare = checkout_with(&items);
        bare.clear_items();
        prop_assert_eq!(bare.total().unwrap(), Money::zero());

        let mut ruled = checkout_with(&items);
        ruled.add_pricing_rule(apple_tv_bulk_discount());
        ruled.clear_items();
        prop_assert_eq!(
            ruled.total().unwrap(),
            apple_tv_bulk_discount().apply(&[]).unwrap()
        );
    }

    /// Built-in rules are pure and never price below zero or above base.
    #[test]
    fn prop_builtin_rules_are_pure_and_bounded(items in cart_strategy()) {
        let base = cart::base_total(&items);
        let apple_tv = apple_tv_bulk_discount();
        let ipad = ipad_bulk_discount();
        let rules: [&dyn PricingRule; 2] = [&apple_tv, &ipad];

        for rule in rules {
            let first = rule.apply(&items).unwrap();
            prop_assert_eq!(first, rule.apply(&items).unwrap());
            prop_assert!(!first.is_negative());
            // Bulk price only lowers ipads that were scanned at or above it.
            if items.iter().all(|item| item.sku != "ipd" || item.price >= ipad.bulk_price()) {
                prop_assert!(first <= base);
            }
        }
    }
}
