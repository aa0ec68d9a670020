//! # Cart
//!
//! The ordered sequence of items scanned in the current checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Register Action          Method                  State Change          │
//! │  ───────────────          ──────                  ────────────          │
//! │                                                                         │
//! │  Scan barcode ───────────► scan(item) ──────────► items.push(item)      │
//! │                                                                         │
//! │  Void basket ────────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Price basket ───────────► items() ─────────────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `len()` equals the number of `scan` calls since the last `clear`
//! - Scan order is preserved
//! - Items are never mutated in place

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Item;

/// The scanned basket.
///
/// Unlike a quantity-merging cart, every scan is its own entry: three Apple
/// TVs are three `Item`s, which is what per-unit pricing rules count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Appends an item. Never fails.
    pub fn scan(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only snapshot of the scanned items, in scan order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of scanned prices with no rule applied.
    pub fn base_total(&self) -> Money {
        base_total(&self.items)
    }
}

// =============================================================================
// Slice Helpers
// =============================================================================
// Rules receive `&[Item]`, not `&Cart`, so the arithmetic they share lives on
// plain slices.

/// Sum of item prices. Panics on overflow in debug builds; see
/// [`checked_base_total`].
pub fn base_total(items: &[Item]) -> Money {
    items.iter().map(|item| item.price).sum()
}

/// Sum of item prices, or `None` if it leaves the `i64` cent range.
pub fn checked_base_total(items: &[Item]) -> Option<Money> {
    Money::checked_sum(items.iter().map(|item| item.price))
}

/// Number of units carrying `sku`.
pub fn count_sku(items: &[Item], sku: &str) -> usize {
    items.iter().filter(|item| item.is_sku(sku)).count()
}

/// Price of the first scanned unit of `sku`, if any was scanned.
pub fn first_price_of(items: &[Item], sku: &str) -> Option<Money> {
    items.iter().find(|item| item.is_sku(sku)).map(|item| item.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atv() -> Item {
        Item::new("atv", Money::from_cents(10950))
    }

    fn vga() -> Item {
        Item::new("vga", Money::from_cents(3000))
    }

    #[test]
    fn test_scan_appends_in_order() {
        let mut cart = Cart::new();
        cart.scan(vga());
        cart.scan(atv());
        cart.scan(vga());

        assert_eq!(cart.len(), 3);
        let skus: Vec<&str> = cart.items().iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, ["vga", "atv", "vga"]);
    }

    #[test]
    fn test_base_total() {
        let mut cart = Cart::new();
        assert_eq!(cart.base_total(), Money::zero());

        for _ in 0..3 {
            cart.scan(atv());
        }
        cart.scan(vga());
        assert_eq!(cart.base_total().cents(), 35850);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.scan(atv());

        cart.clear();
        assert!(cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.base_total(), Money::zero());
    }

    #[test]
    fn test_slice_helpers() {
        let items = vec![vga(), atv(), Item::new("atv", Money::from_cents(9999))];

        assert_eq!(count_sku(&items, "atv"), 2);
        assert_eq!(count_sku(&items, "ipd"), 0);
        assert_eq!(first_price_of(&items, "atv"), Some(Money::from_cents(10950)));
        assert_eq!(first_price_of(&items, "ipd"), None);
        assert_eq!(first_price_of(&[], "atv"), None);
    }

    #[test]
    fn test_serializes_items_only() {
        let mut cart = Cart::new();
        cart.scan(vga());

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "items": [{ "sku": "vga", "price": 3000 }] })
        );
    }

    #[test]
    fn test_checked_base_total() {
        let items = vec![vga(), atv()];
        assert_eq!(checked_base_total(&items), Some(base_total(&items)));
        assert_eq!(checked_base_total(&[]), Some(Money::zero()));

        let huge = vec![
            Item::new("atv", Money::from_cents(i64::MAX)),
            Item::new("vga", Money::from_cents(1)),
        ];
        assert_eq!(checked_base_total(&huge), None);
    }
}
