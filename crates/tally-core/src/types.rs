//! # Domain Types
//!
//! The one data shape that crosses the checkout boundary.
//!
//! ```text
//! ┌─────────────────┐
//! │      Item       │   One physical unit scanned at the register.
//! │  ─────────────  │   Several items may share a SKU; equality is
//! │  sku (String)   │   structural, never by reference.
//! │  price (Money)  │
//! └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A scanned unit: SKU plus the price it rang up at.
///
/// Immutable once constructed; the cart only ever appends or drops items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Stock Keeping Unit, e.g. `"atv"`.
    pub sku: String,

    /// Unit price in cents.
    pub price: Money,
}

impl Item {
    /// Creates an item from a SKU and price.
    ///
    /// ```rust
    /// use tally_core::{Item, Money};
    ///
    /// let atv = Item::new("atv", Money::from_cents(10950));
    /// assert_eq!(atv.sku, "atv");
    /// ```
    pub fn new(sku: impl Into<String>, price: Money) -> Self {
        Item {
            sku: sku.into(),
            price,
        }
    }

    /// Whether this unit carries the given SKU.
    #[inline]
    pub fn is_sku(&self, sku: &str) -> bool {
        self.sku == sku
    }
}
