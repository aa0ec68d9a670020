//! # Shared Checkout
//!
//! A checkout behind one coarse lock, for hosts where several threads may
//! touch the same register session.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Thread A: scan ──┐                                                     │
//! │                   ├──► Mutex<Checkout> ──► one operation at a time      │
//! │  Thread B: total ─┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Every operation is O(items × rules) and finishes immediately, so a single
//! `Mutex` over the whole checkout is all the synchronization needed. Reads
//! take the same lock; a `RwLock` would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use crate::checkout::Checkout;

/// Cloneable handle to a mutex-guarded [`Checkout`].
#[derive(Debug, Clone, Default)]
pub struct SharedCheckout {
    checkout: Arc<Mutex<Checkout>>,
}

impl SharedCheckout {
    pub fn new(checkout: Checkout) -> Self {
        SharedCheckout {
            checkout: Arc::new(Mutex::new(checkout)),
        }
    }

    /// Executes a function with read access to the checkout.
    ///
    /// ```rust
    /// use tally_core::{Checkout, SharedCheckout};
    ///
    /// let shared = SharedCheckout::new(Checkout::new());
    /// let total = shared.with_checkout(|checkout| checkout.total()).unwrap();
    /// assert!(total.is_zero());
    /// ```
    pub fn with_checkout<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Checkout) -> R,
    {
        let checkout = self.checkout.lock().expect("Checkout mutex poisoned");
        f(&checkout)
    }

    /// Executes a function with write access to the checkout.
    pub fn with_checkout_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Checkout) -> R,
    {
        let mut checkout = self.checkout.lock().expect("Checkout mutex poisoned");
        f(&mut checkout)
    }
}

impl From<Checkout> for SharedCheckout {
    fn from(checkout: Checkout) -> Self {
        Self::new(checkout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::rules::apple_tv_bulk_discount;
    use crate::types::Item;
    use std::thread;

    #[test]
    fn test_concurrent_scans_are_all_recorded() {
        let shared = SharedCheckout::from(Checkout::with_rules([apple_tv_bulk_discount()]));

        thread::scope(|scope| {
            for _ in 0..3 {
                let handle = shared.clone();
                scope.spawn(move || {
                    handle.with_checkout_mut(|checkout| {
                        checkout.scan(Item::new("atv", Money::from_cents(10950)))
                    })
                    .unwrap();
                });
            }
        });

        let (count, total) = shared.with_checkout(|checkout| {
            (checkout.items().len(), checkout.total().unwrap())
        });
        assert_eq!(count, 3);
        assert_eq!(total.cents(), 21900);
    }
}
