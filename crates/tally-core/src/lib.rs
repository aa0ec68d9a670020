//! # tally-core: Checkout Pricing Engine
//!
//! Accumulates scanned items into a cart and prices the cart through a set
//! of pluggable, per-SKU pricing rules.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   caller ──scan(item)──► Checkout ──► Cart (ordered Vec<Item>)          │
//! │                              │                                          │
//! │   caller ◄──total()───────── ┤                                          │
//! │                              ▼                                          │
//! │                 IndexMap<id, Box<dyn PricingRule>>                      │
//! │                 ┌──────────────┐  ┌───────────────┐  ┌──────────┐       │
//! │                 │ EveryNthFree │  │BulkPriceBreak │  │  FnRule  │       │
//! │                 └──────────────┘  └───────────────┘  └──────────┘       │
//! │                                                                         │
//! │   NO I/O • NO PERSISTENCE • DETERMINISTIC TOTALS                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - The scanned [`Item`]
//! - [`cart`] - The ordered basket and slice helpers rules share
//! - [`rule`] - The [`PricingRule`] trait and closure adapter
//! - [`rules`] - Concrete promotions and store presets
//! - [`checkout`] - Registry + cart + pricing policy
//! - [`shared`] - Mutex-guarded checkout handle
//! - [`config`] - Env-driven behavior switches
//! - [`validation`] - Item and identifier checks
//! - [`error`] - Domain error types
//!
//! ## Rule Policy
//! By default each registered rule prices the *whole* cart and replaces the
//! running total, so the last rule enumerated decides `total()`. Summing all
//! rules' savings is available as [`RulePolicy::Compose`], never implicitly.
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::rules::apple_tv_bulk_discount;
//! use tally_core::{Checkout, Item, Money};
//!
//! let mut checkout = Checkout::with_rules([apple_tv_bulk_discount()]);
//! for _ in 0..3 {
//!     checkout.scan(Item::new("atv", Money::from_cents(10950))).unwrap();
//! }
//!
//! // Third Apple TV is free
//! assert_eq!(checkout.total().unwrap().cents(), 21900);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod rule;
pub mod rules;
pub mod shared;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use checkout::{Checkout, PriceBreakdown, RuleOutcome};
pub use config::{CheckoutConfig, RulePolicy};
pub use error::{ConfigError, CoreError, CoreResult, RuleError, RuleResult, ValidationError};
pub use money::Money;
pub use rule::{FnRule, PricingRule};
pub use shared::SharedCheckout;
pub use types::Item;
