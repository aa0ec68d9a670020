//! # Checkout Demo
//!
//! Rings up the two sample baskets against the store's promotions and
//! prints what each rule charged and what the register would ask for.
//!
//! ## Usage
//! ```bash
//! # Default policy (last rule wins)
//! cargo run -p tally-core --features demo --bin tally-demo
//!
//! # Sum every rule's savings instead
//! cargo run -p tally-core --features demo --bin tally-demo -- --policy compose
//!
//! # Machine-readable breakdowns
//! cargo run -p tally-core --features demo --bin tally-demo -- --json
//!
//! # See every scan and rule registration
//! RUST_LOG=tally_core=debug cargo run -p tally-core --features demo --bin tally-demo
//! ```
//!
//! `TALLY_RULE_POLICY` / `TALLY_VALIDATE_ITEMS` are honored; `--policy`
//! overrides the former.

use std::env;

use tally_core::rules::{apple_tv_bulk_discount, ipad_bulk_discount};
use tally_core::{Checkout, CheckoutConfig, Item, Money, PriceBreakdown, RulePolicy};
use tracing_subscriber::EnvFilter;

/// Sample catalog: (sku, name, price)
const CATALOG: &[(&str, &str, i64)] = &[
    ("atv", "Apple TV", 10950),
    ("ipd", "Super iPad", 54999),
    ("mbp", "MacBook Pro", 139999),
    ("vga", "VGA adapter", 3000),
];

/// Sample baskets, by SKU in scan order.
const BASKETS: &[&[&str]] = &[
    &["atv", "atv", "atv", "vga"],
    &["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"],
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = CheckoutConfig::from_env()?;
    let mut json = false;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--policy" | "-p" => {
                let value = args.get(i + 1).ok_or("--policy needs a value")?;
                config = config.with_policy(value.parse::<RulePolicy>()?);
                i += 1;
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Tally Checkout Demo");
                println!();
                println!("Usage: tally-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --policy <P>   last-rule-wins (default) or compose");
                println!("      --json         Print each basket's breakdown as JSON");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }

    let mut checkout = Checkout::with_config(config);
    checkout.add_pricing_rule(apple_tv_bulk_discount());
    checkout.add_pricing_rule(ipad_bulk_discount());

    if !json {
        println!("🧾 Tally Checkout Demo");
        println!("======================");
        println!("Policy: {}", config.rule_policy);
        println!(
            "Rules:  {}",
            checkout.rule_ids().collect::<Vec<_>>().join(" → ")
        );
    }

    for (index, basket) in BASKETS.iter().enumerate() {
        checkout.clear_items();
        for sku in basket.iter() {
            checkout.scan(lookup(sku)?)?;
        }

        let breakdown = checkout.breakdown()?;
        if json {
            println!("{}", serde_json::to_string(&breakdown)?);
        } else {
            print_breakdown(index + 1, basket, &breakdown);
        }
    }

    Ok(())
}

/// Builds an item from the sample catalog.
fn lookup(sku: &str) -> Result<Item, String> {
    CATALOG
        .iter()
        .find(|(code, _, _)| *code == sku)
        .map(|(code, _, cents)| Item::new(*code, Money::from_cents(*cents)))
        .ok_or_else(|| format!("SKU {sku} is not in the catalog"))
}

fn print_breakdown(number: usize, basket: &[&str], breakdown: &PriceBreakdown) {
    println!();
    println!("Basket {}: {}", number, basket.join(", "));
    println!("  Base total:  {}", breakdown.base_total);
    for outcome in &breakdown.rules {
        println!("  {:<20} {}", outcome.rule_id, outcome.total);
    }
    println!("  Total:       {}", breakdown.total);
}

/// Initializes the tracing subscriber on stderr so stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=tally_core=debug` - scans, registrations, totals
/// - `RUST_LOG=tally_core=trace` - per-rule discount detail
/// - Default: WARN level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
