//! # Validation Module
//!
//! Input checks for items and rule identifiers.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout::scan(item)                                                   │
//! │       │                                                                 │
//! │       ├── config.validate_items == false ──► append, always Ok          │
//! │       │                                                                 │
//! │       └── config.validate_items == true                                 │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │           validate_item(item) ← THIS MODULE                             │
//! │                 │                                                       │
//! │                 ├── empty SKU?      → ValidationError::Required         │
//! │                 ├── negative price? → ValidationError::MustBeNonNegative│
//! │                 └── OK → append                                         │
//! │                                                                         │
//! │  Rule constructors call validate_rule_id / validate_sku unconditionally │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Item;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest SKU accepted.
pub const MAX_SKU_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty or blank
/// - No leading or trailing whitespace: rules match SKUs byte for byte, so
///   `"atv "` would never be priced as `"atv"`
/// - At most [`MAX_SKU_LEN`] characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ```rust
/// use tally_core::validation::validate_sku;
///
/// assert!(validate_sku("atv").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("atv ").is_err());
/// assert!(validate_sku("apple tv").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.trim() != sku {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must not have leading or trailing whitespace".to_string(),
        });
    }

    if sku.chars().count() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a pricing rule identifier. Any non-blank string is accepted.
pub fn validate_rule_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "rule id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price. Zero is allowed (free items), negative is not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a whole item: SKU first, then price.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_sku(&item.sku)?;
    validate_price(item.price)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("atv").is_ok());
        assert!(validate_sku("IPD-2024").is_ok());
        assert!(validate_sku("mac_book").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(MAX_SKU_LEN + 1)).is_err());
        assert!(validate_sku(&"A".repeat(MAX_SKU_LEN)).is_ok());
    }

    #[test]
    fn test_validate_sku_rejects_padding() {
        for padded in ["atv ", " atv", "\tipd", "ipd\n"] {
            assert!(
                matches!(
                    validate_sku(padded),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "expected {padded:?} to be rejected"
            );
        }

        let item = Item::new("atv ", Money::from_cents(10950));
        assert!(validate_item(&item).is_err());
    }

    #[test]
    fn test_validate_rule_id() {
        assert!(validate_rule_id("appleTVBulkDiscount").is_ok());
        assert!(validate_rule_id("summer sale").is_ok());
        assert_eq!(
            validate_rule_id(" "),
            Err(ValidationError::Required {
                field: "rule id".to_string()
            })
        );
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(10950)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_item_reports_sku_before_price() {
        let item = Item::new("", Money::from_cents(-100));
        assert!(matches!(
            validate_item(&item),
            Err(ValidationError::Required { .. })
        ));

        let item = Item::new("atv", Money::from_cents(-100));
        assert!(matches!(
            validate_item(&item),
            Err(ValidationError::MustBeNonNegative { .. })
        ));

        assert!(validate_item(&Item::new("atv", Money::from_cents(10950))).is_ok());
    }
}
