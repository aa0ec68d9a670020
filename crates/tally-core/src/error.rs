//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError            - What Checkout operations return                 │
//! │  ├── ValidationError  - Malformed item / rule id / price string         │
//! │  ├── RuleError        - A pricing rule refused or failed to price       │
//! │  ├── ConfigError      - Bad TALLY_* environment value                   │
//! │  └── AmountOverflow   - A total left the i64 cent range                 │
//! │                                                                         │
//! │  Flow: rule.apply() ──Err──► Checkout::total() ──Err──► caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, rule id, env var)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by checkout operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item or identifier failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A pricing rule could not compute a total.
    ///
    /// ## When This Occurs
    /// ```text
    /// Checkout::total()
    ///      │
    ///      ▼
    /// rule.apply(items) ──► Err(RuleError::Failed { .. })
    ///      │
    ///      ▼
    /// total() returns Err, no partial result
    /// ```
    #[error("Pricing rule error: {0}")]
    Rule(#[from] RuleError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A checkout amount left the representable cent range.
    #[error("Amount overflow while computing {0}")]
    AmountOverflow(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., a price string with letters in it).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Rule Error
// =============================================================================

/// Errors raised by pricing rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Rule was constructed with parameters it cannot price with.
    #[error("Rule {rule} has invalid parameter: {reason}")]
    InvalidParameter { rule: String, reason: String },

    /// Rule failed while pricing a cart.
    #[error("Rule {rule} failed: {reason}")]
    Failed { rule: String, reason: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of a single rule application.
pub type RuleResult<T> = Result<T, RuleError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RuleError::Failed {
            rule: "appleTVBulkDiscount".to_string(),
            reason: "price overflow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rule appleTVBulkDiscount failed: price overflow"
        );

        let err = ConfigError::InvalidValue("TALLY_RULE_POLICY".to_string());
        assert_eq!(err.to_string(), "Invalid value for TALLY_RULE_POLICY");

        let err = CoreError::AmountOverflow("base total".to_string());
        assert_eq!(err.to_string(), "Amount overflow while computing base total");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "sku".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = RuleError::InvalidParameter {
            rule: "r".to_string(),
            reason: "n must be at least 1".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Rule(_)));
    }
}
