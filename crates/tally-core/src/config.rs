//! # Checkout Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! | Variable               | Values                        | Default          |
//! |------------------------|-------------------------------|------------------|
//! | `TALLY_RULE_POLICY`    | `last-rule-wins`, `compose`   | `last-rule-wins` |
//! | `TALLY_VALIDATE_ITEMS` | `true`, `false`               | `false`          |

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub const RULE_POLICY_VAR: &str = "TALLY_RULE_POLICY";
pub const VALIDATE_ITEMS_VAR: &str = "TALLY_VALIDATE_ITEMS";

// =============================================================================
// Rule Policy
// =============================================================================

/// How registered rule results combine into one total.
///
/// ```text
/// base = 358.50, rules in order: A → 249.00, B → 358.50
///
/// LastRuleWins:  358.50 ─A─► 249.00 ─B─► 358.50        (B's answer)
/// Compose:       358.50 − (109.50 + 0.00)  = 249.00    (all savings)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RulePolicy {
    /// Each rule's result replaces the running total; the last rule
    /// enumerated decides. This is the established checkout behavior.
    #[default]
    LastRuleWins,

    /// Alternate mode: every rule prices the same cart and all of their
    /// savings against the base total are summed. Opt-in only.
    Compose,
}

impl RulePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RulePolicy::LastRuleWins => "last-rule-wins",
            RulePolicy::Compose => "compose",
        }
    }
}

impl fmt::Display for RulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RulePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-rule-wins" => Ok(RulePolicy::LastRuleWins),
            "compose" => Ok(RulePolicy::Compose),
            _ => Err(ConfigError::InvalidValue(RULE_POLICY_VAR.to_string())),
        }
    }
}

// =============================================================================
// Checkout Config
// =============================================================================

/// Behavior switches for a [`crate::Checkout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    /// How rule results combine in `total()`.
    pub rule_policy: RulePolicy,

    /// Reject malformed items at scan time. Off by default: a plain
    /// checkout accepts whatever it is handed.
    pub validate_items: bool,
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CheckoutConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rule_policy = match lookup(RULE_POLICY_VAR) {
            Some(raw) => raw.parse()?,
            None => RulePolicy::default(),
        };

        let validate_items = match lookup(VALIDATE_ITEMS_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(VALIDATE_ITEMS_VAR.to_string()))?,
            None => false,
        };

        Ok(CheckoutConfig {
            rule_policy,
            validate_items,
        })
    }

    pub fn with_policy(mut self, rule_policy: RulePolicy) -> Self {
        self.rule_policy = rule_policy;
        self
    }

    pub fn with_validation(mut self, validate_items: bool) -> Self {
        self.validate_items = validate_items;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CheckoutConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CheckoutConfig::default());
        assert_eq!(config.rule_policy, RulePolicy::LastRuleWins);
        assert!(!config.validate_items);
    }

    #[test]
    fn test_reads_both_variables() {
        let config = CheckoutConfig::from_lookup(lookup_from(&[
            (RULE_POLICY_VAR, " Compose "),
            (VALIDATE_ITEMS_VAR, "true"),
        ]))
        .unwrap();
        assert_eq!(config.rule_policy, RulePolicy::Compose);
        assert!(config.validate_items);
    }

    #[test]
    fn test_rejects_unknown_values() {
        let err = CheckoutConfig::from_lookup(lookup_from(&[(RULE_POLICY_VAR, "sum")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue(RULE_POLICY_VAR.to_string()));

        let err = CheckoutConfig::from_lookup(lookup_from(&[(VALIDATE_ITEMS_VAR, "yes")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue(VALIDATE_ITEMS_VAR.to_string()));
    }

    #[test]
    fn test_policy_names_round_trip_through_text() {
        for policy in [RulePolicy::LastRuleWins, RulePolicy::Compose] {
            assert_eq!(policy.to_string().parse::<RulePolicy>().unwrap(), policy);
        }
        assert_eq!(
            serde_json::to_string(&RulePolicy::LastRuleWins).unwrap(),
            "\"last-rule-wins\""
        );
    }

    #[test]
    fn test_builders() {
        let config = CheckoutConfig::default()
            .with_policy(RulePolicy::Compose)
            .with_validation(true);
        assert_eq!(config.rule_policy, RulePolicy::Compose);
        assert!(config.validate_items);
    }
}
