//! # Configuration State
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value we cannot interpret.
    #[error("{var} has invalid value '{value}': expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Register configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in sale details)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Register the sample catalog at startup
    pub seed_sample_catalog: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Tally POS Dev Store"
    /// - Currency: `$`
    /// - Sample catalog: seeded
    fn default() -> Self {
        ConfigState {
            store_name: "Tally POS Dev Store".to_string(),
            currency_symbol: "$".to_string(),
            seed_sample_catalog: true,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_STORE_NAME`: Override store name
    /// - `TALLY_CURRENCY_SYMBOL`: Override currency symbol (e.g. "R$ ")
    /// - `TALLY_SEED_CATALOG`: `true`/`false`/`1`/`0`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("TALLY_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(seed) = lookup("TALLY_SEED_CATALOG") {
            config.seed_sample_catalog = parse_flag("TALLY_SEED_CATALOG", &seed)?;
        }

        Ok(config)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use tally_register_lib::config::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(7770), "$77.70");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let whole = cents / 100;
        let frac = (cents % 100).abs();

        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            whole.abs(),
            frac
        )
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            expected: "true or false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(7770), "$77.70");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-1234), "-$12.34");
        assert_eq!(config.format_currency(-5), "-$0.05");
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ConfigState::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.store_name, "Tally POS Dev Store");
        assert!(config.seed_sample_catalog);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("TALLY_STORE_NAME", "Mercadinho"),
            ("TALLY_CURRENCY_SYMBOL", "R$ "),
            ("TALLY_SEED_CATALOG", "0"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Mercadinho");
        assert!(!config.seed_sample_catalog);
        assert_eq!(config.format_currency(7770), "R$ 77.70");
    }

    #[test]
    fn test_from_lookup_rejects_bad_flag() {
        let err = ConfigState::from_lookup(lookup_from(&[("TALLY_SEED_CATALOG", "maybe")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "TALLY_SEED_CATALOG has invalid value 'maybe': expected true or false"
        );
    }
}
