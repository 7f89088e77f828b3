//! # Machine Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags
//! 2. Environment variables (`VEND_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only once the machine is running.

use serde::Serialize;
use thiserror::Error;
use vend_core::validation::{validate_discount_percentage, validate_machine_name};
use vend_core::{ValidationError, DEFAULT_MACHINE_NAME, DEFAULT_MAX_RANDOM_DISCOUNT_PCT};

/// Environment variable overriding the machine name.
pub const ENV_MACHINE_NAME: &str = "VEND_MACHINE_NAME";
/// Environment variable overriding the random discount ceiling (whole percent).
pub const ENV_MAX_DISCOUNT: &str = "VEND_MAX_DISCOUNT";
/// Environment variable seeding the discount RNG.
pub const ENV_SEED: &str = "VEND_SEED";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

/// Vending machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineConfig {
    /// Name shown in banners and the final report.
    pub machine_name: String,

    /// Random discounts are drawn from 0..=max_discount_pct percent.
    pub max_discount_pct: u32,

    /// Whether random discounts are applied at startup.
    pub apply_discounts: bool,

    /// Fixed RNG seed for reproducible discounts.
    pub seed: Option<u64>,

    /// Print the ledger as JSON at exit.
    pub json_report: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            machine_name: DEFAULT_MACHINE_NAME.to_string(),
            max_discount_pct: DEFAULT_MAX_RANDOM_DISCOUNT_PCT,
            apply_discounts: true,
            seed: None,
            json_report: false,
        }
    }
}

/// Values given on the command line. `None` keeps the lower-priority value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub machine_name: Option<String>,
    pub max_discount_pct: Option<u32>,
    pub seed: Option<u64>,
    pub no_discounts: bool,
    pub json_report: bool,
}

impl MachineConfig {
    /// Loads defaults overridden by `VEND_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MachineConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = MachineConfig::default();

        if let Some(name) = lookup(ENV_MACHINE_NAME) {
            config.machine_name = name;
        }

        if let Some(raw) = lookup(ENV_MAX_DISCOUNT) {
            config.max_discount_pct = parse_var(ENV_MAX_DISCOUNT, &raw)?;
        }

        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = Some(parse_var(ENV_SEED, &raw)?);
        }

        Ok(config)
    }

    /// Applies command line values on top of this configuration and
    /// validates the result.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(name) = overrides.machine_name {
            self.machine_name = name;
        }
        if let Some(pct) = overrides.max_discount_pct {
            self.max_discount_pct = pct;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.no_discounts {
            self.apply_discounts = false;
        }
        if overrides.json_report {
            self.json_report = true;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks the machine name and discount ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_machine_name(&self.machine_name)?;
        validate_discount_percentage(self.max_discount_pct)?;
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
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
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MachineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, MachineConfig::default());
        assert_eq!(config.machine_name, "Snack Machine");
        assert_eq!(config.max_discount_pct, 20);
        assert!(config.apply_discounts);
    }

    #[test]
    fn test_env_overrides() {
        let config = MachineConfig::from_lookup(lookup_from(&[
            (ENV_MACHINE_NAME, "Lobby Machine"),
            (ENV_MAX_DISCOUNT, "35"),
            (ENV_SEED, " 7 "),
        ]))
        .unwrap();

        assert_eq!(config.machine_name, "Lobby Machine");
        assert_eq!(config.max_discount_pct, 35);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_env_invalid_number() {
        let err = MachineConfig::from_lookup(lookup_from(&[(ENV_SEED, "seven")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_SEED));
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = MachineConfig::from_lookup(lookup_from(&[(ENV_MAX_DISCOUNT, "35")]))
            .unwrap()
            .with_overrides(ConfigOverrides {
                machine_name: Some("Gym Machine".to_string()),
                max_discount_pct: Some(10),
                seed: Some(3),
                no_discounts: true,
                json_report: true,
            })
            .unwrap();

        assert_eq!(config.machine_name, "Gym Machine");
        assert_eq!(config.max_discount_pct, 10);
        assert_eq!(config.seed, Some(3));
        assert!(!config.apply_discounts);
        assert!(config.json_report);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let too_generous = MachineConfig::default().with_overrides(ConfigOverrides {
            max_discount_pct: Some(150),
            ..Default::default()
        });
        assert!(matches!(too_generous, Err(ConfigError::Invalid(_))));

        let unnamed = MachineConfig::default().with_overrides(ConfigOverrides {
            machine_name: Some("  ".to_string()),
            ..Default::default()
        });
        assert!(unnamed.is_err());
    }
}
