// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shop rate configuration

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`ShopRates::load`]
pub const CONFIG_FILE: &str = "cncquote.toml";

/// Policy parameters of the cost model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopRates {
    /// Stock removal rate in cm³/min
    pub material_removal_rate_cm3_per_min: f64,
    /// Operator labor in USD/hour
    pub labor_rate_per_hour: f64,
    /// Machine time in USD/hour
    pub machine_rate_per_hour: f64,
    /// One-off setup cost per batch in USD
    pub setup_cost: f64,
    /// Units sharing one setup
    pub batch_size: u32,
}

impl Default for ShopRates {
    fn default() -> Self {
        Self {
            material_removal_rate_cm3_per_min: 50.0,
            labor_rate_per_hour: 60.0,
            machine_rate_per_hour: 80.0,
            setup_cost: 150.0,
            batch_size: 100,
        }
    }
}

impl ShopRates {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let rates: ShopRates = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        rates.validate()?;
        Ok(rates)
    }

    /// Load configuration with environment variable overrides
    ///
    /// Reads [`CONFIG_FILE`] when it exists, defaults otherwise.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from `path` (or [`CONFIG_FILE`] when `None`), then
    /// apply `CNCQUOTE_*` environment overrides
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    fn load_with(path: Option<&Path>, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut rates = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE)?,
            None => Self::default(),
        };

        rates.apply_env(var)?;
        rates.validate()?;
        Ok(rates)
    }

    /// Apply `CNCQUOTE_*` overrides from a variable source
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        let float = |name: &str| -> Result<Option<f64>> {
            var(name)
                .map(|value| {
                    value
                        .trim()
                        .parse::<f64>()
                        .with_context(|| format!("{} is not a number: {}", name, value))
                })
                .transpose()
        };

        if let Some(rate) = float("CNCQUOTE_REMOVAL_RATE")? {
            self.material_removal_rate_cm3_per_min = rate;
        }
        if let Some(rate) = float("CNCQUOTE_LABOR_RATE")? {
            self.labor_rate_per_hour = rate;
        }
        if let Some(rate) = float("CNCQUOTE_MACHINE_RATE")? {
            self.machine_rate_per_hour = rate;
        }
        if let Some(cost) = float("CNCQUOTE_SETUP_COST")? {
            self.setup_cost = cost;
        }
        if let Some(batch) = var("CNCQUOTE_BATCH_SIZE") {
            self.batch_size = batch
                .trim()
                .parse()
                .with_context(|| format!("CNCQUOTE_BATCH_SIZE is not an integer: {}", batch))?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Reject values the cost model cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.material_removal_rate_cm3_per_min.is_finite()
            && self.material_removal_rate_cm3_per_min > 0.0)
        {
            return Err(invalid(
                "material_removal_rate_cm3_per_min",
                "must be a positive number",
            ));
        }

        let non_negative = [
            ("labor_rate_per_hour", self.labor_rate_per_hour),
            ("machine_rate_per_hour", self.machine_rate_per_hour),
            ("setup_cost", self.setup_cost),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(name, "must be a non-negative number"));
            }
        }

        if self.batch_size == 0 {
            return Err(invalid("batch_size", "must be at least 1"));
        }

        Ok(())
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_removal_rate(mut self, rate: f64) -> Self {
        self.material_removal_rate_cm3_per_min = rate;
        self
    }
}

fn invalid(name: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let rates = ShopRates::default();
        assert!(rates.validate().is_ok());
        assert_eq!(rates.batch_size, 100);
        assert_eq!(rates.material_removal_rate_cm3_per_min, 50.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_batch = ShopRates::default().with_batch_size(0);
        assert!(matches!(
            zero_batch.validate(),
            Err(ConfigError::InvalidParameter { name, .. }) if name == "batch_size"
        ));

        let stalled = ShopRates::default().with_removal_rate(0.0);
        assert!(stalled.validate().is_err());

        let negative = ShopRates {
            setup_cost: -1.0,
            ..ShopRates::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "batch_size = 10\nlabor_rate_per_hour = 45.0\n")?;

        let rates = ShopRates::from_file(file.path())?;
        assert_eq!(rates.batch_size, 10);
        assert_eq!(rates.labor_rate_per_hour, 45.0);
        assert_eq!(rates.machine_rate_per_hour, 80.0);
        Ok(())
    }

    #[test]
    fn test_save_roundtrip() -> Result<()> {
        let file = NamedTempFile::new()?;
        let rates = ShopRates::default().with_batch_size(25);
        rates.save(file.path())?;
        assert_eq!(ShopRates::from_file(file.path())?, rates);
        Ok(())
    }

    #[test]
    fn test_env_overrides_apply_over_explicit_file() -> Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "batch_size = 10\nsetup_cost = 90.0\n")?;

        let rates = ShopRates::load_with(Some(file.path()), |name| {
            (name == "CNCQUOTE_BATCH_SIZE").then(|| "40".to_string())
        })?;
        assert_eq!(rates.batch_size, 40);
        assert_eq!(rates.setup_cost, 90.0);

        let zero_batch = ShopRates::load_with(Some(file.path()), |name| {
            (name == "CNCQUOTE_BATCH_SIZE").then(|| "0".to_string())
        });
        assert!(zero_batch.is_err());
        Ok(())
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let vars: HashMap<&str, &str> = [
            ("CNCQUOTE_BATCH_SIZE", "20"),
            ("CNCQUOTE_REMOVAL_RATE", "12.5"),
        ]
        .into_iter()
        .collect();

        let mut rates = ShopRates::default();
        rates.apply_env(|name| vars.get(name).map(|v| v.to_string()))?;

        assert_eq!(rates.batch_size, 20);
        assert_eq!(rates.material_removal_rate_cm3_per_min, 12.5);
        assert_eq!(rates.setup_cost, 150.0);
        Ok(())
    }

    #[test]
    fn test_env_override_parse_error() {
        let mut rates = ShopRates::default();
        let result = rates.apply_env(|name| {
            (name == "CNCQUOTE_LABOR_RATE").then(|| "cheap".to_string())
        });
        assert!(result.is_err());
    }
}
