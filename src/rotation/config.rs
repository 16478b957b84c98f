// src/rotation/config.rs

use crate::error::{Result, RotatorError};
use crate::rotation::strategy::RotationStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_ERRORS_PER_KEY: u32 = 3;
pub const DEFAULT_COOLDOWN_MS: u64 = 60_000;

/// Rotation policy, fixed for the lifetime of a rotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatorConfig {
    pub strategy: RotationStrategy,
    pub max_errors_per_key: u32,
    pub cooldown_period: Duration,
    /// When false, `cooldown_period` is carried but never consulted.
    pub auto_reactivate: bool,
    /// Seed for the random strategy. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            strategy: RotationStrategy::default(),
            max_errors_per_key: DEFAULT_MAX_ERRORS_PER_KEY,
            cooldown_period: Duration::from_millis(DEFAULT_COOLDOWN_MS),
            auto_reactivate: false,
            seed: None,
        }
    }
}

/// Partial policy merged over the defaults at construction time.
///
/// This is also the shape of the `rotation:` section in the YAML config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotatorOverrides {
    pub strategy: Option<RotationStrategy>,
    pub max_errors_per_key: Option<u32>,
    pub cooldown_ms: Option<u64>,
    pub auto_reactivate: Option<bool>,
    pub seed: Option<u64>,
}

impl RotatorOverrides {
    pub fn with_strategy(mut self, strategy: RotationStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_max_errors_per_key(mut self, max_errors: u32) -> Self {
        self.max_errors_per_key = Some(max_errors);
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown_ms = Some(u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_auto_reactivate(mut self, enabled: bool) -> Self {
        self.auto_reactivate = Some(enabled);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Later values win field by field.
    pub fn merge(mut self, other: &RotatorOverrides) -> Self {
        self.strategy = other.strategy.or(self.strategy);
        self.max_errors_per_key = other.max_errors_per_key.or(self.max_errors_per_key);
        self.cooldown_ms = other.cooldown_ms.or(self.cooldown_ms);
        self.auto_reactivate = other.auto_reactivate.or(self.auto_reactivate);
        self.seed = other.seed.or(self.seed);
        self
    }
}

impl RotatorConfig {
    /// Apply overrides on top of the defaults.
    pub fn from_overrides(overrides: &RotatorOverrides) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            strategy: overrides.strategy.unwrap_or(defaults.strategy),
            max_errors_per_key: overrides
                .max_errors_per_key
                .unwrap_or(defaults.max_errors_per_key),
            cooldown_period: overrides
                .cooldown_ms
                .map_or(defaults.cooldown_period, Duration::from_millis),
            auto_reactivate: overrides.auto_reactivate.unwrap_or(defaults.auto_reactivate),
            seed: overrides.seed.or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_errors_per_key == 0 {
            return Err(RotatorError::config_validation(
                "max_errors_per_key must be a positive integer",
                Some("rotation.max_errors_per_key"),
            ));
        }
        Ok(())
    }
}
