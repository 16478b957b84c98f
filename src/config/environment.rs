//! Environment-based configuration management

use crate::rotation::{RotationStrategy, RotatorOverrides};
use std::env;
use tracing::warn;

/// Single-key fallback consulted when the list variable is unset or blank.
pub const SINGLE_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

pub const STRATEGY_ENV_VAR: &str = "GEMINI_KEY_ROTATION_STRATEGY";
pub const MAX_ERRORS_ENV_VAR: &str = "GEMINI_MAX_ERRORS_PER_KEY";
pub const COOLDOWN_ENV_VAR: &str = "GEMINI_COOLDOWN_MS";
pub const AUTO_REACTIVATE_ENV_VAR: &str = "GEMINI_AUTO_REACTIVATE";

/// Rotation settings that can override the file-based config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentConfig {
    pub strategy: Option<RotationStrategy>,
    pub max_errors_per_key: Option<u32>,
    pub cooldown_ms: Option<u64>,
    pub auto_reactivate: Option<bool>,
}

impl EnvironmentConfig {
    /// Load overrides from environment variables. Unparseable values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self {
            strategy: parse_var(STRATEGY_ENV_VAR),
            max_errors_per_key: parse_var(MAX_ERRORS_ENV_VAR),
            cooldown_ms: parse_var(COOLDOWN_ENV_VAR),
            auto_reactivate: parse_var(AUTO_REACTIVATE_ENV_VAR),
        }
    }

    /// Check if any environment overrides are present
    pub fn has_overrides(&self) -> bool {
        self.strategy.is_some()
            || self.max_errors_per_key.is_some()
            || self.cooldown_ms.is_some()
            || self.auto_reactivate.is_some()
    }

    /// Names of the variables that produced an override
    pub fn override_summary(&self) -> Vec<&'static str> {
        let mut overrides = Vec::new();
        if self.strategy.is_some() {
            overrides.push(STRATEGY_ENV_VAR);
        }
        if self.max_errors_per_key.is_some() {
            overrides.push(MAX_ERRORS_ENV_VAR);
        }
        if self.cooldown_ms.is_some() {
            overrides.push(COOLDOWN_ENV_VAR);
        }
        if self.auto_reactivate.is_some() {
            overrides.push(AUTO_REACTIVATE_ENV_VAR);
        }
        overrides
    }

    pub fn to_overrides(&self) -> RotatorOverrides {
        RotatorOverrides {
            strategy: self.strategy,
            max_errors_per_key: self.max_errors_per_key,
            cooldown_ms: self.cooldown_ms,
            auto_reactivate: self.auto_reactivate,
            seed: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(env.var = name, value = %raw, "Ignoring invalid environment override");
            None
        }
    }
}

/// Read the raw `;`-separated key list.
///
/// Tries `list_var` first and falls back to `GEMINI_API_KEY`. Blank values
/// count as unset. The string is returned untouched; parsing belongs to the
/// rotator.
pub fn load_raw_credentials(list_var: &str) -> Option<String> {
    [list_var, SINGLE_KEY_ENV_VAR]
        .into_iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
