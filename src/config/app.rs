// src/config/app.rs

use crate::rotation::RotatorOverrides;
use serde::{Deserialize, Serialize};

pub const DEFAULT_KEYS_ENV_VAR: &str = "GEMINI_API_KEYS";

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Environment variable holding the `;`-separated key list.
    #[serde(default = "default_keys_env_var")]
    pub keys_env_var: String,
    #[serde(default)]
    pub rotation: RotatorOverrides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keys_env_var: default_keys_env_var(),
            rotation: RotatorOverrides::default(),
        }
    }
}

fn default_keys_env_var() -> String {
    DEFAULT_KEYS_ENV_VAR.to_string()
}
