// src/lib.rs

pub mod cli;
pub mod config;
pub mod error;
pub mod global;
pub mod monitoring;
pub mod rotation;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

pub use config::AppConfig;
pub use error::{Result, RotatorError};
pub use monitoring::StatusReport;
pub use rotation::{
    mask_credential, Credential, CredentialRotator, RotationStrategy, RotatorConfig,
    RotatorOverrides,
};

/// Loads and validates configuration, logging where it came from.
pub fn setup_configuration(config_path_override: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = config_path_override.unwrap_or_else(|| {
        std::env::var("CONFIG_PATH").map_or_else(|_| PathBuf::from("config.yaml"), PathBuf::from)
    });

    let config_path_display = config_path.display().to_string();
    if config_path.exists() {
        info!(config.path = %config_path_display, "Using configuration file");
    } else {
        info!(config.path = %config_path_display, "Optional configuration file not found. Using defaults and environment variables.");
    }

    let app_config = config::load_config(&config_path).map_err(|e| {
        error!(
            config.path = %config_path_display,
            error = ?e,
            "Failed to load or validate configuration."
        );
        e
    })?;

    info!(
        config.keys_env_var = %app_config.keys_env_var,
        config.rotation = ?app_config.rotation,
        "Configuration loaded and validated successfully."
    );
    Ok(app_config)
}

/// Reads the key list named by `app_config` from the environment and installs
/// the process-wide rotator built from it.
pub fn build_rotator(app_config: &AppConfig) -> Result<Arc<CredentialRotator>> {
    let raw = config::load_raw_credentials(&app_config.keys_env_var).ok_or_else(|| {
        error!(
            env.var = %app_config.keys_env_var,
            "No API keys found in the environment."
        );
        RotatorError::EmptyInput
    })?;

    let rotator = global::initialize_global(&raw, app_config.rotation.clone())?;
    if global::has_multiple() {
        info!(
            credentials.total = rotator.get_total_count(),
            strategy = %rotator.strategy(),
            "Multi-key rotation enabled"
        );
    } else {
        info!("Single API key configured; rotation is a no-op");
    }
    Ok(rotator)
}
