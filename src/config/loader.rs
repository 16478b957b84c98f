// src/config/loader.rs

use crate::config::environment::EnvironmentConfig;
use crate::config::{AppConfig, ConfigValidator};
use crate::error::{Result, RotatorError};
use std::path::Path;
use tracing::{debug, info};

/// Load configuration from file or environment variables
pub fn load_config(config_path: &Path) -> Result<AppConfig> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from file: {}", config_path.display());
        load_from_file(config_path)?
    } else {
        info!("Configuration file not found, using defaults");
        AppConfig::default()
    };

    // Override with environment variables
    override_with_env(&mut config);

    // Validate the final configuration
    ConfigValidator::validate(&config)?;

    debug!("Configuration loaded and validated successfully");
    Ok(config)
}

fn load_from_file(config_path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(config_path).map_err(|_| RotatorError::ConfigNotFound {
        path: config_path.display().to_string(),
    })?;

    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| RotatorError::ConfigParse {
        message: format!("Failed to parse config file: {e}"),
        line: e.location().map(|loc| loc.line()),
    })
}

fn override_with_env(config: &mut AppConfig) {
    let env = EnvironmentConfig::from_env();
    if env.has_overrides() {
        info!(
            env.overrides = ?env.override_summary(),
            "Overriding rotation settings from environment"
        );
        config.rotation = config.rotation.clone().merge(&env.to_overrides());
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, config_path: &Path) -> Result<()> {
    let yaml_content = serde_yaml::to_string(config).map_err(|e| RotatorError::ConfigParse {
        message: format!("Failed to serialize config: {e}"),
        line: None,
    })?;

    std::fs::write(config_path, yaml_content).map_err(|e| RotatorError::Io {
        operation: "write_config".to_string(),
        message: format!("Failed to write config file: {e}"),
    })?;

    info!("Configuration saved to: {}", config_path.display());
    Ok(())
}
