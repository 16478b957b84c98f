// src/config/mod.rs

pub mod app;
pub mod environment;
pub mod loader;
pub mod validation;

pub use app::{AppConfig, DEFAULT_KEYS_ENV_VAR};
pub use environment::{load_raw_credentials, EnvironmentConfig};
pub use loader::{load_config, save_config};
pub use validation::{is_valid_credential, validate_credentials, ConfigValidator, MIN_CREDENTIAL_LENGTH};
