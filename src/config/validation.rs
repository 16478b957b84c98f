// src/config/validation.rs

use crate::config::AppConfig;
use crate::error::{Result, RotatorError};
use crate::rotation::{mask_credential, parse_credentials, RotatorConfig};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Shortest key the companion check accepts, in characters.
pub const MIN_CREDENTIAL_LENGTH: usize = 8;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &AppConfig) -> Result<()> {
        debug!("Starting configuration validation");

        let var = config.keys_env_var.trim();
        if var.is_empty() || var.contains('=') || var.contains('\0') {
            return Err(RotatorError::config_validation(
                format!("Invalid environment variable name: '{}'", config.keys_env_var),
                Some("keys_env_var"),
            ));
        }

        if let Err(e) = RotatorConfig::from_overrides(&config.rotation) {
            warn!("Rotation config validation failed: {}", e);
            return Err(e);
        }

        debug!("Configuration validation completed successfully");
        Ok(())
    }
}

/// Loose syntactic check for a single key.
pub fn is_valid_credential(value: &str) -> bool {
    value.trim().chars().count() >= MIN_CREDENTIAL_LENGTH
}

/// Check a raw list before handing it to the rotator.
///
/// Parses exactly like the rotator does and returns the number of keys.
/// Duplicates are allowed but logged.
pub fn validate_credentials(raw: &str) -> Result<usize> {
    if raw.trim().is_empty() {
        return Err(RotatorError::EmptyInput);
    }

    let keys = parse_credentials(raw);
    if keys.is_empty() {
        return Err(RotatorError::NoValidCredentials);
    }

    let mut seen = HashSet::new();
    for (index, key) in keys.iter().enumerate() {
        if !is_valid_credential(key) {
            return Err(RotatorError::InvalidFormat {
                index,
                reason: format!(
                    "key '{}' is shorter than {} characters",
                    mask_credential(key),
                    MIN_CREDENTIAL_LENGTH
                ),
            });
        }
        if !seen.insert(*key) {
            warn!(
                api_key.preview = %mask_credential(key),
                index,
                "Duplicate API key in credential list"
            );
        }
    }

    debug!(credentials.total = keys.len(), "Credential list passed validation");
    Ok(keys.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::RotatorOverrides;
    use rstest::rstest;

    #[rstest]
    #[case("12345678", true)]
    #[case("  12345678  ", true)]
    #[case("1234567", false)]
    #[case("", false)]
    fn test_is_valid_credential(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_credential(value), expected);
    }

    #[test]
    fn test_validate_credentials_counts_entries() {
        assert_eq!(validate_credentials("key-aaaa1;key-bbbb2; key-cccc3 ;").unwrap(), 3);
    }

    #[test]
    fn test_validate_credentials_errors() {
        assert_eq!(validate_credentials("  "), Err(RotatorError::EmptyInput));
        assert_eq!(validate_credentials(";;"), Err(RotatorError::NoValidCredentials));
        match validate_credentials("long-enough-key;short") {
            Err(RotatorError::InvalidFormat { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("*****"));
                assert!(!reason.contains("'short'"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_config() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());

        let mut config = AppConfig::default();
        config.keys_env_var = " ".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        let config = AppConfig {
            rotation: RotatorOverrides::default().with_max_errors_per_key(0),
            ..AppConfig::default()
        };
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(RotatorError::ConfigValidation { .. })
        ));
    }
}
