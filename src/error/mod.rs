//! Error handling for the rotation manager
//!
//! Every failure is synchronous and reported to the immediate caller. Nothing
//! here is retried internally; callers decide whether to surface the message
//! to an operator or fall back to another credential source.

pub mod types;

use thiserror::Error;
use tracing::{error, warn};

/// Main error type for credential parsing, selection and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotatorError {
    // Credential list errors
    #[error("Credential list is empty")]
    EmptyInput,

    #[error("No valid credentials found after parsing the credential list")]
    NoValidCredentials,

    #[error("No active credentials available: all credentials exceeded the error threshold")]
    NoActiveCredentials,

    #[error("Invalid credential format at position {index}: {reason}")]
    InvalidFormat { index: usize, reason: String },

    // Configuration errors
    #[error("Configuration validation failed: {message}")]
    ConfigValidation {
        message: String,
        field: Option<String>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String, line: Option<usize> },

    #[error("IO error during {operation}: {message}")]
    Io { operation: String, message: String },
}

impl RotatorError {
    /// Create a configuration validation error
    pub fn config_validation(message: impl Into<String>, field: Option<impl Into<String>>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
            field: field.map(Into::into),
        }
    }

    /// Stable machine-readable code, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::NoValidCredentials => "no_valid_credentials",
            Self::NoActiveCredentials => "no_active_credentials",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::ConfigValidation { .. } => "config_validation",
            Self::ConfigNotFound { .. } => "config_not_found",
            Self::ConfigParse { .. } => "config_parse",
            Self::Io { .. } => "io",
        }
    }

    /// Whether the host can recover by resetting health state or supplying
    /// a new credential list, as opposed to fixing its configuration.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoActiveCredentials)
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        if self.is_recoverable() {
            warn!(error = %self, error.code = self.code(), "Credential rotation error");
        } else {
            error!(error = %self, error.code = self.code(), "Credential rotation error");
        }
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, RotatorError>;
