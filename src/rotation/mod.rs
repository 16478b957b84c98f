// src/rotation/mod.rs

pub mod config;
pub mod credential;
pub mod mask;
pub mod rotator;
pub mod strategy;

pub use config::{RotatorConfig, RotatorOverrides};
pub use credential::Credential;
pub use mask::mask_credential;
pub use rotator::{parse_credentials, CredentialRotator, RotatorSnapshot, CREDENTIAL_DELIMITER};
pub use strategy::{
    KeyRotationStrategy, LeastErrorsStrategy, RandomStrategy, RoundRobinStrategy,
    RotationStrategy,
};
