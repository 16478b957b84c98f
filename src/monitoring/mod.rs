// src/monitoring/mod.rs

pub mod status;

pub use status::{CredentialStatus, StatusReport};
