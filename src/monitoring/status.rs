// src/monitoring/status.rs

use crate::rotation::{Credential, CredentialRotator, RotationStrategy};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Masked view of one credential, safe to print or serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialStatus {
    pub index: usize,
    pub key_preview: String,
    pub active: bool,
    pub error_count: u32,
    pub last_used: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl From<&Credential> for CredentialStatus {
    fn from(credential: &Credential) -> Self {
        Self {
            index: credential.index,
            key_preview: credential.masked(),
            active: credential.active,
            error_count: credential.error_count,
            last_used: credential.last_used,
            last_error: credential.last_error.clone(),
        }
    }
}

/// Read-only summary of a rotator for status displays.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub strategy: RotationStrategy,
    pub total: usize,
    pub active: usize,
    /// `None` once every key is deactivated.
    pub current: Option<CredentialStatus>,
    pub credentials: Vec<CredentialStatus>,
}

impl StatusReport {
    /// Built from one consistent snapshot. Never mutates usage stamps on the
    /// rotator.
    pub fn collect(rotator: &CredentialRotator) -> Self {
        let snapshot = rotator.snapshot();
        let current = snapshot.current_credential().map(CredentialStatus::from);
        let credentials: Vec<CredentialStatus> = snapshot
            .credentials
            .iter()
            .map(CredentialStatus::from)
            .collect();

        Self {
            strategy: rotator.strategy(),
            total: credentials.len(),
            active: credentials.iter().filter(|c| c.active).count(),
            current,
            credentials,
        }
    }

    pub fn inactive(&self) -> usize {
        self.total - self.active
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "API keys: {}/{} active (strategy: {})",
            self.active, self.total, self.strategy
        )?;
        match &self.current {
            Some(current) => writeln!(f, "Current:  #{} {}", current.index, current.key_preview)?,
            None => writeln!(f, "Current:  none (all keys deactivated)")?,
        }
        for credential in &self.credentials {
            let marker = if credential.active { "ok " } else { "off" };
            write!(
                f,
                "  [{marker}] #{:<3} {}  errors={}",
                credential.index, credential.key_preview, credential.error_count
            )?;
            if let Some(last_error) = &credential.last_error {
                write!(f, "  last_error=\"{last_error}\"")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
