// src/rotation/credential.rs

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use super::mask::mask_credential;

/// One managed API key together with its health metadata.
///
/// Values returned by the rotator are snapshots: mutating them has no effect
/// on the rotator's own table.
#[derive(Clone, Debug)]
pub struct Credential {
    value: Secret<String>,
    /// Position in the original list. Never reassigned.
    pub index: usize,
    pub active: bool,
    pub error_count: u32,
    pub last_used: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// When the credential last went from active to inactive.
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a healthy credential
    pub fn new(value: impl Into<String>, index: usize) -> Self {
        Self {
            value: Secret::new(value.into()),
            index,
            active: true,
            error_count: 0,
            last_used: None,
            last_error: None,
            deactivated_at: None,
        }
    }

    /// The raw key. Only the request path should need this.
    pub fn value(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn masked(&self) -> String {
        mask_credential(self.value.expose_secret())
    }

    /// Record a failure. Returns `true` only when this call deactivated the key.
    pub fn record_failure(&mut self, message: String, max_errors: u32) -> bool {
        self.error_count = self.error_count.saturating_add(1);
        self.last_error = Some(message);

        if self.active && self.error_count >= max_errors {
            self.active = false;
            self.deactivated_at = Some(Utc::now());
            return true;
        }
        false
    }

    /// Restore full health
    pub fn reset(&mut self) {
        self.active = true;
        self.error_count = 0;
        self.last_error = None;
        self.deactivated_at = None;
    }

    /// Whether an inactive key has sat out at least `cooldown` as of `now`.
    pub fn cooldown_elapsed(&self, cooldown: Duration, now: DateTime<Utc>) -> bool {
        if self.active {
            return false;
        }
        self.deactivated_at
            .and_then(|at| (now - at).to_std().ok())
            .is_some_and(|elapsed| elapsed >= cooldown)
    }

    /// Bring a cooled-down key back into rotation. The last error message is
    /// kept so status output still shows why it was benched.
    pub fn reactivate(&mut self) {
        self.active = true;
        self.error_count = 0;
        self.deactivated_at = None;
    }
}
