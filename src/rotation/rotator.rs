// src/rotation/rotator.rs

use crate::error::{Result, RotatorError};
use crate::rotation::config::{RotatorConfig, RotatorOverrides};
use crate::rotation::credential::Credential;
use crate::rotation::mask::mask_credential;
use crate::rotation::strategy::{KeyRotationStrategy, RotationStrategy};
use chrono::Utc;
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Separator between keys in the raw credential list.
pub const CREDENTIAL_DELIMITER: char = ';';

/// Split a raw list on `;`, trim each piece and drop the empty ones.
pub fn parse_credentials(raw: &str) -> Vec<&str> {
    raw.split(CREDENTIAL_DELIMITER)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Consistent view of the whole table.
#[derive(Debug, Clone)]
pub struct RotatorSnapshot {
    pub credentials: Vec<Credential>,
    /// Position of the credential `get_current` would return, `None` when
    /// every key is deactivated.
    pub current: Option<usize>,
}

impl RotatorSnapshot {
    pub fn current_credential(&self) -> Option<&Credential> {
        self.current.and_then(|position| self.credentials.get(position))
    }
}

/// Table, cursor and selector move together under one lock.
struct RotatorState {
    credentials: Vec<Credential>,
    current_index: usize,
    strategy: Box<dyn KeyRotationStrategy>,
}

impl RotatorState {
    /// Position of the credential `get_current` would hand out.
    fn current_position(&self) -> Option<usize> {
        match self.credentials.get(self.current_index) {
            Some(credential) if credential.active => Some(self.current_index),
            _ => self.credentials.iter().position(|c| c.active),
        }
    }

    fn active_count(&self) -> usize {
        self.credentials.iter().filter(|c| c.active).count()
    }
}

/// Keeps a fixed set of interchangeable API keys healthy and picks which one
/// is current.
///
/// The rotator is `Send + Sync`; share it behind an `Arc` across request paths.
/// Every operation takes the same lock, so selection always sees a consistent
/// table.
pub struct CredentialRotator {
    config: RotatorConfig,
    state: Mutex<RotatorState>,
}

impl fmt::Debug for CredentialRotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CredentialRotator")
            .field("config", &self.config)
            .field("current_index", &state.current_index)
            .field("total", &state.credentials.len())
            .field("active", &state.active_count())
            .finish()
    }
}

impl CredentialRotator {
    /// Parse `raw` and merge `overrides` over the default policy.
    pub fn new(raw: &str, overrides: RotatorOverrides) -> Result<Self> {
        let config = RotatorConfig::from_overrides(&overrides)?;
        Self::with_config(raw, config)
    }

    #[instrument(skip(raw, config), fields(strategy = %config.strategy), name = "rotator_init")]
    pub fn with_config(raw: &str, config: RotatorConfig) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(RotatorError::EmptyInput);
        }
        config.validate()?;

        let credentials: Vec<Credential> = parse_credentials(raw)
            .into_iter()
            .enumerate()
            .map(|(index, value)| Credential::new(value, index))
            .collect();

        if credentials.is_empty() {
            warn!("Credential list contained only delimiters and whitespace");
            return Err(RotatorError::NoValidCredentials);
        }

        info!(
            credentials.total = credentials.len(),
            max_errors_per_key = config.max_errors_per_key,
            auto_reactivate = config.auto_reactivate,
            "Credential rotator initialized"
        );

        let strategy = config.strategy.build(config.seed);
        Ok(Self {
            config,
            state: Mutex::new(RotatorState {
                credentials,
                current_index: 0,
                strategy,
            }),
        })
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    pub fn strategy(&self) -> RotationStrategy {
        self.config.strategy
    }

    /// Index the cursor points at. The credential there may be inactive.
    pub fn current_index(&self) -> usize {
        self.state.lock().current_index
    }

    /// The key to use for the next request. Stamps `last_used`.
    pub fn get_current(&self) -> Result<Credential> {
        let mut state = self.state.lock();
        self.apply_cooldowns(&mut state);
        Self::take_current(&mut state)
    }

    /// Same selection as [`get_current`](Self::get_current) without stamping
    /// `last_used`. For display.
    pub fn get_current_info(&self) -> Result<Credential> {
        let mut state = self.state.lock();
        self.apply_cooldowns(&mut state);
        let position = state
            .current_position()
            .ok_or(RotatorError::NoActiveCredentials)?;
        Ok(state.credentials[position].clone())
    }

    /// Move the cursor according to the configured strategy and return the
    /// new current key.
    pub fn rotate(&self) -> Result<Credential> {
        let mut guard = self.state.lock();
        self.apply_cooldowns(&mut guard);

        let state = &mut *guard;
        let previous = state.current_index;
        let active: Vec<&Credential> = state.credentials.iter().filter(|c| c.active).collect();
        let next = state
            .strategy
            .select(&active, previous)
            .ok_or(RotatorError::NoActiveCredentials)?;
        state.current_index = next;

        debug!(
            from = previous,
            to = next,
            strategy = %state.strategy.kind(),
            credentials.active = active.len(),
            "Rotated current credential"
        );
        Self::take_current(state)
    }

    /// Charge a failure to the credential under the cursor.
    ///
    /// Never fails. Deactivates the key once it reaches `max_errors_per_key`.
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        let mut state = self.state.lock();
        // A cooled-down key must be reactivated before it is charged again.
        self.apply_cooldowns(&mut state);
        let current = state.current_index;
        let max_errors = self.config.max_errors_per_key;

        let Some(credential) = state.credentials.iter_mut().find(|c| c.index == current) else {
            debug!(current_index = current, "No credential under cursor; error report dropped");
            return;
        };

        if credential.record_failure(message, max_errors) {
            warn!(
                api_key.preview = %credential.masked(),
                index = credential.index,
                error_count = credential.error_count,
                "Credential deactivated after reaching error threshold"
            );
        } else {
            debug!(
                api_key.preview = %credential.masked(),
                index = credential.index,
                error_count = credential.error_count,
                active = credential.active,
                "Credential error recorded"
            );
        }
    }

    /// Restore every credential to full health. Idempotent.
    pub fn reset_error_counts(&self) {
        let mut state = self.state.lock();
        state.credentials.iter_mut().for_each(Credential::reset);
        info!(credentials.total = state.credentials.len(), "All credential error counts reset");
    }

    /// Snapshot of every credential in index order.
    pub fn get_all_status(&self) -> Vec<Credential> {
        let mut state = self.state.lock();
        self.apply_cooldowns(&mut state);
        state.credentials.clone()
    }

    /// Table and current selection taken under a single lock. Does not stamp
    /// `last_used`.
    pub fn snapshot(&self) -> RotatorSnapshot {
        let mut state = self.state.lock();
        self.apply_cooldowns(&mut state);
        RotatorSnapshot {
            current: state.current_position(),
            credentials: state.credentials.clone(),
        }
    }

    pub fn get_active_count(&self) -> usize {
        let mut state = self.state.lock();
        self.apply_cooldowns(&mut state);
        state.active_count()
    }

    pub fn get_total_count(&self) -> usize {
        self.state.lock().credentials.len()
    }

    pub fn has_multiple(&self) -> bool {
        self.get_total_count() > 1
    }

    pub fn mask_credential(value: &str) -> String {
        mask_credential(value)
    }

    fn take_current(state: &mut RotatorState) -> Result<Credential> {
        let position = state
            .current_position()
            .ok_or(RotatorError::NoActiveCredentials)?;
        let credential = &mut state.credentials[position];
        credential.last_used = Some(Utc::now());
        Ok(credential.clone())
    }

    fn apply_cooldowns(&self, state: &mut RotatorState) {
        if !self.config.auto_reactivate {
            return;
        }
        let now = Utc::now();
        let cooldown = self.config.cooldown_period;
        for credential in state
            .credentials
            .iter_mut()
            .filter(|c| c.cooldown_elapsed(cooldown, now))
        {
            credential.reactivate();
            info!(
                api_key.preview = %credential.masked(),
                index = credential.index,
                cooldown_ms = cooldown.as_millis() as u64,
                "Credential reactivated after cooldown"
            );
        }
    }
}
