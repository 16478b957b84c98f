//! Common test utilities and fixtures
#![allow(dead_code)]

use gemini_key_rotator::{CredentialRotator, RotationStrategy, RotatorOverrides};

pub const THREE_KEYS: &str = "AIzaSyTestKeyNumber0001;AIzaSyTestKeyNumber0002;AIzaSyTestKeyNumber0003";

/// Test rotator builder
pub struct TestRotatorBuilder {
    raw: String,
    overrides: RotatorOverrides,
}

impl TestRotatorBuilder {
    pub fn new() -> Self {
        Self {
            raw: THREE_KEYS.to_string(),
            overrides: RotatorOverrides::default(),
        }
    }

    pub fn with_keys(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    pub fn with_strategy(mut self, strategy: RotationStrategy) -> Self {
        self.overrides = self.overrides.with_strategy(strategy);
        self
    }

    pub fn with_max_errors(mut self, max_errors: u32) -> Self {
        self.overrides = self.overrides.with_max_errors_per_key(max_errors);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.overrides = self.overrides.with_seed(seed);
        self
    }

    pub fn build(self) -> CredentialRotator {
        CredentialRotator::new(&self.raw, self.overrides).expect("Failed to build test rotator")
    }
}

impl Default for TestRotatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Report `times` errors against whatever key is current.
pub fn fail_current(rotator: &CredentialRotator, times: u32, message: &str) {
    for _ in 0..times {
        rotator.report_error(message);
    }
}

/// Error counts in index order.
pub fn error_counts(rotator: &CredentialRotator) -> Vec<u32> {
    rotator.get_all_status().iter().map(|c| c.error_count).collect()
}
