// src/global.rs

//! Process-wide rotator for hosts with a single authoritative key set.
//!
//! Prefer passing an `Arc<CredentialRotator>` explicitly. This slot exists for
//! the outermost composition point only.

use crate::error::Result;
use crate::rotation::{CredentialRotator, RotatorOverrides};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

static GLOBAL_ROTATOR: Lazy<RwLock<Option<Arc<CredentialRotator>>>> =
    Lazy::new(|| RwLock::new(None));

/// Build a rotator and install it, replacing any previous one.
///
/// If construction fails the previously installed rotator stays in place.
pub fn initialize_global(raw: &str, overrides: RotatorOverrides) -> Result<Arc<CredentialRotator>> {
    let rotator = Arc::new(CredentialRotator::new(raw, overrides)?);
    let previous = GLOBAL_ROTATOR.write().replace(Arc::clone(&rotator));
    info!(
        credentials.total = rotator.get_total_count(),
        replaced = previous.is_some(),
        "Global credential rotator installed"
    );
    Ok(rotator)
}

pub fn global() -> Option<Arc<CredentialRotator>> {
    GLOBAL_ROTATOR.read().clone()
}

/// `true` when a global rotator exists and manages more than one key.
pub fn has_multiple() -> bool {
    GLOBAL_ROTATOR
        .read()
        .as_ref()
        .is_some_and(|rotator| rotator.has_multiple())
}

/// Remove the global rotator, returning it if one was installed.
pub fn clear_global() -> Option<Arc<CredentialRotator>> {
    GLOBAL_ROTATOR.write().take()
}
