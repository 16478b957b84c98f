// src/rotation/strategy.rs

use crate::error::RotatorError;
use crate::rotation::credential::Credential;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Which policy picks the next key on `rotate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationStrategy {
    #[default]
    RoundRobin,
    LeastErrors,
    Random,
}

impl RotationStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoundRobin => "round-robin",
            Self::LeastErrors => "least-errors",
            Self::Random => "random",
        }
    }

    /// Build the selector for this policy.
    pub fn build(self, seed: Option<u64>) -> Box<dyn KeyRotationStrategy> {
        match self {
            Self::RoundRobin => Box::new(RoundRobinStrategy),
            Self::LeastErrors => Box::new(LeastErrorsStrategy),
            Self::Random => Box::new(match seed {
                Some(seed) => RandomStrategy::seeded(seed),
                None => RandomStrategy::from_entropy(),
            }),
        }
    }
}

impl fmt::Display for RotationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationStrategy {
    type Err = RotatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "round-robin" | "roundrobin" => Ok(Self::RoundRobin),
            "least-errors" | "leasterrors" => Ok(Self::LeastErrors),
            "random" => Ok(Self::Random),
            other => Err(RotatorError::config_validation(
                format!("Unknown rotation strategy '{other}'. Supported: round-robin, least-errors, random"),
                Some("rotation.strategy"),
            )),
        }
    }
}

/// Picks the next current key.
///
/// `active` holds only active credentials, ordered by index. The return value
/// is the chosen credential's `index`, or `None` when `active` is empty.
pub trait KeyRotationStrategy: Send {
    fn kind(&self) -> RotationStrategy;

    fn select(&mut self, active: &[&Credential], current_index: usize) -> Option<usize>;
}

/// Advance to the next active key after the current one, wrapping around.
pub struct RoundRobinStrategy;

impl KeyRotationStrategy for RoundRobinStrategy {
    fn kind(&self) -> RotationStrategy {
        RotationStrategy::RoundRobin
    }

    fn select(&mut self, active: &[&Credential], current_index: usize) -> Option<usize> {
        if active.is_empty() {
            return None;
        }
        // A benched current key counts as sitting just before the first active one.
        let next = active
            .iter()
            .position(|c| c.index == current_index)
            .map_or(0, |pos| (pos + 1) % active.len());
        trace!(current_index, next = active[next].index, "Round-robin advance");
        Some(active[next].index)
    }
}

/// Fewest recorded errors wins; ties go to the lowest index.
pub struct LeastErrorsStrategy;

impl KeyRotationStrategy for LeastErrorsStrategy {
    fn kind(&self) -> RotationStrategy {
        RotationStrategy::LeastErrors
    }

    fn select(&mut self, active: &[&Credential], _current_index: usize) -> Option<usize> {
        active
            .iter()
            .min_by_key(|c| (c.error_count, c.index))
            .map(|c| c.index)
    }
}

/// Uniform choice over the active set.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl KeyRotationStrategy for RandomStrategy {
    fn kind(&self) -> RotationStrategy {
        RotationStrategy::Random
    }

    fn select(&mut self, active: &[&Credential], _current_index: usize) -> Option<usize> {
        active.choose(&mut self.rng).map(|c| c.index)
    }
}
