//! Layout configuration.
//!
//! Tuning knobs for a layout job, with defaults matching the stock layout
//! behavior. Configurations can be loaded from JSON; missing fields fall
//! back to their defaults.
//!
//! ```
//! use floorplan_logic::config::{validate_config, LayoutConfig};
//!
//! let config = LayoutConfig {
//!     seed: Some(42),
//!     ..LayoutConfig::default()
//! };
//! assert!(validate_config(&config).is_empty());
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with adjacency candidates that leave the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Accept them; rooms may overflow and the renderer clips.
    #[default]
    AllowOverflow,
    /// Skip them and move on to the next candidate.
    RejectOutOfCanvas,
}

/// When the living room is seeded at the canvas anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Only when the request asks for at least one living room.
    #[default]
    WhenRequested,
    /// Every job, even if no living room was requested.
    Always,
}

/// Tuning knobs for one layout job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rooms per canvas scaling step.
    pub rooms_per_scale_step: u32,
    /// Lower bound on the catalog base size.
    pub min_base_size: f32,
    /// Shorter canvas side is divided by this to get the base size.
    pub base_size_divisor: f32,
    /// Random samples tried once the adjacency search is exhausted.
    pub fallback_attempts: u32,
    /// Length of each doorway segment.
    pub doorway_length: f32,
    pub bounds_policy: BoundsPolicy,
    pub seed_living_room: SeedPolicy,
    /// Random seed (None = entropy).
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rooms_per_scale_step: 5,
            min_base_size: 5.0,
            base_size_divisor: 7.0,
            fallback_attempts: 5,
            doorway_length: 1.0,
            bounds_policy: BoundsPolicy::AllowOverflow,
            seed_living_room: SeedPolicy::WhenRequested,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Random source for this configuration: seeded if `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("rooms_per_scale_step must be at least 1")]
    ZeroScaleStep,
    #[error("min_base_size must be positive, got {0}")]
    NonPositiveBaseSize(f32),
    #[error("base_size_divisor must be positive, got {0}")]
    NonPositiveDivisor(f32),
    #[error("doorway_length must be positive, got {0}")]
    NonPositiveDoorway(f32),
}

/// Validate a layout configuration, returning all errors found.
pub fn validate_config(config: &LayoutConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.rooms_per_scale_step == 0 {
        errors.push(ConfigError::ZeroScaleStep);
    }
    // Written as !(x > 0) so NaN is rejected too.
    if !(config.min_base_size > 0.0) {
        errors.push(ConfigError::NonPositiveBaseSize(config.min_base_size));
    }
    if !(config.base_size_divisor > 0.0) {
        errors.push(ConfigError::NonPositiveDivisor(config.base_size_divisor));
    }
    if !(config.doorway_length > 0.0) {
        errors.push(ConfigError::NonPositiveDoorway(config.doorway_length));
    }

    errors
}
