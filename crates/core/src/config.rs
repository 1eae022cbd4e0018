//! Engine configuration
//!
//! Dimensions and thresholds are fixed when an engine is built. Nothing in the
//! crate reads process-wide state; callers construct an [`EngineConfig`] once
//! and pass it down.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    GRID_HEIGHT, GRID_WIDTH, MAX_FOOTPRINT_SIDE, MAX_GRID_SIDE, SPAWN_VALUES, WIN_VALUE,
};

/// What happens to tiles that lost their connection to the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatingPolicy {
    /// Delete floating tiles and bank their values as score
    #[default]
    Remove,
    /// Drop floating tiles straight down their column, unscored
    Fall,
}

/// Engine configuration
///
/// Missing fields fall back to the canonical 20x12 game when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub height: usize,
    pub width: usize,
    pub win_value: u32,
    pub spawn_values: [u32; 2],
    pub floating_policy: FloatingPolicy,
}

impl EngineConfig {
    /// Canonical configuration with a custom grid size
    pub fn with_dimensions(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = MAX_FOOTPRINT_SIDE..=MAX_GRID_SIDE;
        if !side.contains(&self.height) || !side.contains(&self.width) {
            return Err(ConfigError::InvalidDimensions {
                height: self.height,
                width: self.width,
                min: MAX_FOOTPRINT_SIDE,
                max: MAX_GRID_SIDE,
            });
        }

        for &value in &self.spawn_values {
            if value < 2 || !value.is_power_of_two() {
                return Err(ConfigError::InvalidSpawnValue(value));
            }
        }

        let largest_spawn = self.spawn_values.iter().copied().max().unwrap_or(2);
        if !self.win_value.is_power_of_two() || self.win_value <= largest_spawn {
            return Err(ConfigError::InvalidWinValue(self.win_value));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            height: GRID_HEIGHT,
            width: GRID_WIDTH,
            win_value: WIN_VALUE,
            spawn_values: SPAWN_VALUES,
            floating_policy: FloatingPolicy::Remove,
        }
    }
}
