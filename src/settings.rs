//! Driver tuning
//!
//! Physics knobs for the tick driver plus the RNG seed. Stored as JSON;
//! missing fields fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FINISH_DELAY;
use crate::error::LoadError;

/// Tick driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Stepping ===
    /// Longest sub-step (seconds) a tick is split into
    pub max_step: f64,

    // === Player motion ===
    /// Horizontal run speed (tiles/s)
    pub player_x_speed: f64,
    /// Downward acceleration (tiles/s²)
    pub gravity: f64,
    /// Upward speed applied on jump (tiles/s)
    pub jump_speed: f64,

    // === Level lifecycle ===
    /// Grace period (seconds) after a level is won or lost
    pub finish_delay: f64,

    /// Seed for randomized actor state; `None` draws a fresh one
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_step: 0.05,

            player_x_speed: 7.0,
            gravity: 30.0,
            jump_speed: 17.0,

            finish_delay: FINISH_DELAY,

            seed: None,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace a non-positive step with the default so ticks always progress
    pub(crate) fn sanitized(mut self) -> Self {
        if !(self.max_step > 0.0) {
            log::warn!("Ignoring max_step {}, using default", self.max_step);
            self.max_step = Self::default().max_step;
        }
        self
    }
}
