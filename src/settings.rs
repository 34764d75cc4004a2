//! Simulation settings
//!
//! Persisted as JSON. Missing fields fall back to the defaults in `consts`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Dust burst parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DustSettings {
    /// Particles per collision event
    pub count: u32,
    /// Particle `i` moves at `i * speed_step`
    pub speed_step: f64,
    pub radius: f64,
    /// Initial lifetime in simulation seconds
    pub lifetime: f64,
}

impl Default for DustSettings {
    fn default() -> Self {
        Self {
            count: DUST_BURST_COUNT,
            speed_step: DUST_SPEED_STEP,
            radius: DUST_RADIUS,
            lifetime: DUST_LIFETIME,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Fixed physics step (simulation seconds)
    pub time_per_tick: f64,
    pub dust: DustSettings,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            time_per_tick: TIME_PER_TICK,
            dust: DustSettings::default(),
        }
    }
}

/// Failure to load or validate settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// `time_per_tick` must be strictly positive and finite
    InvalidTimeStep(f64),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {e}"),
            SettingsError::Json(e) => write!(f, "settings JSON error: {e}"),
            SettingsError::InvalidTimeStep(dt) => write!(f, "invalid time_per_tick: {dt}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
            SettingsError::InvalidTimeStep(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

impl SimSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.time_per_tick.is_finite() && self.time_per_tick > 0.0) {
            return Err(SettingsError::InvalidTimeStep(self.time_per_tick));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: SimSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
