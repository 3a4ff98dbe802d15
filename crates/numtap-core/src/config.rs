//! Game configuration
//!
//! Timing, audio and logging settings. The host loads these from a user file;
//! every field falls back to its default when missing.

use crate::error::ConfigError;
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Round timing contract
    pub timing: RoundTiming,
    /// Audio output settings
    pub audio: AudioSettings,
    /// Logging configuration
    pub log: LogConfig,
}

impl GameConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.audio.validate()?;
        Ok(())
    }
}

/// Delays driving the staged round transitions, in milliseconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoundTiming {
    /// Delay between the completing tap and the Success status
    pub success_reveal_ms: u64,
    /// Dwell between the completing tap and the next round
    pub success_dwell_ms: u64,
    /// Dwell between the over-counting tap and the next round
    pub too_many_dwell_ms: u64,
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self {
            success_reveal_ms: 400,
            success_dwell_ms: 10_000,
            too_many_dwell_ms: 1_000,
        }
    }
}

impl RoundTiming {
    /// Success reveal delay
    pub fn success_reveal(&self) -> Duration {
        Duration::from_millis(self.success_reveal_ms)
    }

    /// Success dwell, measured from the completing tap
    pub fn success_dwell(&self) -> Duration {
        Duration::from_millis(self.success_dwell_ms)
    }

    /// TooMany dwell, measured from the over-counting tap
    pub fn too_many_dwell(&self) -> Duration {
        Duration::from_millis(self.too_many_dwell_ms)
    }

    /// Check that all delays are positive and the reveal lands inside the dwell
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.success_reveal_ms == 0 || self.success_dwell_ms == 0 || self.too_many_dwell_ms == 0
        {
            return Err(ConfigError::InvalidTiming(
                "all round delays must be greater than zero".to_string(),
            ));
        }
        if self.success_reveal_ms >= self.success_dwell_ms {
            return Err(ConfigError::InvalidTiming(format!(
                "success reveal ({} ms) must be shorter than the success dwell ({} ms)",
                self.success_reveal_ms, self.success_dwell_ms
            )));
        }
        Ok(())
    }
}

/// Audio output settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioSettings {
    /// Whether the host should open an audio device at all
    pub enabled: bool,
    /// Master volume applied by the mixer (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            master_volume: 0.8,
        }
    }
}

impl AudioSettings {
    /// Check the master volume range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(ConfigError::InvalidVolume(self.master_volume));
        }
        Ok(())
    }
}
