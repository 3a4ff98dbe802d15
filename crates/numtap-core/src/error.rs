//! Error types for the game core
use thiserror::Error;

/// Audio backend errors.
///
/// These never reach the round state machine; the cue players log and drop them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    /// The host has no audio capability at all
    #[error("Audio capability unavailable")]
    Unavailable,

    /// No default output device could be found
    #[error("No audio output device")]
    NoOutputDevice,

    /// Querying the output stream configuration failed
    #[error("Stream config error: {0}")]
    StreamConfig(String),

    /// Building the output stream failed
    #[error("Stream build error: {0}")]
    StreamBuild(String),

    /// Starting playback failed
    #[error("Stream play error: {0}")]
    StreamPlay(String),

    /// Audio was switched off in the configuration
    #[error("Audio disabled by configuration")]
    Disabled,
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A round timing value is zero or out of order
    #[error("Invalid timing: {0}")]
    InvalidTiming(String),

    /// Master volume outside of [0, 1]
    #[error("Invalid master volume: {0}")]
    InvalidVolume(f32),

    /// Requested target is outside of the playable range
    #[error("Target {0} out of range")]
    TargetOutOfRange(u32),
}

/// Core error types
#[derive(Error, Debug)]
pub enum GameError {
    /// Audio backend failure
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, GameError>;
