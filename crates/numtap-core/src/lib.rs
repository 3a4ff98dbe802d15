//! numtap Core - Game Model and Timed Choreography
//!
//! This crate contains the core of the numtap counting game, including:
//! - Random target selection without immediate repeats
//! - Procedural celebration effects (confetti, balloons, sparkles)
//! - Tone model, the pop cue and the celebration fanfare
//! - Tone scheduler adapter with a software mixer backend
//! - Generation-tagged timer queue
//! - Round state machine and read-only snapshots
//!
//! ## Feature Flags
//!
//! - `audio`: Enable the `cpal` output backend for the tone scheduler

#![warn(missing_docs)]

pub mod audio;
pub mod config;
pub mod effects;
pub mod error;
pub mod logging;
pub mod round;
pub mod target;
pub mod timer;
pub mod tone;

// --- Re-exports grouped by category ---

// Audio
#[cfg(feature = "audio")]
pub use audio::cpal_backend::CpalScheduler;
pub use audio::cues::{celebration_fanfare, play_celebration, play_pop, pop_cue};
pub use audio::mixer::ToneMixer;
pub use audio::{NullScheduler, ToneRecorder, ToneScheduler};

// Configuration & Logging
pub use config::{AudioSettings, GameConfig, RoundTiming};
pub use logging::LogConfig;

// Effects
pub use effects::{
    generate_balloons, generate_confetti, generate_sparkles, Balloon, Celebration, ConfettiPiece,
    FloatingStar, Sparkle, BALLOON_PALETTE, CONFETTI_PALETTE, FLOATING_STARS,
};

// Errors
pub use error::{AudioError, ConfigError, GameError, Result};

// Game
pub use round::{GameEvent, RoundMachine, RoundSnapshot, RoundStatus, EVENT_LOG_CAPACITY};
pub use target::{next_target, TARGET_MAX, TARGET_MIN};
pub use timer::{Generation, TimerHandle, TimerQueue};

// Tones
pub use tone::{FrequencySweep, ToneEvent, Waveform, GAIN_FLOOR, MIN_DURATION_SECONDS};
