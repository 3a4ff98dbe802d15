//! Tone model
//!
//! A `ToneEvent` describes one scheduled oscillation: waveform, pitch, when it
//! starts relative to a shared origin and how its gain rises and falls. Gains
//! follow exponential ramps, which are undefined at zero, so every envelope
//! bottoms out at [`GAIN_FLOOR`] instead.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Lowest gain an envelope ever reaches while the tone is alive
pub const GAIN_FLOOR: f32 = 0.0001;

/// Shortest oscillator lifetime a tone can have
pub const MIN_DURATION_SECONDS: f32 = 0.001;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Waveform {
    /// Pure sine
    Sine,
    /// Triangle
    Triangle,
    /// Square
    Square,
    /// Rising sawtooth
    Sawtooth,
}

impl Waveform {
    /// Sample the waveform at `phase` (cycles, wrapped to 0..1)
    pub fn sample(self, phase: f32) -> f32 {
        let p = phase.rem_euclid(1.0);
        match self {
            Waveform::Sine => (p * TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * p - 1.0,
        }
    }
}

/// Exponential pitch glide from the event's base frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySweep {
    /// Frequency reached at the end of the glide
    pub to_hz: f32,
    /// Glide length in seconds
    pub over_seconds: f32,
}

/// One scheduled oscillation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneEvent {
    /// Oscillator shape
    pub waveform: Waveform,
    /// Base frequency in Hz
    pub frequency_hz: f32,
    /// Start time relative to the batch origin, in seconds (>= 0)
    pub start_offset_seconds: f32,
    /// Oscillator lifetime in seconds (> 0)
    pub duration_seconds: f32,
    /// Gain at the top of the envelope (0 < peak <= 1)
    pub peak_gain: f32,
    /// Time to ramp from the floor to the peak; zero starts at the peak
    pub attack_seconds: f32,
    /// Time at which the gain is back at the floor (<= duration)
    pub decay_end_seconds: f32,
    /// Optional pitch glide
    pub sweep: Option<FrequencySweep>,
    /// Optional one-pole low-pass cutoff in Hz
    pub lowpass_hz: Option<f32>,
}

impl ToneEvent {
    /// Create a tone whose envelope spans its full duration.
    ///
    /// The attack defaults to 8% of the duration. The duration is raised to at
    /// least [`MIN_DURATION_SECONDS`].
    pub fn new(
        waveform: Waveform,
        frequency_hz: f32,
        start_offset_seconds: f32,
        duration_seconds: f32,
        peak_gain: f32,
    ) -> Self {
        let duration_seconds = duration_seconds.max(MIN_DURATION_SECONDS);
        Self {
            waveform,
            frequency_hz,
            start_offset_seconds: start_offset_seconds.max(0.0),
            duration_seconds,
            peak_gain: peak_gain.clamp(GAIN_FLOOR, 1.0),
            attack_seconds: duration_seconds * 0.08,
            decay_end_seconds: duration_seconds,
            sweep: None,
            lowpass_hz: None,
        }
    }

    /// Set the attack time
    pub fn with_attack(mut self, attack_seconds: f32) -> Self {
        self.attack_seconds = attack_seconds.clamp(0.0, self.decay_end_seconds);
        self
    }

    /// Set when the gain returns to the floor
    pub fn with_decay_end(mut self, decay_end_seconds: f32) -> Self {
        self.decay_end_seconds = decay_end_seconds.min(self.duration_seconds);
        self.attack_seconds = self.attack_seconds.min(self.decay_end_seconds);
        self
    }

    /// Glide exponentially to `to_hz` over `over_seconds`
    pub fn with_sweep(mut self, to_hz: f32, over_seconds: f32) -> Self {
        self.sweep = Some(FrequencySweep {
            to_hz,
            over_seconds,
        });
        self
    }

    /// Run the oscillator through a low-pass filter
    pub fn with_lowpass(mut self, cutoff_hz: f32) -> Self {
        self.lowpass_hz = Some(cutoff_hz);
        self
    }

    /// Absolute end time relative to the batch origin
    pub fn end_seconds(&self) -> f32 {
        self.start_offset_seconds + self.duration_seconds
    }

    /// Envelope gain at `t` seconds after this tone's own start.
    ///
    /// Zero outside the tone's lifetime, never below [`GAIN_FLOOR`] inside it.
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration_seconds {
            return 0.0;
        }
        let peak = self.peak_gain.max(GAIN_FLOOR);
        if t < self.attack_seconds {
            return exp_ramp(GAIN_FLOOR, peak, t / self.attack_seconds);
        }
        let decay_len = self.decay_end_seconds - self.attack_seconds;
        if decay_len <= 0.0 || t >= self.decay_end_seconds {
            return GAIN_FLOOR;
        }
        exp_ramp(peak, GAIN_FLOOR, (t - self.attack_seconds) / decay_len)
    }

    /// Oscillator frequency at `t` seconds after this tone's own start
    pub fn frequency_at(&self, t: f32) -> f32 {
        match self.sweep {
            Some(sweep) if sweep.over_seconds > 0.0 => {
                let progress = (t / sweep.over_seconds).clamp(0.0, 1.0);
                exp_ramp(self.frequency_hz, sweep.to_hz, progress)
            }
            Some(sweep) => sweep.to_hz,
            None => self.frequency_hz,
        }
    }
}

/// Exponential interpolation between two positive values, `progress` in 0..=1
fn exp_ramp(from: f32, to: f32, progress: f32) -> f32 {
    from * (to / from).powf(progress.clamp(0.0, 1.0))
}
