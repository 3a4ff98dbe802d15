//! Pop cue and celebration fanfare
//!
//! Both cues are literal scores built against one shared origin. Playing them is
//! fire-and-forget: scheduler failures are logged here and never returned.

use super::ToneScheduler;
use crate::tone::{ToneEvent, Waveform};
use rand::Rng;
use tracing::{debug, warn};

/// (frequency Hz, start s, duration s)
const OPENING: [(f32, f32, f32); 4] = [
    (523.25, 0.0, 0.3),  // C5
    (659.25, 0.3, 0.3),  // E5
    (784.0, 0.6, 0.4),   // G5
    (987.77, 1.0, 0.5),  // B5
];

/// (frequency Hz, start s)
const BELLS: [(f32, f32); 8] = [
    (523.25, 0.5),  // C5
    (659.25, 0.8),  // E5
    (784.0, 1.1),   // G5
    (1046.5, 1.4),  // C6
    (1318.5, 1.7),  // E6
    (1568.0, 2.0),  // G6
    (1046.5, 2.3),  // C6
    (1318.5, 2.6),  // E6
];

/// (frequency Hz, start s)
const WHISTLES: [(f32, f32); 5] = [
    (784.0, 1.5),    // G5
    (987.77, 1.8),   // B5
    (1174.66, 2.1),  // D6
    (1318.51, 2.4),  // E6
    (1567.98, 2.7),  // G6
];

/// (frequency Hz, start s, duration s)
const MELODY: [(f32, f32, f32); 6] = [
    (392.0, 2.0, 0.4),    // G4
    (523.25, 2.5, 0.4),   // C5
    (659.25, 3.0, 0.4),   // E5
    (784.0, 3.5, 0.5),    // G5
    (987.77, 4.1, 0.5),   // B5
    (1174.66, 4.7, 0.6),  // D6
];

/// Melody notes from this index on switch from triangle to square
const MELODY_SQUARE_FROM: usize = 3;

/// (start s, chord frequencies Hz)
const FINALE: [(f32, &[f32]); 3] = [
    (4.5, &[523.25, 659.25, 784.0]),
    (5.2, &[659.25, 783.99, 987.77]),
    (5.9, &[523.25, 659.25, 784.0, 1046.5]),
];

const SPARKLE_COUNT: usize = 12;
const SPARKLE_START: f32 = 3.0;
const SPARKLE_SPACING: f32 = 0.3;

/// The short tap "pop": triangle glide 800 Hz down to 400 Hz
pub fn pop_cue() -> ToneEvent {
    ToneEvent::new(Waveform::Triangle, 800.0, 0.0, 0.1, 0.3)
        .with_attack(0.0)
        .with_sweep(400.0, 0.08)
        .with_lowpass(2000.0)
}

/// Build the six-layer victory fanfare.
///
/// Only the sparkle layer is random (pitch in 2-3 kHz); everything else is a
/// fixed score.
pub fn celebration_fanfare<R: Rng + ?Sized>(rng: &mut R) -> Vec<ToneEvent> {
    let mut events = Vec::with_capacity(45);

    // Opening fanfare
    for (freq, start, duration) in OPENING {
        events.push(ToneEvent::new(Waveform::Square, freq, start, duration, 0.5).with_attack(0.05));
    }

    // Bells
    for (freq, start) in BELLS {
        events.push(
            ToneEvent::new(Waveform::Sine, freq, start, 1.5, 0.4)
                .with_decay_end(1.2)
                .with_attack(0.1),
        );
    }

    // Whistles
    for (freq, start) in WHISTLES {
        events.push(
            ToneEvent::new(Waveform::Sawtooth, freq, start, 0.5, 0.3)
                .with_decay_end(0.4)
                .with_attack(0.05),
        );
    }

    // Main melody
    for (idx, (freq, start, duration)) in MELODY.into_iter().enumerate() {
        let waveform = if idx >= MELODY_SQUARE_FROM {
            Waveform::Square
        } else {
            Waveform::Triangle
        };
        events.push(ToneEvent::new(waveform, freq, start, duration, 0.6).with_attack(0.08));
    }

    // Finale chords
    for (start, chord) in FINALE {
        for &freq in chord {
            events.push(
                ToneEvent::new(Waveform::Square, freq, start, 1.0, 0.5)
                    .with_decay_end(0.8)
                    .with_attack(0.08),
            );
        }
    }

    // Sparkles
    for i in 0..SPARKLE_COUNT {
        let start = SPARKLE_START + i as f32 * SPARKLE_SPACING;
        let freq = rng.random_range(2000.0..3000.0);
        events.push(
            ToneEvent::new(Waveform::Sine, freq, start, 0.2, 0.2)
                .with_decay_end(0.15)
                .with_attack(0.02),
        );
    }

    events
}

/// Play the pop cue, swallowing failures
pub fn play_pop(scheduler: &mut dyn ToneScheduler) {
    play(scheduler, "pop", &[pop_cue()]);
}

/// Play the celebration fanfare, swallowing failures
pub fn play_celebration<R: Rng + ?Sized>(scheduler: &mut dyn ToneScheduler, rng: &mut R) {
    let events = celebration_fanfare(rng);
    play(scheduler, "celebration", &events);
}

fn play(scheduler: &mut dyn ToneScheduler, cue: &str, events: &[ToneEvent]) {
    if !scheduler.is_available() {
        debug!("Audio unavailable, skipping {} cue", cue);
        return;
    }
    if let Err(e) = scheduler.schedule_batch(events) {
        warn!("Failed to schedule {} cue: {}", cue, e);
    }
}
