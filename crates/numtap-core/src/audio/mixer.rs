//! Software tone mixer
//!
//! Sample-accurate renderer for scheduled [`ToneEvent`]s. The cpal backend owns
//! one behind a mutex and pulls from it on the audio thread; tests render it
//! offline.

use crate::tone::ToneEvent;
use std::f32::consts::TAU;

/// A tone being rendered
#[derive(Debug, Clone)]
struct Voice {
    event: ToneEvent,
    /// Absolute sample index at which the tone starts
    start_sample: u64,
    /// Absolute sample index after which the tone is retired
    end_sample: u64,
    /// Oscillator phase in cycles
    phase: f32,
    /// One-pole low-pass memory
    lowpass_state: f32,
}

/// Mixes every scheduled voice into a mono signal
#[derive(Debug)]
pub struct ToneMixer {
    sample_rate: u32,
    master_volume: f32,
    /// Samples rendered since creation; the time base for new batches
    clock: u64,
    voices: Vec<Voice>,
}

impl ToneMixer {
    /// Create a mixer for `sample_rate`
    pub fn new(sample_rate: u32, master_volume: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            master_volume: master_volume.clamp(0.0, 1.0),
            clock: 0,
            voices: Vec::new(),
        }
    }

    /// Output sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples rendered so far
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Number of pending or sounding voices
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Change the master volume
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Schedule a batch; all offsets are relative to the current clock
    pub fn schedule(&mut self, events: &[ToneEvent]) {
        let origin = self.clock;
        let rate = self.sample_rate as f32;
        for event in events {
            if event.duration_seconds <= 0.0 {
                continue;
            }
            let start_sample = origin + (event.start_offset_seconds.max(0.0) * rate).round() as u64;
            let length = (event.duration_seconds * rate).ceil().max(1.0) as u64;
            self.voices.push(Voice {
                event: *event,
                start_sample,
                end_sample: start_sample + length,
                phase: 0.0,
                lowpass_state: 0.0,
            });
        }
    }

    /// Drop every pending and sounding voice
    pub fn cancel_all(&mut self) {
        self.voices.clear();
    }

    /// Render the next `out.len()` mono samples
    pub fn render_mono(&mut self, out: &mut [f32]) {
        self.render_interleaved(out, 1);
    }

    /// Render interleaved frames, duplicating the mono mix to every channel
    pub fn render_interleaved(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let rate = self.sample_rate as f32;
        let dt = 1.0 / rate;

        for frame in out.chunks_mut(channels) {
            let now = self.clock;
            let mut mix = 0.0;

            for voice in &mut self.voices {
                if now < voice.start_sample || now >= voice.end_sample {
                    continue;
                }
                let t = (now - voice.start_sample) as f32 * dt;
                let freq = voice.event.frequency_at(t);
                let mut sample = voice.event.waveform.sample(voice.phase);
                voice.phase = (voice.phase + freq * dt).fract();

                if let Some(cutoff) = voice.event.lowpass_hz {
                    let alpha = 1.0 - (-TAU * cutoff * dt).exp();
                    voice.lowpass_state += alpha * (sample - voice.lowpass_state);
                    sample = voice.lowpass_state;
                }

                mix += sample * voice.event.gain_at(t);
            }

            let value = (mix * self.master_volume).clamp(-1.0, 1.0);
            for slot in frame.iter_mut() {
                *slot = value;
            }

            self.clock += 1;
        }

        let clock = self.clock;
        self.voices.retain(|voice| voice.end_sample > clock);
    }
}
