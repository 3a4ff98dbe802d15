//! Tone scheduling
//!
//! The game never talks to an audio device directly. It hands batches of
//! [`ToneEvent`]s to a [`ToneScheduler`]; each batch shares one time origin
//! captured when the batch is scheduled. Backends that have no audio capability
//! simply do nothing.

use crate::error::AudioError;
use crate::tone::ToneEvent;
use parking_lot::Mutex;
use std::sync::Arc;

pub mod cues;
pub mod mixer;

#[cfg(feature = "audio")]
pub mod cpal_backend;

/// Capability to schedule timed tones on some audio backend
pub trait ToneScheduler {
    /// Schedule a batch of tones whose offsets share one origin (now).
    fn schedule_batch(&mut self, events: &[ToneEvent]) -> Result<(), AudioError>;

    /// Schedule a single tone
    fn schedule_tone(&mut self, event: &ToneEvent) -> Result<(), AudioError> {
        self.schedule_batch(std::slice::from_ref(event))
    }

    /// Whether scheduled tones will actually be heard
    fn is_available(&self) -> bool {
        true
    }

    /// Drop every pending and sounding tone
    fn cancel_all(&mut self) {}
}

/// Scheduler for hosts without audio. Every call is a silent no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScheduler;

impl ToneScheduler for NullScheduler {
    fn schedule_batch(&mut self, _events: &[ToneEvent]) -> Result<(), AudioError> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct RecorderLog {
    batches: Vec<Vec<ToneEvent>>,
    cancellations: usize,
    fail_with: Option<AudioError>,
}

/// Scheduler that remembers every batch it receives.
///
/// Clones share the same log, so a copy can be kept for inspection while the
/// original is owned by the game.
#[derive(Debug, Default, Clone)]
pub struct ToneRecorder {
    log: Arc<Mutex<RecorderLog>>,
}

impl ToneRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that rejects every batch with `error`
    pub fn failing(error: AudioError) -> Self {
        let recorder = Self::default();
        recorder.log.lock().fail_with = Some(error);
        recorder
    }

    /// All batches received so far
    pub fn batches(&self) -> Vec<Vec<ToneEvent>> {
        self.log.lock().batches.clone()
    }

    /// Number of batches received so far
    pub fn batch_count(&self) -> usize {
        self.log.lock().batches.len()
    }

    /// How many times `cancel_all` was called
    pub fn cancellations(&self) -> usize {
        self.log.lock().cancellations
    }

    /// Forget everything recorded
    pub fn clear(&self) {
        let mut log = self.log.lock();
        log.batches.clear();
        log.cancellations = 0;
    }
}

impl ToneScheduler for ToneRecorder {
    fn schedule_batch(&mut self, events: &[ToneEvent]) -> Result<(), AudioError> {
        let mut log = self.log.lock();
        if let Some(error) = &log.fail_with {
            return Err(error.clone());
        }
        log.batches.push(events.to_vec());
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.log.lock().cancellations += 1;
    }
}
