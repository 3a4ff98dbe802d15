//! cpal output backend
//!
//! Opens the default output device and renders a shared [`ToneMixer`] from the
//! audio callback. Scheduling only takes the mixer lock for as long as it takes
//! to append voices.

use super::mixer::ToneMixer;
use super::ToneScheduler;
use crate::error::AudioError;
use crate::tone::ToneEvent;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

/// Tone scheduler playing through the default cpal output device
pub struct CpalScheduler {
    mixer: Arc<Mutex<ToneMixer>>,
    /// Kept alive for as long as tones should play
    _stream: cpal::Stream,
    device_name: String,
}

impl CpalScheduler {
    /// Open the default output device
    pub fn new(master_volume: f32) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::StreamConfig(e.to_string()))?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let mixer = Arc::new(Mutex::new(ToneMixer::new(
            config.sample_rate.0,
            master_volume,
        )));

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, mixer.clone()),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, mixer.clone()),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, mixer.clone()),
            other => Err(AudioError::StreamConfig(format!(
                "unsupported sample format {other:?}"
            ))),
        }?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        info!(
            "Audio output opened on '{}' ({} Hz, {} ch)",
            device_name, config.sample_rate.0, config.channels
        );

        Ok(Self {
            mixer,
            _stream: stream,
            device_name,
        })
    }

    /// Name of the output device
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mixer: Arc<Mutex<ToneMixer>>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0.0);
                mixer.lock().render_interleaved(&mut scratch, channels);
                for (out, sample) in data.iter_mut().zip(scratch.iter()) {
                    *out = T::from_sample(*sample);
                }
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| AudioError::StreamBuild(e.to_string()))
}

impl ToneScheduler for CpalScheduler {
    fn schedule_batch(&mut self, events: &[ToneEvent]) -> Result<(), AudioError> {
        self.mixer.lock().schedule(events);
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.mixer.lock().cancel_all();
    }
}
