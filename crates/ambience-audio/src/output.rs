//! Audio output using cpal.
//!
//! The device callback locks the shared mixer and renders straight into a
//! scratch buffer, then converts to the device sample format.

use crate::mixer::SharedMixer;
use ambience_core::{AmbienceError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use tracing::{error, info};

/// An open output stream fed by a [`crate::Mixer`].
///
/// Audio stops when this is dropped.
pub struct AudioOutput {
    _stream: Stream,
}

impl AudioOutput {
    /// Open the default output device and start pulling from `mixer`.
    ///
    /// Any failure here means the platform cannot play audio at all and is
    /// reported as [`AmbienceError::AudioDevice`].
    pub fn open(mixer: SharedMixer) -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| AmbienceError::AudioDevice("No output device available".into()))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let config = device.default_output_config().map_err(|e| {
            AmbienceError::AudioDevice(format!("Failed to get default output config: {}", e))
        })?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(&device, &config.into(), mixer)?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(&device, &config.into(), mixer)?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(&device, &config.into(), mixer)?,
            format => {
                return Err(AmbienceError::AudioDevice(format!(
                    "Unsupported sample format: {:?}",
                    format
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AmbienceError::AudioDevice(format!("Failed to start stream: {}", e)))?;

        info!(
            device = %device_name,
            sample_rate,
            channels,
            "Audio output opened"
        );

        Ok(Self { _stream: stream })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &StreamConfig,
        mixer: SharedMixer,
    ) -> Result<Stream> {
        let channels = config.channels as usize;
        let sample_rate = config.sample_rate.0;
        let mut scratch: Vec<f32> = Vec::new();

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    if scratch.len() < data.len() {
                        scratch.resize(data.len(), 0.0);
                    }
                    let rendered = &mut scratch[..data.len()];
                    mixer.lock().render(rendered, channels, sample_rate);

                    for (sample, &value) in data.iter_mut().zip(rendered.iter()) {
                        *sample = T::from_sample(value);
                    }
                },
                move |err| {
                    error!("Audio output error: {}", err);
                },
                None,
            )
            .map_err(|e| AmbienceError::AudioDevice(format!("Failed to build output stream: {}", e)))
    }
}
