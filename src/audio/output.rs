//! Platform audio output stream
//!
//! Opens the default output device at the fixed sample rate / channel
//! count from the audio configuration and keeps the stream alive for
//! the shell's lifetime. The stream callback runs on a platform-managed
//! thread and drains the sample ring; the shell never touches that
//! thread directly.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

use crate::audio::ring::{drain_interleaved, RingConsumer};
use crate::core::config::AudioConfig;
use crate::core::error::{AudioError, Result};

/// Audio output stream handle.
///
/// Dropping this stops and releases the stream.
pub struct AudioOutput {
    // Held for its lifetime only; the stream keeps playing while it exists
    _stream: cpal::Stream,
    sample_rate: u32,
    channels: u16,
}

impl AudioOutput {
    /// Open the default output device and start the stream.
    ///
    /// All-or-nothing: any failure (no device, unsupported format,
    /// stream creation or start failure) is returned as an error and
    /// no stream is left behind.
    pub fn open(config: &AudioConfig, mut consumer: RingConsumer) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::DeviceNotFound)?;

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::StreamOpenFailed(format!("default config query failed: {}", e)))?;

        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat(format!(
                "device default format is {:?}, only f32 output is supported",
                supported.sample_format()
            ))
            .into());
        }

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err| warn!("Output stream error: {}", err);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    drain_interleaved(&mut consumer, data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamOpenFailed(format!("{}", e)))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamOpenFailed(format!("failed to start stream: {}", e)))?;

        info!(
            device = device.name().unwrap_or_else(|_| "<unknown>".to_string()),
            sample_rate = config.sample_rate,
            channels = config.channels,
            "Audio output stream started"
        );

        Ok(Self {
            _stream: stream,
            sample_rate: config.sample_rate,
            channels: config.channels,
        })
    }

    /// Fixed sample rate of the output stream in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Fixed channel count of the output stream.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
