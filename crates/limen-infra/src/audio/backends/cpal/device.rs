// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Contains the `CpalAudioDevice` struct.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use limen_core::audio::{AudioDevice, AudioDeviceError, MixCallback, StreamInfo};

/// An `AudioDevice` that plays through the host's default output via CPAL.
#[derive(Default)]
pub struct CpalAudioDevice;

impl CpalAudioDevice {
    /// Creates a new instance of the CPAL audio device backend.
    pub fn new() -> Self {
        Self
    }
}

impl AudioDevice for CpalAudioDevice {
    fn start(self: Box<Self>, mut on_mix_needed: MixCallback) -> Result<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioDeviceError::NoOutputDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioDeviceError::UnsupportedConfig(e.to_string()))?;

        let stream_info = StreamInfo {
            channels: config.channels(),
            sample_rate: config.sample_rate(),
        };
        log::info!(
            "Opening audio output: {} channel(s) at {} Hz",
            stream_info.channels,
            stream_info.sample_rate
        );

        let audio_callback = move |output: &mut [f32], _: &cpal::OutputCallbackInfo| {
            on_mix_needed(output, &stream_info);
        };
        let error_callback = |err| {
            log::error!("An error occurred on the audio stream: {err}");
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device
                .build_output_stream(&config.into(), audio_callback, error_callback, None)
                .map_err(|e| AudioDeviceError::StreamFailed(e.to_string()))?,
            format => {
                return Err(AudioDeviceError::UnsupportedConfig(format!(
                    "sample format {format}"
                ))
                .into())
            }
        };

        stream.play().context("starting the output stream")?;

        // The stream lives for the rest of the process.
        std::mem::forget(stream);

        Ok(())
    }
}
