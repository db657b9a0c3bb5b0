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

//! Defines the abstract `AudioDevice` trait.

use anyhow::Result;
use std::fmt;

/// A struct providing information about the audio stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    /// The number of channels (e.g., 2 for stereo).
    pub channels: u16,
    /// The number of samples per second (e.g., 44100 Hz).
    pub sample_rate: u32,
}

impl Default for StreamInfo {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48_000,
        }
    }
}

/// Callback filling an interleaved output buffer.
pub type MixCallback = Box<dyn FnMut(&mut [f32], &StreamInfo) + Send>;

/// The abstract contract for a hardware audio device backend.
///
/// The boundary between the mixer and the platform code that talks to the
/// sound card. The backend calls `on_mix_needed` on its own audio thread
/// whenever it needs more samples, interleaved (`[L, R, L, R, ...]`).
pub trait AudioDevice: Send + Sync {
    /// Starts the output stream. The device runs for the rest of the process.
    fn start(self: Box<Self>, on_mix_needed: MixCallback) -> Result<()>;
}

/// Errors raised by audio device backends while opening a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioDeviceError {
    /// The host reported no default output device.
    NoOutputDevice,
    /// The device offered no usable stream configuration.
    UnsupportedConfig(String),
    /// Building or starting the stream failed.
    StreamFailed(String),
}

impl fmt::Display for AudioDeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioDeviceError::NoOutputDevice => write!(f, "No audio output device available"),
            AudioDeviceError::UnsupportedConfig(msg) => {
                write!(f, "Unsupported audio stream configuration: {msg}")
            }
            AudioDeviceError::StreamFailed(msg) => write!(f, "Audio stream failed: {msg}"),
        }
    }
}

impl std::error::Error for AudioDeviceError {}
