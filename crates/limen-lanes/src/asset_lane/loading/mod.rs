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

//! Decoders for asset bytes.

mod audio_loader_lane;

pub use audio_loader_lane::*;

use thiserror::Error;

/// A trait for types that can decode a specific kind of asset from bytes.
///
/// Implementors do the CPU-bound parsing; fetching the bytes is someone
/// else's job.
pub trait AssetLoaderLane<A> {
    /// Parses `bytes` into an `A`.
    fn load(&self, bytes: &[u8]) -> Result<A, DecodeError>;
}

/// Why a buffer of bytes could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The WAV reader rejected the data.
    #[error("invalid WAV data: {0}")]
    Wav(#[from] hound::Error),
    /// Symphonia could not read or decode the data.
    #[error("decoder error: {0}")]
    Symphonia(#[from] symphonia::core::errors::Error),
    /// The container holds no audio track.
    #[error("no audio track found")]
    MissingTrack,
    /// The track lacks a parameter needed to interpret its samples.
    #[error("track is missing its {0}")]
    MissingParameter(&'static str),
}
