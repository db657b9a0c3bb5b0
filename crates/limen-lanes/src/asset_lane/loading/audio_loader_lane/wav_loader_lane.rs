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

//! Implements an asset loader for `.wav` audio files.

use super::super::{AssetLoaderLane, DecodeError};
use limen_data::assets::SoundData;
use std::io::Cursor;

/// Decodes PCM and float WAV files with `hound`.
#[derive(Debug, Default)]
pub struct WavLoaderLane;

impl WavLoaderLane {
    /// Creates a new instance of `WavLoaderLane`.
    pub fn new() -> Self {
        Self
    }
}

impl AssetLoaderLane<SoundData> for WavLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<SoundData, DecodeError> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let full_scale = (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / full_scale))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(SoundData {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn encode_pcm16(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("writer");
            for &s in samples {
                writer.write_sample(s).expect("sample");
            }
            writer.finalize().expect("finalize");
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_pcm_to_normalized_floats() {
        let bytes = encode_pcm16(&[0, 16_384, -32_768, 16_384], 2, 22_050);
        let sound = WavLoaderLane::new().load(&bytes).expect("valid wav");

        assert_eq!(sound.channels, 2);
        assert_eq!(sound.sample_rate, 22_050);
        assert_eq!(sound.frames(), 2);
        assert_abs_diff_eq!(sound.samples[1], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(sound.samples[2], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_garbage() {
        assert!(WavLoaderLane::new().load(&[0, 1, 2, 3, 4]).is_err());
    }
}
