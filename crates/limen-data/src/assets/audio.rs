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

//! Defines the core asset type for audio data.

/// Represents a sound asset, decoded and ready for playback.
///
/// Samples are normalized, interleaved `f32` (`[L, R, L, R, ...]` for
/// stereo), in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundData {
    /// The raw, interleaved audio samples.
    pub samples: Vec<f32>,
    /// The number of channels in the audio data (e.g., 1 for mono, 2 for stereo).
    pub channels: u16,
    /// The number of samples per second (e.g., 44100 Hz).
    pub sample_rate: u32,
}

impl SoundData {
    /// Number of frames (one sample per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Playback length at the native rate.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Frame index at `secs`, clamped to the buffer length.
    pub fn frame_at(&self, secs: f32) -> usize {
        let frame = (secs.max(0.0) * self.sample_rate as f32).round() as usize;
        frame.min(self.frames())
    }

    /// Sample of `channel` at `frame`. Mono buffers feed every channel.
    #[inline]
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        let channels = self.channels as usize;
        let ch = if channel < channels { channel } else { 0 };
        self.samples.get(frame * channels + ch).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stereo_second() -> SoundData {
        SoundData {
            samples: vec![0.0; 2 * 8_000],
            channels: 2,
            sample_rate: 8_000,
        }
    }

    #[test]
    fn duration_counts_frames_not_samples() {
        let sound = stereo_second();
        assert_eq!(sound.frames(), 8_000);
        assert_relative_eq!(sound.duration_secs(), 1.0);
    }

    #[test]
    fn frame_at_clamps_to_end() {
        let sound = stereo_second();
        assert_eq!(sound.frame_at(0.5), 4_000);
        assert_eq!(sound.frame_at(3.0), 8_000);
        assert_eq!(sound.frame_at(-1.0), 0);
    }

    #[test]
    fn mono_feeds_every_channel() {
        let sound = SoundData {
            samples: vec![0.25, 0.5],
            channels: 1,
            sample_rate: 2,
        };
        assert_eq!(sound.sample(1, 0), 0.5);
        assert_eq!(sound.sample(1, 1), 0.5);
    }
}
