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

use crate::assets::SoundHandle;
use super::SoundGroup;
use limen_core::math::Vec3;

/// Identifies one playing voice in the mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(pub u64);

/// A gain that moves linearly towards a target at a fixed rate.
///
/// Fades are advanced by simulation time, not by the audio callback, so a
/// 200 ms fade always takes 200 ms of ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainRamp {
    current: f32,
    target: f32,
    rate: f32,
}

impl GainRamp {
    /// A constant gain.
    pub const fn fixed(gain: f32) -> Self {
        Self {
            current: gain,
            target: gain,
            rate: 0.0,
        }
    }

    /// Starts silent and rises to `target` over `secs`.
    pub fn fade_in(target: f32, secs: f32) -> Self {
        let mut ramp = Self::fixed(0.0);
        ramp.ramp_to(target, secs);
        ramp
    }

    /// Retargets the ramp. A non-positive duration jumps immediately.
    pub fn ramp_to(&mut self, target: f32, secs: f32) {
        self.target = target;
        if secs > 0.0 {
            self.rate = (target - self.current).abs() / secs;
        } else {
            self.current = target;
            self.rate = 0.0;
        }
    }

    /// Moves `dt` seconds along the ramp.
    pub fn advance(&mut self, dt: f32) {
        if self.current == self.target {
            return;
        }
        let remaining = self.target - self.current;
        let step = self.rate * dt.max(0.0);
        if self.rate == 0.0 || remaining.abs() <= step {
            self.current = self.target;
        } else {
            self.current += step.copysign(remaining);
        }
    }

    /// The gain right now.
    #[inline]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// The gain the ramp is heading for.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the ramp has reached its target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

/// A half-open range of frames `[start, end)` inside a sound buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRegion {
    /// First frame played.
    pub start: usize,
    /// One past the last frame played.
    pub end: usize,
}

impl FrameRegion {
    /// Number of frames in the region.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the region holds no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distance model of a positional voice.
///
/// Uses the inverse-distance law: full gain inside `ref_distance`, then
/// `ref / (ref + rolloff * (d - ref))`, frozen beyond `max_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spatial {
    /// World position of the emitter.
    pub position: Vec3,
    /// Distance under which no attenuation applies.
    pub ref_distance: f32,
    /// How quickly gain falls off past the reference distance.
    pub rolloff: f32,
    /// Distance past which gain stops falling.
    pub max_distance: f32,
}

impl Spatial {
    /// Gain factor at `distance` from the listener.
    pub fn attenuation(&self, distance: f32) -> f32 {
        let reference = self.ref_distance.max(f32::EPSILON);
        let clamped = distance.clamp(reference, self.max_distance.max(reference));
        reference / (reference + self.rolloff.max(0.0) * (clamped - reference))
    }
}

/// One sound being rendered by the mixer.
#[derive(Debug, Clone)]
pub struct Voice {
    /// Mixer-wide identifier.
    pub id: VoiceId,
    /// Cache name of the sound, for diagnostics.
    pub name: String,
    /// The decoded buffer.
    pub sound: SoundHandle,
    /// Bus this voice is routed through.
    pub group: SoundGroup,
    /// Frames of `sound` that are played.
    pub region: FrameRegion,
    /// Whether playback wraps back to `region.start`.
    pub looping: bool,
    /// Playback rate (1.0 = native pitch).
    pub rate: f32,
    /// Per-voice gain, including fades.
    pub gain: GainRamp,
    /// Positional parameters, if spatialized.
    pub spatial: Option<Spatial>,
    /// Read position in frames relative to `region.start`.
    pub cursor: f32,
    /// Set by the mixer once a non-looping voice runs off its region.
    pub finished: bool,
}

impl Voice {
    /// A voice playing all of `sound` once at unit gain.
    pub fn new(
        id: VoiceId,
        name: impl Into<String>,
        sound: SoundHandle,
        group: SoundGroup,
    ) -> Self {
        let region = FrameRegion {
            start: 0,
            end: sound.frames(),
        };
        Self {
            id,
            name: name.into(),
            sound,
            group,
            region,
            looping: false,
            rate: 1.0,
            gain: GainRamp::fixed(1.0),
            spatial: None,
            cursor: 0.0,
            finished: false,
        }
    }

    /// Restricts playback to `[start_secs, start_secs + duration_secs)`, or to
    /// the end of the buffer when `duration_secs` is `None`.
    pub fn with_segment(mut self, start_secs: f32, duration_secs: Option<f32>) -> Self {
        let start = self.sound.frame_at(start_secs);
        let end = match duration_secs {
            Some(d) => self.sound.frame_at(start_secs + d.max(0.0)),
            None => self.sound.frames(),
        };
        self.region = FrameRegion { start, end };
        self
    }

    /// Sets looping.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Sets the playback rate. Non-positive rates fall back to 1.0.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = if rate > 0.0 { rate } else { 1.0 };
        self
    }

    /// Sets the gain envelope.
    pub fn with_gain(mut self, gain: GainRamp) -> Self {
        self.gain = gain;
        self
    }

    /// Makes the voice positional.
    pub fn with_spatial(mut self, spatial: Spatial) -> Self {
        self.spatial = Some(spatial);
        self
    }

    /// Wall time one pass over the region takes at this voice's rate.
    pub fn pass_secs(&self) -> f32 {
        if self.sound.sample_rate == 0 {
            return 0.0;
        }
        self.region.len() as f32 / self.sound.sample_rate as f32 / self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SoundData;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::sync::Arc;

    fn two_second_sound() -> SoundHandle {
        Arc::new(SoundData {
            samples: vec![0.0; 200],
            channels: 1,
            sample_rate: 100,
        })
    }

    #[test]
    fn ramp_lands_exactly_on_target() {
        let mut ramp = GainRamp::fade_in(0.8, 0.2);
        ramp.advance(0.1);
        assert_abs_diff_eq!(ramp.value(), 0.4, epsilon = 1e-5);
        ramp.advance(0.5);
        assert_eq!(ramp.value(), 0.8);
        assert!(ramp.is_settled());
    }

    #[test]
    fn zero_length_ramp_jumps() {
        let mut ramp = GainRamp::fixed(1.0);
        ramp.ramp_to(0.0, 0.0);
        assert_eq!(ramp.value(), 0.0);
    }

    #[test]
    fn segment_addresses_a_time_slice() {
        let voice = Voice::new(VoiceId(1), "door", two_second_sound(), SoundGroup::Sfx)
            .with_segment(0.5, Some(1.0));
        assert_eq!(voice.region, FrameRegion { start: 50, end: 150 });

        let tail = Voice::new(VoiceId(2), "door", two_second_sound(), SoundGroup::Sfx)
            .with_segment(1.52, None);
        assert_eq!(tail.region, FrameRegion { start: 152, end: 200 });
    }

    #[test]
    fn pass_time_scales_with_rate() {
        let voice = Voice::new(VoiceId(1), "x", two_second_sound(), SoundGroup::Sfx).with_rate(2.0);
        assert_relative_eq!(voice.pass_secs(), 1.0);
    }

    #[test]
    fn inverse_distance_attenuation() {
        let spatial = Spatial {
            position: Vec3::ZERO,
            ref_distance: 2.0,
            rolloff: 1.0,
            max_distance: 10.0,
        };
        assert_eq!(spatial.attenuation(0.5), 1.0);
        assert_relative_eq!(spatial.attenuation(4.0), 0.5);
        assert_relative_eq!(spatial.attenuation(50.0), spatial.attenuation(10.0));
    }
}
