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

use limen_core::math::Vec3;
use limen_data::audio::{BusGains, SoundGroup, Spatial};
use serde::{Deserialize, Serialize};

/// Where and how loudly a single request plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    /// Bus the voice is routed through.
    pub group: SoundGroup,
    /// Voice gain in `[0, 1]`, multiplied by the bus gain.
    pub volume: f32,
    /// Playback rate, 1.0 being native pitch.
    pub rate: f32,
    /// Positional parameters, if the sound comes from somewhere.
    pub spatial: Option<SpatialOptions>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            group: SoundGroup::Sfx,
            volume: 1.0,
            rate: 1.0,
            spatial: None,
        }
    }
}

impl PlayOptions {
    /// Unit volume on `group`.
    pub fn on(group: SoundGroup) -> Self {
        Self {
            group,
            ..Self::default()
        }
    }

    /// Sets the volume.
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the playback rate.
    pub fn rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Attaches the voice to a point in the world.
    pub fn at(mut self, spatial: SpatialOptions) -> Self {
        self.spatial = Some(spatial);
        self
    }

    pub(crate) fn clamped_volume(&self) -> f32 {
        if self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }
}

/// Distance model of a positional voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialOptions {
    /// Emitter position.
    pub position: Vec3,
    /// Distance under which the voice plays at full gain.
    pub ref_distance: f32,
    /// How quickly the gain falls off past `ref_distance`.
    pub rolloff: f32,
    /// Distance past which the gain stops falling.
    pub max_distance: f32,
}

impl SpatialOptions {
    /// An emitter at `position` with the default distance model.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ref_distance: 1.0,
            rolloff: 1.0,
            max_distance: 10_000.0,
        }
    }

    /// Sets the reference distance.
    pub fn ref_distance(mut self, ref_distance: f32) -> Self {
        self.ref_distance = ref_distance;
        self
    }

    /// Sets the rolloff factor.
    pub fn rolloff(mut self, rolloff: f32) -> Self {
        self.rolloff = rolloff;
        self
    }

    /// Sets the maximum distance.
    pub fn max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }
}

impl From<SpatialOptions> for Spatial {
    fn from(opts: SpatialOptions) -> Self {
        Spatial {
            position: opts.position,
            ref_distance: opts.ref_distance,
            rolloff: opts.rolloff,
            max_distance: opts.max_distance,
        }
    }
}

/// A time slice of a buffer, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// Offset of the first sample played.
    pub start: f32,
    /// Length of the slice; `None` plays to the end of the buffer.
    pub duration: Option<f32>,
}

impl Segment {
    /// `[start, start + duration)`.
    pub const fn new(start: f32, duration: f32) -> Self {
        Self {
            start,
            duration: Some(duration),
        }
    }

    /// From `start` to the end of the buffer.
    pub const fn starting_at(start: f32) -> Self {
        Self {
            start,
            duration: None,
        }
    }
}

/// How a music track starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicOptions {
    /// Track gain in `[0, 1]`.
    pub volume: f32,
    /// Whether the track repeats.
    pub looping: bool,
    /// Fade-in time of the new track and fade-out time of the old one.
    pub fade: Option<f32>,
}

impl Default for MusicOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looping: false,
            fade: None,
        }
    }
}

/// Tuning of the audio engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioEngineOptions {
    /// Initial bus gains.
    pub buses: BusGains,
    /// Minimum time between two footsteps, in seconds.
    pub footstep_min_interval: f32,
    /// Names of the footstep variants picked from at random.
    pub footstep_variants: Vec<String>,
    /// Buffer holding both door sounds back to back.
    pub door_sprite: String,
    /// End of the opening sound inside the door sprite.
    pub door_open_end: f32,
    /// Start of the closing sound inside the door sprite.
    pub door_close_start: f32,
    /// Fade-in of looping segments.
    pub loop_fade_in: f32,
    /// Fade-out of stopped loops.
    pub loop_fade_out: f32,
    /// Delay after a loop stop before its voice is freed.
    pub loop_free_after: f32,
    /// Slack added to a one-shot's length before it is disposed.
    pub dispose_margin: f32,
    /// Seed of the footstep randomizer; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for AudioEngineOptions {
    fn default() -> Self {
        Self {
            buses: BusGains::default(),
            footstep_min_interval: 0.11,
            footstep_variants: (1..=3).map(|i| format!("footstep_{i}")).collect(),
            door_sprite: "door_open_close".to_owned(),
            door_open_end: 1.5,
            door_close_start: 1.52,
            loop_fade_in: 0.1,
            loop_fade_out: 0.2,
            loop_free_after: 0.25,
            dispose_margin: 0.1,
            rng_seed: None,
        }
    }
}
