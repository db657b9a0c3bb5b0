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

//! The wall clock in the hallway.

use crate::context::FrameContext;
use limen_agents::audio_agent::{PlayOptions, Segment, SoundGroup, SpatialOptions};

/// Alternates the tick and tack halves of the clock sprite once per interval.
///
/// Silent while the scene has no clock.
#[derive(Debug, Default)]
pub struct ClockAmbience {
    elapsed: f32,
    beats: u64,
    missing_logged: bool,
}

impl ClockAmbience {
    /// A clock that has not ticked yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of beats played so far.
    pub fn beats(&self) -> u64 {
        self.beats
    }

    /// Plays every beat that fell due during `ctx.dt`.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        let config = ctx.config;
        let clock = &config.clock;
        let Some(position) = ctx.scene.world_position(&config.scene.clock) else {
            if !self.missing_logged {
                log::debug!("No '{}' in the scene, clock stays silent", config.scene.clock);
                self.missing_logged = true;
            }
            return;
        };
        if clock.interval_secs <= 0.0 {
            return;
        }

        self.elapsed += ctx.dt;
        while self.elapsed >= clock.interval_secs {
            self.elapsed -= clock.interval_secs;
            let segment = if self.beats % 2 == 0 {
                Segment::new(0.0, clock.tack_start)
            } else {
                Segment::starting_at(clock.tack_start)
            };
            let opts = PlayOptions::on(SoundGroup::Sfx).volume(clock.volume).at(
                SpatialOptions::at(position)
                    .ref_distance(clock.ref_distance)
                    .rolloff(clock.rolloff)
                    .max_distance(clock.max_distance),
            );
            ctx.audio.play_segment(&clock.sound, segment, opts);
            self.beats += 1;
        }
    }
}
