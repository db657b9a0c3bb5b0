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

//! Speed-dependent footstep timing.

use crate::config::FootstepCadenceConfig;
use crate::context::FrameContext;

/// Triggers footsteps at an interval that shrinks when the walker runs.
#[derive(Debug, Clone)]
pub struct FootstepCadence {
    config: FootstepCadenceConfig,
    elapsed: f32,
    last_step: Option<f32>,
}

impl FootstepCadence {
    /// A cadence that has not stepped yet.
    pub fn new(config: FootstepCadenceConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            last_step: None,
        }
    }

    /// Seconds between steps at `speed`.
    pub fn interval(&self, speed: f32) -> f32 {
        if speed > self.config.fast_speed {
            self.config.fast_interval
        } else {
            self.config.slow_interval
        }
    }

    /// Advances by `dt` while moving at `speed`. Returns whether a step is
    /// due now.
    pub fn advance(&mut self, dt: f32, speed: f32) -> bool {
        self.elapsed += dt;
        let due = match self.last_step {
            Some(last) => self.elapsed - last > self.interval(speed),
            None => true,
        };
        if due {
            self.last_step = Some(self.elapsed);
        }
        due
    }

    /// Advances and plays a footstep when one is due.
    pub fn step(&mut self, ctx: &mut FrameContext<'_>, speed: f32) {
        if self.advance(ctx.dt, speed) {
            ctx.audio.play_footstep(self.config.volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_steps_more_often() {
        let config = FootstepCadenceConfig::default();
        let mut running = FootstepCadence::new(config);
        let mut walking = FootstepCadence::new(config);
        let (mut run_steps, mut walk_steps) = (0, 0);
        for _ in 0..40 {
            run_steps += running.advance(0.25, 8.0) as u32;
            walk_steps += walking.advance(0.25, 4.0) as u32;
        }
        // Ten seconds in quarter steps: every 0.5s running, every 0.75s walking.
        assert_eq!(run_steps, 20);
        assert_eq!(walk_steps, 14);
    }
}
