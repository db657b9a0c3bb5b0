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

//! The man in the chair.
//!
//! He sits until the player looks straight at him from close enough, gets
//! up, breaks into a run and chases the player down. Getting up and the run
//! start are one-shot clips; each phase advances when the clip's length has
//! elapsed on the encounter's own timers, so a clip change needs the phase
//! durations in [`SitterConfig`] updated alongside.

use super::body::EnemyBody;
use super::cadence::FootstepCadence;
use super::jumpscare::{request_encounter_sounds, Jumpscare};
use crate::config::SitterConfig;
use crate::context::FrameContext;
use crate::load_tracker::LoadTracker;
use limen_core::Timers;

/// Phases of the sitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitterState {
    /// Idle in the chair.
    Sitting,
    /// Getting up after being noticed.
    WakingUp,
    /// The first strides of the run.
    ApproachStart,
    /// Running at the player.
    Chasing,
    /// Got the player.
    Jumpscare,
}

impl SitterState {
    /// Animation clip shown in this phase.
    pub fn clip(self) -> &'static str {
        match self {
            SitterState::Sitting => "Sit",
            SitterState::WakingUp => "Get Up Panic Start",
            SitterState::ApproachStart => "Attack Run Start",
            SitterState::Chasing => "Attack Run",
            SitterState::Jumpscare => "Attack",
        }
    }
}

/// One sitter instance.
pub struct Sitter {
    state: SitterState,
    body: EnemyBody,
    config: SitterConfig,
    phases: Timers<SitterState>,
    cadence: FootstepCadence,
    jumpscare: Option<Jumpscare>,
    sounds: LoadTracker<()>,
}

impl Sitter {
    /// A sitter called `name`, seated where the config says.
    pub fn new(name: &str, config: &SitterConfig) -> Self {
        Self {
            state: SitterState::Sitting,
            body: EnemyBody::new(name, config.spawn_position, config.spawn_yaw),
            config: config.clone(),
            phases: Timers::new(),
            cadence: FootstepCadence::new(config.footsteps),
            jumpscare: None,
            sounds: LoadTracker::new(),
        }
    }

    /// Current phase.
    pub fn state(&self) -> SitterState {
        self.state
    }

    /// Where the sitter is.
    pub fn body(&self) -> &EnemyBody {
        &self.body
    }

    /// Puts the sitter in the scene.
    pub fn spawn(&mut self, ctx: &mut FrameContext<'_>) {
        request_encounter_sounds(&mut self.sounds, ctx, &self.config.jumpscare);
        self.body.sync(ctx);
    }

    /// Runs one tick of the state machine.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        self.sounds.poll();
        for next in self.phases.advance(ctx.dt) {
            self.enter(next);
        }

        match self.state {
            SitterState::Sitting => {
                let distance = self.body.position.distance(ctx.pose.position);
                if ctx.pose.gaze_dot(self.body.position) > self.config.wake_gaze_dot
                    && distance < self.config.wake_range
                {
                    log::info!("Sitter '{}' noticed the player", self.body.name());
                    self.enter(SitterState::WakingUp);
                }
            }
            SitterState::WakingUp | SitterState::ApproachStart => {}
            SitterState::Chasing => self.chase(ctx),
            SitterState::Jumpscare => {
                if let Some(jumpscare) = &mut self.jumpscare {
                    jumpscare.tick(ctx, &self.body, &self.config.jumpscare);
                }
            }
        }
        self.body.sync(ctx);
    }

    /// Takes the sitter out of the scene and drops pending work.
    pub fn despawn(&mut self, ctx: &mut FrameContext<'_>) {
        self.phases.clear();
        self.sounds.cancel();
        self.body.remove(ctx);
    }

    fn enter(&mut self, state: SitterState) {
        // A phase timer may land after the chase already ended.
        if self.state == SitterState::Jumpscare {
            return;
        }
        log::debug!("Sitter '{}' -> {:?}", self.body.name(), state);
        self.state = state;
        match state {
            SitterState::WakingUp => {
                self.phases
                    .schedule(self.config.waking_secs, SitterState::ApproachStart);
            }
            SitterState::ApproachStart => {
                self.phases
                    .schedule(self.config.approach_secs, SitterState::Chasing);
            }
            _ => {}
        }
    }

    fn chase(&mut self, ctx: &mut FrameContext<'_>) {
        let to_player = ctx.pose.position - self.body.position;
        let heading = to_player.flatten().normalize();
        self.body.position += heading * (self.config.chase_speed * ctx.dt);
        self.body.turn_towards(heading, self.config.turn_factor);
        self.cadence.step(ctx, self.config.chase_speed);

        if self.body.position.distance(ctx.pose.position) < self.config.close_range {
            if let Some(jumpscare) = Jumpscare::strike(ctx, &self.body, &self.config.jumpscare) {
                self.state = SitterState::Jumpscare;
                self.phases.clear();
                self.jumpscare = Some(jumpscare);
            }
        }
    }
}
