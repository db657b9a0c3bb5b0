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

//! The man who walks behind the player.
//!
//! He keeps to a point a few steps behind the camera, running to catch up
//! when he falls back. The moment the player turns far enough to see him he
//! strikes. Unlike the sitter there is no distance cap on being seen.

use super::body::EnemyBody;
use super::cadence::FootstepCadence;
use super::jumpscare::{request_encounter_sounds, Jumpscare};
use crate::config::StalkerConfig;
use crate::context::FrameContext;
use crate::load_tracker::LoadTracker;
use limen_core::math::Vec3;

/// Phases of the stalker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalkerState {
    /// Following the player.
    Stalking,
    /// Got the player.
    Jumpscare,
}

impl StalkerState {
    /// Animation clip shown in this phase.
    pub fn clip(self) -> &'static str {
        match self {
            StalkerState::Stalking => "Walk",
            StalkerState::Jumpscare => "Attack",
        }
    }
}

/// One stalker instance.
pub struct Stalker {
    state: StalkerState,
    body: EnemyBody,
    config: StalkerConfig,
    cadence: FootstepCadence,
    jumpscare: Option<Jumpscare>,
    sounds: LoadTracker<()>,
}

impl Stalker {
    /// A stalker called `name` at the configured spawn point.
    pub fn new(name: &str, config: &StalkerConfig) -> Self {
        Self {
            state: StalkerState::Stalking,
            body: EnemyBody::new(name, config.spawn_position, 0.0),
            config: config.clone(),
            cadence: FootstepCadence::new(config.footsteps),
            jumpscare: None,
            sounds: LoadTracker::new(),
        }
    }

    /// Current phase.
    pub fn state(&self) -> StalkerState {
        self.state
    }

    /// Where the stalker is.
    pub fn body(&self) -> &EnemyBody {
        &self.body
    }

    /// Puts the stalker in the scene.
    pub fn spawn(&mut self, ctx: &mut FrameContext<'_>) {
        request_encounter_sounds(&mut self.sounds, ctx, &self.config.jumpscare);
        self.body.sync(ctx);
    }

    /// Runs one tick of the state machine.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        self.sounds.poll();
        match self.state {
            StalkerState::Stalking => self.stalk(ctx),
            StalkerState::Jumpscare => {
                if let Some(jumpscare) = &mut self.jumpscare {
                    jumpscare.tick(ctx, &self.body, &self.config.jumpscare);
                }
            }
        }
        self.body.sync(ctx);
    }

    /// Takes the stalker out of the scene and drops pending work.
    pub fn despawn(&mut self, ctx: &mut FrameContext<'_>) {
        self.sounds.cancel();
        self.body.remove(ctx);
    }

    /// The point the stalker walks towards: behind the camera, at a fixed
    /// height.
    pub fn follow_point(&self, camera: Vec3, look: Vec3) -> Vec3 {
        let behind = look.flatten().normalize();
        (camera - behind * self.config.follow_distance).with_y(self.config.follow_height)
    }

    fn stalk(&mut self, ctx: &mut FrameContext<'_>) {
        let camera = ctx.pose.position;
        let look = ctx.pose.forward.flatten().normalize();
        let target = self.follow_point(camera, look);

        let to_target = target - self.body.position;
        let distance = to_target.length();
        let speed = if distance > self.config.catch_up_distance {
            self.config.fast_speed
        } else {
            self.config.slow_speed
        };
        if distance > self.config.arrive_distance {
            let step = (speed * ctx.dt).min(distance);
            self.body.position += to_target.normalize() * step;
            self.cadence.step(ctx, speed);
        }

        self.body
            .turn_towards(camera - self.body.position, self.config.turn_factor);

        let to_stalker = (self.body.position - camera).normalize();
        if look.dot(to_stalker) > self.config.gaze_dot {
            if let Some(jumpscare) = Jumpscare::strike(ctx, &self.body, &self.config.jumpscare) {
                self.state = StalkerState::Jumpscare;
                self.jumpscare = Some(jumpscare);
            }
        }
    }
}
