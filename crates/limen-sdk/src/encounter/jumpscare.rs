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

//! The terminal beat of an encounter: the player dies, the camera is pinned
//! to the enemy's face and a respawn is scheduled.

use super::body::EnemyBody;
use crate::command::GameCommand;
use crate::config::JumpscareConfig;
use crate::context::{FrameContext, GameEvent};
use crate::load_tracker::LoadTracker;
use limen_agents::audio_agent::{PlayOptions, SoundGroup};

/// The camera pin of a jumpscare that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Jumpscare {
    remaining: f32,
}

impl Jumpscare {
    /// Kills the player on behalf of `body`.
    ///
    /// Returns `None` when the player is already dead: nothing is played and
    /// no second respawn is scheduled.
    pub fn strike(
        ctx: &mut FrameContext<'_>,
        body: &EnemyBody,
        config: &JumpscareConfig,
    ) -> Option<Self> {
        if !ctx.run.die() {
            return None;
        }
        log::info!(
            "Jumpscare by '{}', respawning in {}s",
            body.name(),
            config.respawn_delay_secs
        );
        let stinger = ctx.audio.play_one_shot(
            &config.stinger,
            PlayOptions::on(SoundGroup::Sfx).volume(config.volume),
        );
        if stinger.is_none() {
            log::warn!("Jumpscare stinger '{}' did not play", config.stinger);
        }
        ctx.scheduler.schedule(config.respawn_delay_secs, GameEvent::Respawn);
        Some(Self {
            remaining: config.camera_lock_secs,
        })
    }

    /// Pins the camera in front of the enemy's head while the lock lasts.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>, body: &EnemyBody, config: &JumpscareConfig) {
        if self.remaining <= 0.0 {
            return;
        }
        self.remaining -= ctx.dt;
        let head = body.to_world(config.head_offset);
        let position = head + body.rotation * config.face_offset;
        ctx.publish(GameCommand::CameraLock {
            position,
            look_at: head,
        });
    }

    /// Whether the camera is still pinned.
    pub fn is_locking(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Makes sure the stinger and the footstep variants are loaded.
pub(crate) fn request_encounter_sounds(
    tracker: &mut LoadTracker<()>,
    ctx: &FrameContext<'_>,
    config: &JumpscareConfig,
) {
    let mut names = vec![config.stinger.clone()];
    names.extend(ctx.config.audio.engine.footstep_variants.iter().cloned());
    for name in names {
        let url = ctx.sound_url(&name);
        tracker.request(&*ctx.audio, ctx.runtime, &name, &url, ());
    }
}
