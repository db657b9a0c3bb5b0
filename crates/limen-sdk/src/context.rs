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

//! What every game system sees during a tick.

use crate::command::GameCommand;
use crate::config::GameConfig;
use crate::scene::SceneQuery;
use limen_agents::AudioEngine;
use limen_core::math::Vec3;
use limen_core::{CommandQueue, Timers};
use limen_data::state::{InputSnapshot, MountKey, PlayerPose, RunState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::runtime::Handle;

/// Game-wide delayed events, fired by the game scheduler.
///
/// Behaviours keep their own timers for everything that must die with them;
/// only events that outlive a mount go here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Bring a dead player back, remounting the current loop.
    Respawn,
}

/// Borrowed view of the game handed to loop behaviours, encounters and the
/// portal system.
pub struct FrameContext<'a> {
    /// Seconds since the previous tick; zero for mount and unmount hooks.
    pub dt: f32,
    /// Camera pose sampled at the start of the tick.
    pub pose: PlayerPose,
    /// Inputs gathered since the previous tick.
    pub input: &'a InputSnapshot,
    /// Loop index, death flag and pointer lock.
    pub run: &'a mut RunState,
    /// Audio output.
    pub audio: &'a mut AudioEngine,
    /// The level.
    pub scene: &'a mut dyn SceneQuery,
    /// Outgoing commands to the presentation layer.
    pub commands: &'a CommandQueue<GameCommand>,
    /// Tuning.
    pub config: &'a GameConfig,
    /// Game-wide scheduler.
    pub scheduler: &'a mut Timers<GameEvent>,
    /// Runtime async loads are spawned on.
    pub runtime: &'a Handle,
}

impl FrameContext<'_> {
    /// Publishes a command.
    pub fn publish(&self, command: GameCommand) {
        log::trace!("Publishing {}", command.name());
        self.commands.publish(command);
    }

    /// Where the sound called `name` is fetched from.
    pub fn sound_url(&self, name: &str) -> String {
        self.config.audio.url_for(name)
    }

    /// World position of a scene object, warning when it is missing.
    pub fn require_position(&self, name: &str) -> Option<Vec3> {
        let position = self.scene.world_position(name);
        if position.is_none() {
            log::warn!("Scene object '{name}' not found");
        }
        position
    }

    /// Shows or hides a scene object, warning when it is missing.
    pub fn show(&mut self, name: &str, visible: bool) {
        if !self.scene.set_visible(name, visible) {
            log::warn!("Scene object '{name}' not found, cannot set visibility");
        }
    }
}

/// A random generator for one mount of a behaviour.
///
/// With a configured seed the stream is reproducible and differs per loop
/// and per life; without one it comes from entropy.
pub fn mount_rng(seed: Option<u64>, key: MountKey, salt: u64) -> StdRng {
    match seed {
        Some(seed) => {
            let mixed = seed
                ^ (key.loop_index as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                ^ key.respawn_generation.wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
                ^ salt.rotate_left(17);
            StdRng::seed_from_u64(mixed)
        }
        None => StdRng::from_entropy(),
    }
}
