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

//! An ordinary loop, except when it is not.

use crate::config::GameConfig;
use crate::context::FrameContext;
use crate::encounter::{Encounter, EncounterKind};
use crate::loops::behavior::LoopBehavior;
use rand::Rng;

/// Nothing happens, unless a stalker spawned behind the player.
pub struct NormalLoop {
    stalker: Option<Encounter>,
}

impl NormalLoop {
    /// Rolls `rng` once to decide whether a stalker follows the player.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let roll: f64 = rng.gen();
        let stalker = (roll < config.stalker.spawn_chance)
            .then(|| Encounter::new(EncounterKind::Stalker, config));
        Self { stalker }
    }

    /// The stalker of this loop, if one spawned.
    pub fn stalker(&self) -> Option<&Encounter> {
        self.stalker.as_ref()
    }
}

impl LoopBehavior for NormalLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        if let Some(stalker) = &mut self.stalker {
            stalker.spawn(ctx);
        }
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        if let Some(stalker) = &mut self.stalker {
            stalker.tick(ctx);
        }
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        if let Some(stalker) = &mut self.stalker {
            stalker.despawn(ctx);
        }
    }
}
