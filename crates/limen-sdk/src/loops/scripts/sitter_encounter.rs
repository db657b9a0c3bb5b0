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

use super::unlock_end_door;
use crate::config::GameConfig;
use crate::context::FrameContext;
use crate::encounter::{Encounter, EncounterKind};
use crate::loops::behavior::LoopBehavior;
use limen_core::Timers;

/// Seats a sitter in his chair. The end door unlocks after a while whether
/// or not he woke up.
pub struct SitterEncounterLoop {
    sitter: Encounter,
    timers: Timers<()>,
    unlock_after: f32,
}

impl SitterEncounterLoop {
    /// A fresh instance.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            sitter: Encounter::new(EncounterKind::Sitter, config),
            timers: Timers::new(),
            unlock_after: config.sitter.unlock_after_secs,
        }
    }

    /// The sitter.
    pub fn sitter(&self) -> &Encounter {
        &self.sitter
    }
}

impl LoopBehavior for SitterEncounterLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        self.sitter.spawn(ctx);
        self.timers.schedule(self.unlock_after, ());
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        for () in self.timers.advance(ctx.dt) {
            unlock_end_door(ctx, "SitterEncounter");
        }
        self.sitter.tick(ctx);
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.timers.clear();
        self.sitter.despawn(ctx);
    }
}
