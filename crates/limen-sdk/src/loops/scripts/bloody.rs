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

//! Blood on the walls.

use super::{show_all, unlock_end_door};
use crate::context::FrameContext;
use crate::loops::behavior::LoopBehavior;
use limen_core::Timers;

const UNLOCK_AFTER: f32 = 11.0;

/// Shows the blood splatters and holds the player for a while.
pub struct BloodyLoop {
    timers: Timers<()>,
}

impl BloodyLoop {
    /// A fresh instance.
    pub fn new() -> Self {
        Self {
            timers: Timers::new(),
        }
    }
}

impl Default for BloodyLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBehavior for BloodyLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        let config = ctx.config;
        show_all(ctx, &config.scene.blood_splatters, true);
        self.timers.schedule(UNLOCK_AFTER, ());
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        for () in self.timers.advance(ctx.dt) {
            unlock_end_door(ctx, "Bloody");
        }
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.timers.clear();
        let config = ctx.config;
        show_all(ctx, &config.scene.blood_splatters, false);
    }
}
