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

//! Loop 0: the house as it was.

use super::unlock_end_door;
use crate::context::FrameContext;
use crate::load_tracker::LoadTracker;
use crate::loops::behavior::LoopBehavior;
use limen_agents::audio_agent::MusicOptions;
use limen_core::Timers;

const MUSIC: &str = "ambient_1";
const MUSIC_OPTIONS: MusicOptions = MusicOptions {
    volume: 0.15,
    looping: true,
    fade: Some(1.0),
};
const MUSIC_FADE_OUT: f32 = 1.0;
const UNLOCK_AFTER: f32 = 8.0;

#[derive(Debug)]
enum IntroEvent {
    Unlock,
}

/// Ambient music and a quiet house.
pub struct IntroLoop {
    timers: Timers<IntroEvent>,
    loads: LoadTracker<()>,
}

impl IntroLoop {
    /// A fresh instance.
    pub fn new() -> Self {
        Self {
            timers: Timers::new(),
            loads: LoadTracker::new(),
        }
    }
}

impl Default for IntroLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBehavior for IntroLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        let config = ctx.config;
        let scene = &config.scene;
        ctx.show(&scene.window_cutter, false);
        ctx.show(&scene.wife, false);

        let url = ctx.sound_url(MUSIC);
        self.loads.request(&*ctx.audio, ctx.runtime, MUSIC, &url, ());
        self.timers.schedule(UNLOCK_AFTER, IntroEvent::Unlock);
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        for loaded in self.loads.poll() {
            if loaded.result.is_ok() {
                ctx.audio.play_music(MUSIC, MUSIC_OPTIONS);
            }
        }
        for IntroEvent::Unlock in self.timers.advance(ctx.dt) {
            unlock_end_door(ctx, "Intro");
        }
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.loads.cancel();
        self.timers.clear();
        ctx.audio.stop_music(Some(MUSIC_FADE_OUT));
    }
}
