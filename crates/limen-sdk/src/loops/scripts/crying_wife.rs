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

//! Loop 2: someone is crying in the living room.

use super::{fnv1a, unlock_end_door};
use crate::context::FrameContext;
use crate::load_tracker::LoadTracker;
use crate::loops::behavior::LoopBehavior;
use limen_agents::audio_agent::{PlayOptions, Segment, SoundGroup};
use limen_core::math::{smoothstep, Vec3, DEG_TO_RAD};
use limen_core::Timers;

const CRYING: &str = "wife_crying";
const CRYING_LOOP_ID: &str = "crying_loop2";
const CRYING_SEGMENT: Segment = Segment::new(0.0, 8.0);
const CRYING_VOLUME: f32 = 0.05;
const SUSPENSE: &str = "suspense";
const SUSPENSE_SEGMENT: Segment = Segment::starting_at(0.2);
const SUSPENSE_VOLUME: f32 = 0.7;

const TRIGGER_DISTANCE: f32 = 6.27;
const VANISH_SECS: f32 = 0.4;
const VANISH_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);
const MAX_FRAME_TILT_DEG: f32 = 12.0;
const DIMMED_INTENSITY: f32 = 0.03;
const DIM_AFTER: f32 = 0.1;
const UNLOCK_AFTER: f32 = 3.5;

#[derive(Debug)]
enum WifeEvent {
    DimLight,
    Unlock,
}

#[derive(Debug, Clone, Copy)]
enum LoadTag {
    Crying,
    Suspense,
}

/// Tilt of a picture frame for the given loop, in radians.
fn frame_tilt(name: &str, loop_index: i32) -> f32 {
    let h = fnv1a(&format!("loop2-frame-y-{name}-{loop_index}"));
    let r = (h % 1000) as f32 / 1000.0;
    (r - 0.5) * 2.0 * MAX_FRAME_TILT_DEG * DEG_TO_RAD
}

#[derive(Debug, Clone, Copy)]
struct Vanish {
    from: Vec3,
    elapsed: f32,
}

/// The wife cries by the window and vanishes when the player gets close.
pub struct CryingWifeLoop {
    timers: Timers<WifeEvent>,
    loads: LoadTracker<LoadTag>,
    frames: Vec<(String, f32)>,
    light: Option<(String, f32)>,
    home: Option<Vec3>,
    triggered: bool,
    vanish: Option<Vanish>,
}

impl CryingWifeLoop {
    /// A fresh instance.
    pub fn new() -> Self {
        Self {
            timers: Timers::new(),
            loads: LoadTracker::new(),
            frames: Vec::new(),
            light: None,
            home: None,
            triggered: false,
            vanish: None,
        }
    }

    /// Whether the player came close enough to scare her away.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    fn tilt_frames(&mut self, ctx: &mut FrameContext<'_>) {
        let config = ctx.config;
        let loop_index = ctx.run.loop_index();
        for name in &config.scene.tilted_frames {
            let Some(original) = ctx.scene.local_yaw(name) else {
                log::warn!("CryingWife: frame '{name}' not found");
                continue;
            };
            ctx.scene
                .set_local_yaw(name, original + frame_tilt(name, loop_index));
            self.frames.push((name.clone(), original));
        }
    }

    fn dim_light(&mut self, ctx: &mut FrameContext<'_>) {
        let config = ctx.config;
        let Some(name) = config.scene.wife_dimmed_light.as_deref() else {
            return;
        };
        match ctx.scene.light_intensity(name) {
            Some(original) => {
                ctx.scene.set_light_intensity(name, DIMMED_INTENSITY);
                self.light = Some((name.to_owned(), original));
            }
            None => log::warn!("CryingWife: light '{name}' not found"),
        }
    }

    fn check_trigger(&mut self, ctx: &mut FrameContext<'_>) {
        if self.triggered {
            return;
        }
        let wife = ctx.config.scene.wife.as_str();
        if ctx.scene.is_visible(wife) != Some(true) {
            return;
        }
        let Some(position) = ctx.scene.world_position(wife) else {
            return;
        };
        if ctx.pose.position.distance(position) >= TRIGGER_DISTANCE {
            return;
        }

        log::info!("CryingWife: player came close, she vanishes");
        self.triggered = true;
        ctx.audio.stop_loop(CRYING_LOOP_ID);
        ctx.audio.play_segment(
            SUSPENSE,
            SUSPENSE_SEGMENT,
            PlayOptions::on(SoundGroup::Sfx).volume(SUSPENSE_VOLUME),
        );
        self.vanish = Some(Vanish {
            from: position,
            elapsed: 0.0,
        });
    }

    fn tick_vanish(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(vanish) = &mut self.vanish else {
            return;
        };
        vanish.elapsed += ctx.dt;
        let t = smoothstep((vanish.elapsed / VANISH_SECS).min(1.0));
        let wife = ctx.config.scene.wife.as_str();
        ctx.scene
            .set_world_position(wife, vanish.from + VANISH_OFFSET * t);
        if vanish.elapsed >= VANISH_SECS {
            ctx.scene.set_visible(wife, false);
            self.vanish = None;
        }
    }
}

impl Default for CryingWifeLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBehavior for CryingWifeLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        let config = ctx.config;
        self.home = ctx.scene.world_position(&config.scene.wife);
        ctx.show(&config.scene.wife, true);

        for (name, tag) in [(CRYING, LoadTag::Crying), (SUSPENSE, LoadTag::Suspense)] {
            let url = ctx.sound_url(name);
            self.loads.request(&*ctx.audio, ctx.runtime, name, &url, tag);
        }

        self.tilt_frames(ctx);
        self.timers.schedule(DIM_AFTER, WifeEvent::DimLight);
        self.timers.schedule(UNLOCK_AFTER, WifeEvent::Unlock);
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        for loaded in self.loads.poll() {
            if let (LoadTag::Crying, Ok(_)) = (loaded.tag, &loaded.result) {
                if !self.triggered {
                    ctx.audio.play_looping_segment(
                        CRYING,
                        CRYING_SEGMENT,
                        Some(CRYING_LOOP_ID),
                        PlayOptions::on(SoundGroup::Sfx).volume(CRYING_VOLUME),
                    );
                }
            }
        }

        for event in self.timers.advance(ctx.dt) {
            match event {
                WifeEvent::DimLight => self.dim_light(ctx),
                WifeEvent::Unlock => unlock_end_door(ctx, "CryingWife"),
            }
        }

        self.check_trigger(ctx);
        self.tick_vanish(ctx);
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.loads.cancel();
        self.timers.clear();
        ctx.audio.stop_loop(CRYING_LOOP_ID);

        for (name, yaw) in self.frames.drain(..) {
            ctx.scene.set_local_yaw(&name, yaw);
        }
        if let Some((name, intensity)) = self.light.take() {
            ctx.scene.set_light_intensity(&name, intensity);
        }

        let config = ctx.config;
        if let Some(home) = self.home.take() {
            ctx.scene.set_world_position(&config.scene.wife, home);
        }
        ctx.scene.set_visible(&config.scene.wife, false);
        self.vanish = None;
        self.triggered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_tilt_is_bounded_and_varies_per_loop() {
        let max = MAX_FRAME_TILT_DEG * DEG_TO_RAD;
        let tilts: Vec<f32> = (0..8).map(|i| frame_tilt("hanging_picture_frame", i)).collect();
        assert!(tilts.iter().all(|t| t.abs() <= max));
        assert!(tilts.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn frame_tilt_is_stable() {
        assert_eq!(frame_tilt("a", 2), frame_tilt("a", 2));
    }
}
