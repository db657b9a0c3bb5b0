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

//! Loop 1: the lights can't make up their mind.
//!
//! Every light gets its own flicker parameters, derived from a hash of its
//! name so the same light flickers the same way on every run.

use super::unlock_end_door;
use crate::context::FrameContext;
use crate::loops::behavior::LoopBehavior;
use limen_agents::audio_agent::{PlayOptions, Segment, SoundGroup};
use limen_core::math::TAU;
use limen_core::Timers;

const SOUND: &str = "lights_on_off";
const OFF_CLICK: Segment = Segment::starting_at(1.0);
const ON_CLICK: Segment = Segment::new(0.0, 1.0);
const OFF_VOLUME: f32 = 0.6;
const ON_VOLUME: f32 = 0.5;
const BLINK_LEVEL: f32 = 0.05;
const DIM_FACTOR: f32 = 0.3;
const UNLOCK_AFTER: f32 = 10.0;

/// 32-bit FNV-1a over the UTF-8 bytes of `s`.
pub fn fnv1a(s: &str) -> u32 {
    s.bytes().fold(2_166_136_261u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(16_777_619)
    })
}

/// Three decimal digits of `h >> shift`, as a fraction in `[0, 1)`.
fn unit(h: u32, shift: u32) -> f32 {
    ((h >> shift) % 1000) as f32 / 1000.0
}

#[derive(Debug, Clone)]
struct FlickerLight {
    name: String,
    original: f32,
    base: f32,
    amplitude: f32,
    speed: f32,
    phase: f32,
    next_blink: f32,
    blink_until: f32,
}

impl FlickerLight {
    fn new(name: &str, original: f32, base: f32) -> Self {
        let h = fnv1a(name);
        let (r1, r2, r3) = (unit(h, 0), unit(h, 10), unit(h, 20));
        Self {
            name: name.to_owned(),
            original,
            base,
            amplitude: 0.15 + 0.2 * r1,
            speed: 4.0 + 8.0 * r2,
            phase: TAU * r3,
            next_blink: 1.0 + 4.0 * r2,
            blink_until: -1.0,
        }
    }

    fn is_blinking(&self, t: f32) -> bool {
        t < self.blink_until
    }

    /// Schedules the blink due at `t`. Returns whether one started.
    fn maybe_blink(&mut self, t: f32) -> bool {
        if t < self.next_blink {
            return false;
        }
        let h = fnv1a(&format!("{}:blink:{}", self.name, t.floor() as i64));
        self.blink_until = t + 0.04 + 0.12 * unit(h, 0);
        self.next_blink = t + 2.0 + 5.0 * unit(h, 12);
        true
    }

    fn multiplier(&self, t: f32) -> f32 {
        if self.is_blinking(t) {
            return BLINK_LEVEL;
        }
        let n1 = ((t * self.speed + self.phase) * 2.0).sin();
        let n2 = ((t * self.speed * 0.37 + self.phase * 1.7) * 3.0).sin();
        let noise = (n1 + 0.5 * n2) * 0.5;
        1.0 - self.amplitude * 0.5 + self.amplitude * (noise * 0.5 + 0.5)
    }
}

/// Flickers every light in the scene and clicks when one blinks out.
pub struct FlickeringLightsLoop {
    lights: Vec<FlickerLight>,
    restore: Vec<(String, f32)>,
    elapsed: f32,
    timers: Timers<()>,
}

impl FlickeringLightsLoop {
    /// A fresh instance.
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            restore: Vec::new(),
            elapsed: 0.0,
            timers: Timers::new(),
        }
    }

    /// Number of lights being flickered.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

impl Default for FlickeringLightsLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBehavior for FlickeringLightsLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        let config = ctx.config;
        let off = config.scene.flicker_off_light.as_deref();
        let dim = config.scene.flicker_dim_light.as_deref();

        for name in ctx.scene.light_names() {
            let Some(original) = ctx.scene.light_intensity(&name) else {
                continue;
            };
            self.restore.push((name.clone(), original));

            let mut base = original;
            if off == Some(name.as_str()) {
                base = 0.0;
            } else if dim == Some(name.as_str()) {
                base *= DIM_FACTOR;
            }
            let base = base.max(0.0);
            ctx.scene.set_light_intensity(&name, base);
            if base > 0.0 {
                self.lights.push(FlickerLight::new(&name, original, base));
            }
        }
        log::debug!("FlickeringLights: {} lights flickering", self.lights.len());
        self.timers.schedule(UNLOCK_AFTER, ());
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        self.elapsed += ctx.dt;
        let t = self.elapsed;

        for light in &mut self.lights {
            let was_blinking = light.is_blinking(t - ctx.dt);
            if light.maybe_blink(t) {
                ctx.audio.play_segment(
                    SOUND,
                    OFF_CLICK,
                    PlayOptions::on(SoundGroup::Sfx).volume(OFF_VOLUME),
                );
            } else if was_blinking && !light.is_blinking(t) {
                ctx.audio.play_segment(
                    SOUND,
                    ON_CLICK,
                    PlayOptions::on(SoundGroup::Sfx).volume(ON_VOLUME),
                );
            }
            ctx.scene
                .set_light_intensity(&light.name, light.base * light.multiplier(t));
        }

        for () in self.timers.advance(ctx.dt) {
            unlock_end_door(ctx, "FlickeringLights");
        }
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.timers.clear();
        for (name, intensity) in self.restore.drain(..) {
            ctx.scene.set_light_intensity(&name, intensity);
        }
        self.lights.clear();
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_matches_reference_values() {
        assert_eq!(fnv1a(""), 0x811c_9dc5);
        assert_eq!(fnv1a("a"), 0xe40c_292c);
        assert_eq!(fnv1a("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn flicker_stays_within_amplitude() {
        let light = FlickerLight::new("Lamp", 1.0, 1.0);
        let mut t = 0.0;
        while t < 5.0 {
            let m = light.multiplier(t);
            assert!(m >= 1.0 - light.amplitude * 0.5 - 1e-4);
            assert!(m <= 1.0 + light.amplitude * 0.5 + 1e-4);
            t += 0.05;
        }
    }

    #[test]
    fn blink_darkens_briefly_then_reschedules() {
        let mut light = FlickerLight::new("Lamp", 1.0, 1.0);
        let first = light.next_blink;
        assert!(!light.maybe_blink(first - 0.01));
        assert!(light.maybe_blink(first));
        assert_eq!(light.multiplier(first), BLINK_LEVEL);
        assert!(light.blink_until <= first + 0.16 + 1e-4);
        assert!(light.next_blink >= first + 2.0);
        assert!(!light.is_blinking(first + 0.2));
    }
}
