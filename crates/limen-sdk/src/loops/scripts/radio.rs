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

//! The radio puzzle: tune the dial until the numbers station comes through.

use super::unlock_end_door;
use crate::command::GameCommand;
use crate::context::FrameContext;
use crate::load_tracker::LoadTracker;
use crate::loops::behavior::LoopBehavior;
use crate::subtitle::{SubtitleCue, SubtitleOptions, SubtitleOverrides};
use limen_agents::audio_agent::{PlayOptions, Segment, SoundGroup, SpatialOptions, VoiceId};
use limen_lanes::audio_lane::ToneSynthLane;

const HINT: &str = "I should tune the radio to find the signal...";
const HINT_DURATION_MS: u32 = 9000;
const NUMBERS: &str = "2... 0... 4... 8... 6... 3... Don't... turn... around...";

const STATIC: &str = "static_light";
const STATIC_LOOP_ID: &str = "radio_static";
const STATIC_VOLUME: f32 = 0.8;
const STATIC_REF_DISTANCE: f32 = 2.0;
const STATIC_MAX_DISTANCE: f32 = 10.0;

const NOISE: &str = "radio_noise";
const NOISE_LOOP_ID: &str = "radio_noise_loop";
const TONE: &str = "radio_tone";
const TONE_LOOP_ID: &str = "radio_tone_loop";
const TONE_HZ: f32 = 1000.0;
const SYNTH_RATE: u32 = 22_050;
const RAMP_SECS: f32 = 0.1;

const INTERACT_RANGE: f32 = 3.0;
const GAZE_DOT: f32 = 0.9;

/// Lowest dial frequency.
pub const FREQ_MIN: f32 = 88.0;
/// Highest dial frequency.
pub const FREQ_MAX: f32 = 108.0;
/// Where the dial starts.
pub const FREQ_START: f32 = 94.5;
/// The station.
pub const FREQ_TARGET: f32 = 98.3;
const TOLERANCE: f32 = 0.5;
const CLOSENESS_RANGE: f32 = 10.0;
const LOCK_IN_TICKS: u32 = 200;

/// Moves the dial by `delta`, clamped to the band and rounded to 0.01.
pub fn turn_dial(frequency: f32, delta: f32) -> f32 {
    let next = (frequency + delta).clamp(FREQ_MIN, FREQ_MAX);
    (next * 100.0).round() / 100.0
}

/// How close `frequency` is to the station, in `[0, 1]`.
pub fn closeness(frequency: f32) -> f32 {
    (1.0 - (frequency - FREQ_TARGET).abs() / CLOSENESS_RANGE).max(0.0)
}

/// Playback rate of the 1 kHz tone that sounds at the pitch for `frequency`.
fn tone_rate(frequency: f32) -> f32 {
    let hz = 200.0 + (frequency - FREQ_MIN) / (FREQ_MAX - FREQ_MIN) * 1000.0;
    hz / TONE_HZ
}

/// Static hisses from the radio until the player turns it on and tunes it.
pub struct RadioPuzzleLoop {
    loads: LoadTracker<()>,
    frequency: f32,
    started: bool,
    solved: bool,
    locked_in: u32,
    speaking: bool,
    noise: Option<VoiceId>,
    tone: Option<VoiceId>,
}

impl RadioPuzzleLoop {
    /// A fresh instance.
    pub fn new() -> Self {
        Self {
            loads: LoadTracker::new(),
            frequency: FREQ_START,
            started: false,
            solved: false,
            locked_in: 0,
            speaking: false,
            noise: None,
            tone: None,
        }
    }

    /// Current dial frequency.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Whether the player turned the radio on.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the station was found.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    fn play_static(&self, ctx: &mut FrameContext<'_>) {
        let mut opts = PlayOptions::on(SoundGroup::Ambient).volume(STATIC_VOLUME);
        match ctx.require_position(&ctx.config.scene.radio) {
            Some(position) => {
                opts = opts.at(
                    SpatialOptions::at(position)
                        .ref_distance(STATIC_REF_DISTANCE)
                        .max_distance(STATIC_MAX_DISTANCE),
                );
            }
            None => log::warn!("RadioPuzzle: playing static without a position"),
        }
        ctx.audio
            .play_looping_segment(STATIC, Segment::starting_at(0.0), Some(STATIC_LOOP_ID), opts);
    }

    fn wants_to_start(&self, ctx: &FrameContext<'_>) -> bool {
        if !ctx.input.interact {
            return false;
        }
        let Some(radio) = ctx.scene.world_position(&ctx.config.scene.radio) else {
            return false;
        };
        ctx.pose.position.distance(radio) <= INTERACT_RANGE && ctx.pose.gaze_dot(radio) > GAZE_DOT
    }

    fn start(&mut self, ctx: &mut FrameContext<'_>) {
        log::info!("RadioPuzzle: radio turned on");
        self.started = true;
        self.loads.cancel();
        ctx.audio.stop_loop(STATIC_LOOP_ID);
        ctx.run.set_locked(false);

        let synth = ToneSynthLane::new(SYNTH_RATE);
        if !ctx.audio.has(NOISE) {
            ctx.audio.insert_sound(NOISE, synth.noise(2.0, 1.0, 0x5EED));
        }
        if !ctx.audio.has(TONE) {
            ctx.audio.insert_sound(TONE, synth.sine(TONE_HZ, 1.0, 1.0));
        }

        self.noise = ctx
            .audio
            .play_looping_segment(
                NOISE,
                Segment::starting_at(0.0),
                Some(NOISE_LOOP_ID),
                PlayOptions::on(SoundGroup::Sfx).volume(0.0),
            )
            .voice();
        self.tone = ctx
            .audio
            .play_looping_segment(
                TONE,
                Segment::starting_at(0.0),
                Some(TONE_LOOP_ID),
                PlayOptions::on(SoundGroup::Sfx)
                    .volume(0.0)
                    .rate(tone_rate(self.frequency)),
            )
            .voice();
    }

    fn tune(&mut self, ctx: &mut FrameContext<'_>) {
        self.frequency = turn_dial(self.frequency, ctx.input.dial_delta);
        let closeness = closeness(self.frequency);

        if let Some(noise) = self.noise {
            ctx.audio
                .set_voice_volume(noise, 0.1 + (1.0 - closeness) * 0.4, RAMP_SECS);
        }
        if let Some(tone) = self.tone {
            ctx.audio.set_voice_volume(tone, closeness * 0.1, RAMP_SECS);
            ctx.audio.set_voice_rate(tone, tone_rate(self.frequency));
        }

        if closeness > 0.9 && !self.speaking {
            self.speaking = true;
            ctx.publish(GameCommand::Subtitle(SubtitleCue::new(NUMBERS)));
        } else if closeness < 0.8 {
            self.speaking = false;
        }

        if (self.frequency - FREQ_TARGET).abs() < TOLERANCE {
            self.locked_in += 1;
        } else {
            self.locked_in = 0;
        }
        if self.locked_in > LOCK_IN_TICKS {
            log::info!("RadioPuzzle: station found at {:.2}", self.frequency);
            self.solved = true;
            self.stop_loops(ctx);
            unlock_end_door(ctx, "RadioPuzzle");
            ctx.run.set_locked(true);
        }
    }

    fn stop_loops(&mut self, ctx: &mut FrameContext<'_>) {
        ctx.audio.stop_loop(NOISE_LOOP_ID);
        ctx.audio.stop_loop(TONE_LOOP_ID);
        self.noise = None;
        self.tone = None;
    }
}

impl Default for RadioPuzzleLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBehavior for RadioPuzzleLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        let options =
            SubtitleOverrides::line_duration(HINT_DURATION_MS).apply(SubtitleOptions::default());
        ctx.publish(GameCommand::Subtitle(SubtitleCue::new(HINT).with_options(options)));

        let url = ctx.sound_url(STATIC);
        self.loads.request(&*ctx.audio, ctx.runtime, STATIC, &url, ());
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.started {
            for loaded in self.loads.poll() {
                if loaded.result.is_ok() {
                    self.play_static(ctx);
                }
            }
            if self.wants_to_start(ctx) {
                self.start(ctx);
            }
        } else if !self.solved {
            self.tune(ctx);
        }
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.loads.cancel();
        ctx.audio.stop_loop(STATIC_LOOP_ID);
        self.stop_loops(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dial_is_clamped_and_rounded() {
        assert_eq!(turn_dial(107.9, 1.0), FREQ_MAX);
        assert_eq!(turn_dial(88.2, -5.0), FREQ_MIN);
        assert_abs_diff_eq!(turn_dial(94.5, 0.123), 94.62, epsilon = 1e-4);
    }

    #[test]
    fn closeness_peaks_at_the_station() {
        assert_abs_diff_eq!(closeness(FREQ_TARGET), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(closeness(93.3), 0.5, epsilon = 1e-4);
        assert_eq!(closeness(FREQ_MIN), 0.0);
    }

    #[test]
    fn tone_rate_spans_the_band() {
        assert_abs_diff_eq!(tone_rate(FREQ_MIN), 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(tone_rate(FREQ_MAX), 1.2, epsilon = 1e-6);
    }
}
