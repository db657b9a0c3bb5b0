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

//! The piano puzzle: play the melody while your sanity drains.

use super::unlock_end_door;
use crate::command::GameCommand;
use crate::context::FrameContext;
use crate::loops::behavior::LoopBehavior;
use crate::subtitle::{SubtitleCue, SubtitleOptions, SubtitleOverrides};
use limen_agents::audio_agent::{PlayOptions, SoundGroup};
use limen_core::Timers;
use limen_data::assets::SoundData;
use limen_lanes::audio_lane::ToneSynthLane;

const HINT: &str = "Find and play the piano";
const HINT_DURATION_MS: u32 = 9000;
const INTERACT_RANGE: f32 = 3.0;
const GAZE_DOT: f32 = 0.9;
const SYNTH_RATE: u32 = 44_100;

/// Frequencies of the thirteen keys, C4 to C5.
pub const KEY_FREQUENCIES: [f32; 13] = [
    261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, 392.0, 415.3, 440.0, 466.16, 493.88,
    523.25,
];
/// The melody, as key indices: F# F F# C A#.
pub const SEQUENCE: [u8; 5] = [6, 5, 6, 0, 10];
const WIN_CHORD: [(f32, f32); 5] = [
    (138.59, 0.0),
    (196.0, 0.4),
    (277.18, 0.8),
    (392.0, 1.2),
    (554.37, 1.6),
];

/// Full sanity.
pub const SANITY_MAX: f32 = 100.0;
const SANITY_DRAIN: f32 = 2.5;
const SANITY_REGAIN: f32 = 0.5;
const SANITY_PENALTY: f32 = 15.0;
const SANITY_STEP_SECS: f32 = 0.1;
const MISTAKE_COOLDOWN: f32 = 1.0;
const LOST_RESET_AFTER: f32 = 1.6;
const WON_RELOCK_AFTER: f32 = 2.5;
const WON_UNLOCK_AFTER: f32 = 3.5;

/// Where the piano puzzle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PianoPhase {
    /// Waiting for the player to sit down.
    Idle,
    /// Keys are live.
    Playing,
    /// The melody was played.
    Won,
    /// Sanity ran out.
    Lost,
}

#[derive(Debug, Clone, Copy)]
enum PianoEvent {
    MistakeOver,
    Reset,
    Chord(usize),
    Relock,
    Unlock,
}

/// The piano in the corner.
pub struct PianoPuzzleLoop {
    phase: PianoPhase,
    sanity: f32,
    progress: usize,
    cooling_down: bool,
    sanity_clock: f32,
    timers: Timers<PianoEvent>,
    synth: ToneSynthLane,
}

impl PianoPuzzleLoop {
    /// A fresh instance.
    pub fn new() -> Self {
        Self {
            phase: PianoPhase::Idle,
            sanity: SANITY_MAX,
            progress: 0,
            cooling_down: false,
            sanity_clock: 0.0,
            timers: Timers::new(),
            synth: ToneSynthLane::new(SYNTH_RATE),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> PianoPhase {
        self.phase
    }

    /// Current sanity, in `[0, 100]`.
    pub fn sanity(&self) -> f32 {
        self.sanity
    }

    /// Number of correct notes played in a row.
    pub fn progress(&self) -> usize {
        self.progress
    }

    fn wants_to_start(&self, ctx: &FrameContext<'_>) -> bool {
        if !ctx.input.interact {
            return false;
        }
        let Some(piano) = ctx.scene.world_position(&ctx.config.scene.piano) else {
            return false;
        };
        ctx.pose.position.distance(piano) <= INTERACT_RANGE && ctx.pose.gaze_dot(piano) > GAZE_DOT
    }

    fn start(&mut self, ctx: &mut FrameContext<'_>) {
        log::info!("PianoPuzzle: sat down at the piano");
        self.phase = PianoPhase::Playing;
        ctx.run.set_locked(false);
        ctx.audio.resume();
    }

    /// Plays a synthesised tone, caching the buffer under `name`.
    fn play_tone(
        &self,
        ctx: &mut FrameContext<'_>,
        name: &str,
        make: impl FnOnce() -> SoundData,
    ) {
        if !ctx.audio.has(name) {
            ctx.audio.insert_sound(name, make());
        }
        ctx.audio.play_one_shot(name, PlayOptions::on(SoundGroup::Sfx));
    }

    fn press(&mut self, ctx: &mut FrameContext<'_>, key: u8) {
        let Some(&freq) = KEY_FREQUENCIES.get(usize::from(key)) else {
            log::debug!("PianoPuzzle: ignoring key {key}");
            return;
        };

        if SEQUENCE[self.progress] == key {
            let synth = &self.synth;
            self.play_tone(ctx, &format!("piano_note_{key}"), || synth.piano_note(freq));
            self.progress += 1;
            if self.progress == SEQUENCE.len() {
                self.win();
            }
        } else {
            let synth = &self.synth;
            self.play_tone(ctx, &format!("piano_discord_{key}"), || synth.discord(freq));
            log::debug!("PianoPuzzle: wrong key {key}, sequence reset");
            self.sanity = (self.sanity - SANITY_PENALTY).max(0.0);
            self.progress = 0;
            self.cooling_down = true;
            self.timers.schedule(MISTAKE_COOLDOWN, PianoEvent::MistakeOver);
        }
    }

    fn win(&mut self) {
        log::info!("PianoPuzzle: melody complete");
        self.phase = PianoPhase::Won;
        for (i, (_, delay)) in WIN_CHORD.iter().enumerate() {
            self.timers.schedule(*delay, PianoEvent::Chord(i));
        }
        self.timers.schedule(WON_RELOCK_AFTER, PianoEvent::Relock);
        self.timers.schedule(WON_UNLOCK_AFTER, PianoEvent::Unlock);
    }

    fn lose(&mut self) {
        log::info!("PianoPuzzle: sanity ran out");
        self.phase = PianoPhase::Lost;
        self.sanity = 0.0;
        self.timers.cancel_where(|e| matches!(e, PianoEvent::MistakeOver));
        self.cooling_down = false;
        self.timers.schedule(LOST_RESET_AFTER, PianoEvent::Reset);
    }

    fn drain_sanity(&mut self, dt: f32, focusing: bool) {
        self.sanity_clock += dt;
        while self.sanity_clock >= SANITY_STEP_SECS && self.phase == PianoPhase::Playing {
            self.sanity_clock -= SANITY_STEP_SECS;
            if focusing {
                self.sanity -= SANITY_DRAIN;
                if self.sanity <= 0.0 {
                    self.lose();
                }
            } else {
                self.sanity = (self.sanity + SANITY_REGAIN).min(SANITY_MAX);
            }
        }
    }

    fn handle(&mut self, ctx: &mut FrameContext<'_>, event: PianoEvent) {
        match event {
            PianoEvent::MistakeOver => self.cooling_down = false,
            PianoEvent::Reset => {
                self.phase = PianoPhase::Idle;
                self.sanity = SANITY_MAX;
                self.progress = 0;
                self.sanity_clock = 0.0;
                ctx.run.set_locked(true);
            }
            PianoEvent::Chord(i) => {
                let freq = WIN_CHORD[i].0;
                let synth = &self.synth;
                self.play_tone(ctx, &format!("piano_chord_{i}"), || synth.piano_note(freq));
            }
            PianoEvent::Relock => ctx.run.set_locked(true),
            PianoEvent::Unlock => unlock_end_door(ctx, "PianoPuzzle"),
        }
    }
}

impl Default for PianoPuzzleLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBehavior for PianoPuzzleLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        let options =
            SubtitleOverrides::line_duration(HINT_DURATION_MS).apply(SubtitleOptions::default());
        ctx.publish(GameCommand::Subtitle(SubtitleCue::new(HINT).with_options(options)));
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        for event in self.timers.advance(ctx.dt) {
            self.handle(ctx, event);
        }

        match self.phase {
            PianoPhase::Idle => {
                if self.wants_to_start(ctx) {
                    self.start(ctx);
                }
            }
            PianoPhase::Playing => {
                if !self.cooling_down {
                    let keys = ctx.input.key_presses.clone();
                    for key in keys {
                        if self.phase != PianoPhase::Playing || self.cooling_down {
                            break;
                        }
                        self.press(ctx, key);
                    }
                }
                if self.phase == PianoPhase::Playing {
                    self.drain_sanity(ctx.dt, ctx.input.focus_held);
                }
            }
            PianoPhase::Won | PianoPhase::Lost => {}
        }
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.timers.clear();
        if self.phase == PianoPhase::Playing {
            ctx.run.set_locked(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn playing() -> PianoPuzzleLoop {
        let mut piano = PianoPuzzleLoop::new();
        piano.phase = PianoPhase::Playing;
        piano
    }

    #[test]
    fn sequence_spells_the_melody() {
        let freqs: Vec<f32> = SEQUENCE.iter().map(|&k| KEY_FREQUENCIES[usize::from(k)]).collect();
        assert_eq!(freqs, vec![369.99, 349.23, 369.99, 261.63, 466.16]);
    }

    #[test]
    fn focusing_drains_and_resting_regains() {
        let mut piano = playing();
        piano.drain_sanity(1.05, true);
        assert_abs_diff_eq!(piano.sanity, 75.0, epsilon = 1e-3);
        piano.drain_sanity(1.0, false);
        assert_abs_diff_eq!(piano.sanity, 80.0, epsilon = 1e-3);
    }

    #[test]
    fn regain_is_capped() {
        let mut piano = playing();
        piano.drain_sanity(5.0, false);
        assert_eq!(piano.sanity, SANITY_MAX);
    }

    #[test]
    fn sanity_running_out_loses() {
        let mut piano = playing();
        piano.drain_sanity(4.05, true);
        assert_eq!(piano.phase, PianoPhase::Lost);
        assert_eq!(piano.sanity, 0.0);
    }
}
