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

//! Named looping segments.

use super::engine::AudioEngine;
use super::options::{PlayOptions, Segment};
use limen_data::audio::{GainRamp, VoiceId};

/// Stops one particular loop started by
/// [`AudioEngine::play_looping_segment`].
///
/// A handle only ever stops its own voice: if its loop id has since been
/// taken over by a newer loop, the newer registration is left alone. An
/// inert handle (nothing was started) stops nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopHandle {
    loop_id: Option<String>,
    voice: Option<VoiceId>,
}

impl LoopHandle {
    pub(crate) fn inert() -> Self {
        Self {
            loop_id: None,
            voice: None,
        }
    }

    /// Whether nothing was started.
    pub fn is_inert(&self) -> bool {
        self.voice.is_none()
    }

    /// The looping voice, if any.
    pub fn voice(&self) -> Option<VoiceId> {
        self.voice
    }

    /// Fades the loop out and frees it.
    pub fn stop(&self, engine: &mut AudioEngine) {
        let Some(voice) = self.voice else {
            return;
        };
        if let Some(loop_id) = &self.loop_id {
            if engine.loops.get(loop_id) == Some(&voice) {
                engine.loops.remove(loop_id);
            }
        }
        engine.fade_out_loop_voice(voice);
    }
}

impl AudioEngine {
    /// Loops a slice of `name` until stopped.
    ///
    /// With a `loop_id`, at most one loop lives under that id: a loop already
    /// registered there is faded out before the new one starts. The loop
    /// fades in over a short ramp. A slice starting at or past the end of the
    /// buffer starts nothing and yields an inert handle.
    pub fn play_looping_segment(
        &mut self,
        name: &str,
        segment: Segment,
        loop_id: Option<&str>,
        opts: PlayOptions,
    ) -> LoopHandle {
        let Some(sound) = self.sound(name) else {
            log::warn!("Loop of '{name}' skipped: buffer not loaded");
            return LoopHandle::inert();
        };

        if let Some(id) = loop_id {
            self.stop_loop(id);
        }

        if segment.start >= sound.duration_secs() {
            log::warn!(
                "Loop of '{name}' starts at {}s, past its {:.2}s buffer",
                segment.start,
                sound.duration_secs()
            );
            return LoopHandle::inert();
        }

        let fade_in = self.options.loop_fade_in;
        let voice = self
            .build_voice(name, sound, &opts)
            .with_segment(segment.start, segment.duration)
            .with_looping(true)
            .with_gain(GainRamp::fade_in(opts.clamped_volume(), fade_in));
        let voice_id = voice.id;
        self.mixer().push(voice);

        if let Some(id) = loop_id {
            self.loops.insert(id.to_owned(), voice_id);
        }
        LoopHandle {
            loop_id: loop_id.map(str::to_owned),
            voice: Some(voice_id),
        }
    }

    /// Stops the loop registered under `loop_id`. Returns whether there was
    /// one.
    pub fn stop_loop(&mut self, loop_id: &str) -> bool {
        match self.loops.remove(loop_id) {
            Some(voice) => {
                self.fade_out_loop_voice(voice);
                true
            }
            None => false,
        }
    }

    pub(crate) fn fade_out_loop_voice(&mut self, voice: VoiceId) {
        let (fade, free_after) = (self.options.loop_fade_out, self.options.loop_free_after);
        self.release_with_fade(voice, fade, free_after);
    }

    /// Whether a loop is registered under `loop_id`.
    pub fn has_loop(&self, loop_id: &str) -> bool {
        self.loops.contains_key(loop_id)
    }

    /// The voice registered under `loop_id`.
    pub fn loop_voice(&self, loop_id: &str) -> Option<VoiceId> {
        self.loops.get(loop_id).copied()
    }

    /// Number of registered loops.
    pub fn live_loop_count(&self) -> usize {
        self.loops.len()
    }
}
