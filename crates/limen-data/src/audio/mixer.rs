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

use super::{AudioListener, BusGains, Voice, VoiceId};

/// Everything the mixing callback reads.
///
/// Shared between the game thread (which adds, fades and removes voices) and
/// the audio device thread (which renders them).
#[derive(Debug, Default)]
pub struct MixerState {
    /// Voices currently playing.
    pub voices: Vec<Voice>,
    /// Bus gains.
    pub buses: BusGains,
    /// The listener, when positional voices should be spatialized.
    pub listener: Option<AudioListener>,
    /// Whether output is running. A suspended mixer renders silence and does
    /// not advance voices.
    pub running: bool,
}

impl MixerState {
    /// An empty, suspended mixer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a voice.
    pub fn push(&mut self, voice: Voice) {
        self.voices.push(voice);
    }

    /// The voice with `id`, if still present.
    pub fn voice(&self, id: VoiceId) -> Option<&Voice> {
        self.voices.iter().find(|v| v.id == id)
    }

    /// Mutable access to the voice with `id`.
    pub fn voice_mut(&mut self, id: VoiceId) -> Option<&mut Voice> {
        self.voices.iter_mut().find(|v| v.id == id)
    }

    /// Removes the voice with `id`. Removing twice is harmless.
    pub fn remove(&mut self, id: VoiceId) -> bool {
        let before = self.voices.len();
        self.voices.retain(|v| v.id != id);
        before != self.voices.len()
    }

    /// Drops voices the mixer has marked finished, returning their ids.
    pub fn sweep_finished(&mut self) -> Vec<VoiceId> {
        let finished: Vec<VoiceId> = self
            .voices
            .iter()
            .filter(|v| v.finished)
            .map(|v| v.id)
            .collect();
        self.voices.retain(|v| !v.finished);
        finished
    }
}
