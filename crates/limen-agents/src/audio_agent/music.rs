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

//! The single music track.

use super::engine::{AudioEngine, EngineTimer};
use super::options::MusicOptions;
use limen_data::audio::{GainRamp, SoundGroup, Voice, VoiceId};

/// The track currently owning the music bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MusicTrack {
    pub(crate) name: String,
    pub(crate) voice: VoiceId,
}

impl AudioEngine {
    /// Plays `name` as the music track.
    ///
    /// Asking for the track that is already playing does nothing. Any other
    /// track is stopped (faded out over `opts.fade` when given) and the new
    /// one fades in over the same time. While output is suspended the request
    /// is queued, replacing any earlier queued request, and replayed by
    /// [`AudioEngine::resume`].
    pub fn play_music(&mut self, name: &str, opts: MusicOptions) {
        if !self.is_running() {
            log::info!("Audio suspended, queueing music '{name}' until resume");
            self.queued_music = Some((name.to_owned(), opts));
            return;
        }

        if self.current_music() == Some(name) {
            return;
        }

        self.stop_music(opts.fade);

        let Some(sound) = self.sound(name) else {
            log::warn!("Music '{name}' is not loaded");
            return;
        };

        let volume = opts.volume.clamp(0.0, 1.0);
        let gain = match opts.fade {
            Some(fade) if fade > 0.0 => GainRamp::fade_in(volume, fade),
            _ => GainRamp::fixed(volume),
        };
        let id = self.allocate_voice_id();
        let voice = Voice::new(id, name, sound, SoundGroup::Music)
            .with_looping(opts.looping)
            .with_gain(gain);
        if !opts.looping {
            let lifetime = voice.pass_secs() + self.options.dispose_margin;
            self.timers.schedule(lifetime, EngineTimer::Release(id));
        }
        self.mixer().push(voice);

        log::debug!("Music '{name}' started");
        self.music = Some(MusicTrack {
            name: name.to_owned(),
            voice: id,
        });
    }

    /// Stops the music track, fading it out over `fade` seconds when given.
    /// Also drops a request queued while suspended.
    pub fn stop_music(&mut self, fade: Option<f32>) {
        self.queued_music = None;
        let Some(track) = self.music.take() else {
            return;
        };
        match fade {
            Some(fade) if fade > 0.0 => self.release_with_fade(track.voice, fade, fade),
            _ => {
                self.stop_voice(track.voice);
            }
        }
    }

    /// Starts output and replays a music request queued while suspended.
    pub fn resume(&mut self) {
        let was_running = {
            let mut mixer = self.mixer();
            std::mem::replace(&mut mixer.running, true)
        };
        if !was_running {
            log::info!("Audio output resumed");
        }
        if let Some((name, opts)) = self.queued_music.take() {
            self.play_music(&name, opts);
        }
    }

    /// Name of the track currently playing.
    pub fn current_music(&self) -> Option<&str> {
        self.music.as_ref().map(|track| track.name.as_str())
    }

    /// Name of the track waiting for [`AudioEngine::resume`].
    pub fn queued_music(&self) -> Option<&str> {
        self.queued_music.as_ref().map(|(name, _)| name.as_str())
    }
}
