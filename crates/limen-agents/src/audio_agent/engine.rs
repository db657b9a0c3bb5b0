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

use super::footstep::FootstepPicker;
use super::music::MusicTrack;
use super::options::{AudioEngineOptions, MusicOptions, PlayOptions, Segment};
use anyhow::{Context, Result};
use futures::future::join_all;
use limen_core::asset::{AssetSource, LoadError};
use limen_core::audio::{AudioDevice, MixCallback, StreamInfo};
use limen_core::math::Vec3;
use limen_core::Timers;
use limen_data::assets::{BufferCache, SoundData, SoundHandle};
use limen_data::audio::{
    AudioListener, GainRamp, MixerState, SoundGroup, Voice, VoiceId,
};
use limen_lanes::asset_lane::SoundLoaderLane;
use limen_lanes::audio_lane::BusMixingLane;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Engine-side timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EngineTimer {
    /// Remove a voice from the mixer.
    Release(VoiceId),
}

/// A read-only view of one voice, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceInfo {
    /// Mixer id.
    pub id: VoiceId,
    /// Cache name of the sound.
    pub name: String,
    /// Bus the voice is routed through.
    pub group: SoundGroup,
    /// Whether the voice wraps around its segment.
    pub looping: bool,
    /// Current gain.
    pub gain: f32,
    /// Gain the voice is fading towards.
    pub target_gain: f32,
    /// Playback rate.
    pub rate: f32,
    /// Whether the voice is spatialized.
    pub positional: bool,
}

impl From<&Voice> for VoiceInfo {
    fn from(voice: &Voice) -> Self {
        Self {
            id: voice.id,
            name: voice.name.clone(),
            group: voice.group,
            looping: voice.looping,
            gain: voice.gain.value(),
            target_gain: voice.gain.target(),
            rate: voice.rate,
            positional: voice.spatial.is_some(),
        }
    }
}

/// The audio agent: buffer cache, bus graph and playback primitives.
///
/// Lives on the game thread and is driven by [`AudioEngine::update`] once per
/// tick. The mixer state it edits is shared with the device callback through
/// an `Arc<Mutex<..>>`; the lock is only held for short edits.
///
/// The engine starts suspended: nothing is heard and music requests are
/// queued until [`AudioEngine::resume`] is called on the first user gesture.
pub struct AudioEngine {
    pub(crate) mixer: Arc<Mutex<MixerState>>,
    mixing_lane: Arc<BusMixingLane>,
    cache: Arc<BufferCache>,
    source: Arc<dyn AssetSource>,
    decoder: Arc<SoundLoaderLane>,
    pub(crate) options: AudioEngineOptions,
    pub(crate) timers: Timers<EngineTimer>,
    pub(crate) loops: HashMap<String, VoiceId>,
    pub(crate) music: Option<MusicTrack>,
    pub(crate) queued_music: Option<(String, MusicOptions)>,
    pub(crate) footsteps: FootstepPicker,
    next_voice: u64,
}

impl AudioEngine {
    /// Creates a suspended engine fetching assets from `source`.
    pub fn new(source: Arc<dyn AssetSource>, options: AudioEngineOptions) -> Self {
        let mixer = MixerState {
            buses: options.buses,
            ..MixerState::new()
        };
        Self {
            mixer: Arc::new(Mutex::new(mixer)),
            mixing_lane: Arc::new(BusMixingLane::new()),
            cache: Arc::new(BufferCache::new()),
            source,
            decoder: Arc::new(SoundLoaderLane::new()),
            footsteps: FootstepPicker::new(options.rng_seed),
            options,
            timers: Timers::new(),
            loops: HashMap::new(),
            music: None,
            queued_music: None,
            next_voice: 0,
        }
    }

    pub(crate) fn mixer(&self) -> MutexGuard<'_, MixerState> {
        self.mixer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hands the mixer to an output device. The device consumes itself, so
    /// this can only succeed once per device.
    pub fn attach_device(&mut self, device: Box<dyn AudioDevice>) -> Result<()> {
        let mixer = Arc::clone(&self.mixer);
        let mixing_lane = Arc::clone(&self.mixing_lane);

        let on_mix_needed: MixCallback = Box::new(move |output: &mut [f32], stream: &StreamInfo| {
            let mut state = mixer.lock().unwrap_or_else(PoisonError::into_inner);
            mixing_lane.mix(&mut state, output, stream);
        });

        device
            .start(on_mix_needed)
            .context("Failed to start the audio output device")
    }

    /// Renders into `output` exactly as the device callback would.
    pub fn render(&self, output: &mut [f32], stream: &StreamInfo) {
        let mut state = self.mixer();
        self.mixing_lane.mix(&mut state, output, stream);
    }

    // --- Loading ---

    /// Binds `name` to the sound stored at `url`.
    ///
    /// A no-op when `name` is already cached. Concurrent loads of the same
    /// name share one fetch and decode. The returned future owns everything
    /// it needs, so it can be spawned on any runtime.
    pub fn load(
        &self,
        name: &str,
        url: &str,
    ) -> impl Future<Output = Result<SoundHandle, LoadError>> + Send + 'static {
        let cache = Arc::clone(&self.cache);
        let source = Arc::clone(&self.source);
        let decoder = Arc::clone(&self.decoder);
        let name = name.to_owned();
        let url = url.to_owned();

        async move {
            let decode_name = name.clone();
            cache
                .get_or_load(&name, move || async move {
                    log::debug!("Fetching '{decode_name}' from {url}");
                    let bytes = source.fetch(&url).await?;
                    decoder
                        .load_from(&url, &bytes)
                        .map_err(|e| LoadError::Decode {
                            name: decode_name,
                            message: e.to_string(),
                        })
                })
                .await
        }
    }

    /// Loads every `(name, url)` pair concurrently. Failures are logged and
    /// skipped. Returns how many names are available afterwards.
    pub async fn preload<I, N, U>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (N, U)>,
        N: AsRef<str>,
        U: AsRef<str>,
    {
        let loads: Vec<_> = entries
            .into_iter()
            .map(|(name, url)| {
                let name = name.as_ref().to_owned();
                let load = self.load(&name, url.as_ref());
                async move {
                    match load.await {
                        Ok(_) => true,
                        Err(e) => {
                            log::warn!("Preload of '{name}' failed: {e}");
                            false
                        }
                    }
                }
            })
            .collect();
        join_all(loads).await.into_iter().filter(|ok| *ok).count()
    }

    /// Stores a sound that was produced in memory (e.g. synthesized).
    pub fn insert_sound(&self, name: &str, data: SoundData) -> SoundHandle {
        self.cache.insert(name, data)
    }

    /// Whether `name` is loaded.
    pub fn has(&self, name: &str) -> bool {
        self.cache.contains(name)
    }

    /// The decoded buffer bound to `name`.
    pub fn sound(&self, name: &str) -> Option<SoundHandle> {
        self.cache.get(name)
    }

    // --- Playback ---

    pub(crate) fn allocate_voice_id(&mut self) -> VoiceId {
        self.next_voice += 1;
        VoiceId(self.next_voice)
    }

    pub(crate) fn build_voice(
        &mut self,
        name: &str,
        sound: SoundHandle,
        opts: &PlayOptions,
    ) -> Voice {
        let id = self.allocate_voice_id();
        let mut voice = Voice::new(id, name, sound, opts.group)
            .with_rate(opts.rate)
            .with_gain(GainRamp::fixed(opts.clamped_volume()));
        if let Some(spatial) = opts.spatial {
            voice = voice.with_spatial(spatial.into());
        }
        voice
    }

    /// Plays all of `name` once. The voice is disposed on a timer sized to
    /// the buffer, whether or not the mixer has reached its end.
    pub fn play_one_shot(&mut self, name: &str, opts: PlayOptions) -> Option<VoiceId> {
        let Some(sound) = self.cache.get(name) else {
            log::debug!("One-shot '{name}' skipped: not loaded");
            return None;
        };
        let voice = self.build_voice(name, sound, &opts);
        Some(self.push_disposable(voice))
    }

    /// Plays a time slice of `name` once.
    pub fn play_segment(
        &mut self,
        name: &str,
        segment: Segment,
        opts: PlayOptions,
    ) -> Option<VoiceId> {
        let Some(sound) = self.cache.get(name) else {
            log::warn!("Segment of '{name}' skipped: buffer not loaded");
            return None;
        };
        let voice = self
            .build_voice(name, sound, &opts)
            .with_segment(segment.start, segment.duration);
        if voice.region.is_empty() {
            log::warn!("Segment of '{name}' starting at {}s is empty", segment.start);
            return None;
        }
        Some(self.push_disposable(voice))
    }

    fn push_disposable(&mut self, voice: Voice) -> VoiceId {
        let id = voice.id;
        let lifetime = voice.pass_secs() + self.options.dispose_margin;
        self.mixer().push(voice);
        self.timers.schedule(lifetime, EngineTimer::Release(id));
        id
    }

    /// Opening half of the door sprite.
    pub fn play_door_open(&mut self) -> Option<VoiceId> {
        let sprite = self.options.door_sprite.clone();
        let segment = Segment::new(0.0, self.options.door_open_end);
        self.play_segment(&sprite, segment, PlayOptions::on(SoundGroup::Sfx))
    }

    /// Closing half of the door sprite.
    pub fn play_door_close(&mut self) -> Option<VoiceId> {
        let sprite = self.options.door_sprite.clone();
        let segment = Segment::starting_at(self.options.door_close_start);
        self.play_segment(&sprite, segment, PlayOptions::on(SoundGroup::Sfx))
    }

    /// Removes a voice immediately.
    pub fn stop_voice(&mut self, id: VoiceId) -> bool {
        let removed = self.mixer().remove(id);
        if removed {
            self.forget(&[id]);
        }
        removed
    }

    /// Fades a voice to silence over `fade` seconds and frees it `free_after`
    /// seconds from now.
    pub(crate) fn release_with_fade(&mut self, id: VoiceId, fade: f32, free_after: f32) {
        let found = match self.mixer().voice_mut(id) {
            Some(voice) => {
                voice.gain.ramp_to(0.0, fade);
                true
            }
            None => false,
        };
        if found {
            self.timers.schedule(free_after, EngineTimer::Release(id));
        }
    }

    /// Ramps a playing voice to `volume` over `secs`.
    pub fn set_voice_volume(&mut self, id: VoiceId, volume: f32, secs: f32) {
        if let Some(voice) = self.mixer().voice_mut(id) {
            voice.gain.ramp_to(volume.clamp(0.0, 1.0), secs);
        }
    }

    /// Changes the playback rate of a playing voice.
    pub fn set_voice_rate(&mut self, id: VoiceId, rate: f32) {
        if let Some(voice) = self.mixer().voice_mut(id) {
            voice.rate = if rate > 0.0 { rate } else { 1.0 };
        }
    }

    /// Moves the listener to the camera pose.
    pub fn set_listener(&mut self, position: Vec3, forward: Vec3) {
        self.mixer().listener = Some(AudioListener::from_pose(position, forward));
    }

    /// Sets the gain of one bus, clamped to `[0, 1]`.
    pub fn set_group_volume(&mut self, group: SoundGroup, volume: f32) {
        self.mixer().buses.set(group, volume);
    }

    /// Gain of one bus.
    pub fn group_volume(&self, group: SoundGroup) -> f32 {
        self.mixer().buses.get(group)
    }

    // --- Lifecycle ---

    /// Whether output is running.
    pub fn is_running(&self) -> bool {
        self.mixer().running
    }

    /// Stops output. Voices are kept but neither heard nor advanced.
    pub fn suspend(&mut self) {
        self.mixer().running = false;
    }

    /// Advances fades and disposal timers by `dt` seconds and drops voices
    /// that are done.
    pub fn update(&mut self, dt: f32) {
        let due = self.timers.advance(dt);
        let removed = {
            let mut mixer = self.mixer();
            for voice in mixer.voices.iter_mut() {
                voice.gain.advance(dt);
            }
            let mut removed = Vec::new();
            for timer in due {
                match timer {
                    EngineTimer::Release(id) => {
                        if mixer.remove(id) {
                            removed.push(id);
                        }
                    }
                }
            }
            removed.extend(mixer.sweep_finished());
            removed
        };
        if !removed.is_empty() {
            self.forget(&removed);
        }
    }

    /// Drops bookkeeping that points at voices no longer in the mixer.
    fn forget(&mut self, removed: &[VoiceId]) {
        self.loops.retain(|_, voice| !removed.contains(voice));
        if self
            .music
            .as_ref()
            .is_some_and(|track| removed.contains(&track.voice))
        {
            self.music = None;
        }
    }

    // --- Introspection ---

    /// Number of voices in the mixer.
    pub fn voice_count(&self) -> usize {
        self.mixer().voices.len()
    }

    /// Snapshot of every voice.
    pub fn voices(&self) -> Vec<VoiceInfo> {
        self.mixer().voices.iter().map(VoiceInfo::from).collect()
    }

    /// Snapshot of one voice.
    pub fn voice(&self, id: VoiceId) -> Option<VoiceInfo> {
        self.mixer().voice(id).map(VoiceInfo::from)
    }
}
