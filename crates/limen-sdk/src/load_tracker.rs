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

//! Async sound loads owned by a mounted component.
//!
//! Loads run on the tokio runtime and resolve whenever they resolve. Their
//! results come back to the tick through a channel and are only delivered
//! while the owner is alive, so a behaviour unmounted mid-load never sees
//! the result.

use limen_agents::AudioEngine;
use limen_core::asset::LoadError;
use limen_core::Liveness;
use limen_data::assets::SoundHandle;
use tokio::runtime::Handle;

/// A finished load, tagged with what its owner wanted it for.
#[derive(Debug)]
pub struct LoadOutcome<T> {
    /// The owner's tag.
    pub tag: T,
    /// Logical sound name.
    pub name: String,
    /// The decoded buffer, or why it is unavailable.
    pub result: Result<SoundHandle, LoadError>,
}

/// Issues loads for one owner and hands their results back on poll.
pub struct LoadTracker<T> {
    liveness: Liveness,
    sender: flume::Sender<LoadOutcome<T>>,
    receiver: flume::Receiver<LoadOutcome<T>>,
    in_flight: usize,
}

impl<T: Send + 'static> LoadTracker<T> {
    /// A tracker with nothing in flight.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            liveness: Liveness::new(),
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Makes `name` available, delivering `tag` with the outcome on a later
    /// [`LoadTracker::poll`].
    ///
    /// A sound that is already cached is delivered on the next poll without
    /// touching the runtime.
    pub fn request(
        &mut self,
        audio: &AudioEngine,
        runtime: &Handle,
        name: &str,
        url: &str,
        tag: T,
    ) {
        if !self.liveness.is_alive() {
            return;
        }
        self.in_flight += 1;

        if let Some(sound) = audio.sound(name) {
            // The receiver lives in `self`, so the send cannot fail.
            let _ = self.sender.send(LoadOutcome {
                tag,
                name: name.to_owned(),
                result: Ok(sound),
            });
            return;
        }

        let load = audio.load(name, url);
        let liveness = self.liveness.clone();
        let sender = self.sender.clone();
        let name = name.to_owned();
        runtime.spawn(async move {
            let result = load.await;
            if liveness.is_alive() {
                let _ = sender.send(LoadOutcome { tag, name, result });
            } else {
                log::debug!("Dropping load of '{name}': owner is gone");
            }
        });
    }

    /// Every load that finished since the last poll. Failures are logged
    /// here once, so owners only need to skip them.
    pub fn poll(&mut self) -> Vec<LoadOutcome<T>> {
        if !self.liveness.is_alive() {
            return Vec::new();
        }
        let done: Vec<_> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(done.len());
        for outcome in &done {
            if let Err(e) = &outcome.result {
                log::warn!("Sound '{}' unavailable: {e}", outcome.name);
            }
        }
        done
    }

    /// Loads issued but not yet polled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Drops every pending and future result.
    pub fn cancel(&mut self) {
        self.liveness.kill();
        self.in_flight = 0;
        for _ in self.receiver.try_iter() {}
    }

    /// Whether [`LoadTracker::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        !self.liveness.is_alive()
    }
}

impl<T: Send + 'static> Default for LoadTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LoadTracker<T> {
    fn drop(&mut self) {
        self.liveness.kill();
    }
}
