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

use super::SoundData;
use futures::future::{BoxFuture, FutureExt, Shared};
use limen_core::asset::LoadError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared, immutable handle to a decoded sound.
pub type SoundHandle = Arc<SoundData>;

/// One load attempt, awaited by every caller that asked while it ran.
type PendingLoad = Shared<BoxFuture<'static, Result<SoundHandle, LoadError>>>;

enum Slot {
    Ready(SoundHandle),
    Loading(PendingLoad),
}

/// Name-keyed store of decoded sounds.
///
/// Entries are never evicted. Concurrent loads of the same name await one
/// shared attempt, so the name is fetched once and every waiter observes the
/// same outcome. A failed attempt is forgotten once it resolves, so a later
/// call may retry.
#[derive(Default)]
pub struct BufferCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl std::fmt::Debug for BufferCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.lock();
        let loading = slots
            .values()
            .filter(|slot| matches!(slot, Slot::Loading(_)))
            .count();
        f.debug_struct("BufferCache")
            .field("ready", &(slots.len() - loading))
            .field("loading", &loading)
            .finish()
    }
}

impl BufferCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The decoded sound for `name`, if its load has completed.
    pub fn get(&self, name: &str) -> Option<SoundHandle> {
        match self.lock().get(name) {
            Some(Slot::Ready(handle)) => Some(Arc::clone(handle)),
            _ => None,
        }
    }

    /// Whether `name` has finished loading.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether a load of `name` is running.
    pub fn is_loading(&self, name: &str) -> bool {
        matches!(self.lock().get(name), Some(Slot::Loading(_)))
    }

    /// Stores an already-decoded sound. If `name` is already filled, the
    /// existing buffer wins and is returned. A load still running for `name`
    /// keeps running but no longer replaces the stored buffer.
    pub fn insert(&self, name: &str, data: SoundData) -> SoundHandle {
        let mut slots = self.lock();
        if let Some(Slot::Ready(existing)) = slots.get(name) {
            return Arc::clone(existing);
        }
        let handle = Arc::new(data);
        slots.insert(name.to_owned(), Slot::Ready(Arc::clone(&handle)));
        handle
    }

    /// Returns the sound for `name`, running `load` only if no other caller
    /// has filled the slot or is filling it right now.
    ///
    /// Callers that arrive while an attempt runs await that attempt instead
    /// of starting their own, and get its result, failure included.
    pub async fn get_or_load<F, Fut>(&self, name: &str, load: F) -> Result<SoundHandle, LoadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SoundData, LoadError>> + Send + 'static,
    {
        let pending = {
            let mut slots = self.lock();
            match slots.get(name) {
                Some(Slot::Ready(handle)) => return Ok(Arc::clone(handle)),
                Some(Slot::Loading(pending)) => pending.clone(),
                None => {
                    let pending = load().map(|result| result.map(Arc::new)).boxed().shared();
                    slots.insert(name.to_owned(), Slot::Loading(pending.clone()));
                    pending
                }
            }
        };

        let result = pending.clone().await;
        self.settle(name, &pending, &result);
        result
    }

    /// Replaces the in-flight entry of `name` with the attempt's outcome.
    /// Entries that moved on since (filled by `insert`, or a newer attempt)
    /// are left alone.
    fn settle(
        &self,
        name: &str,
        attempt: &PendingLoad,
        result: &Result<SoundHandle, LoadError>,
    ) {
        let mut slots = self.lock();
        let Some(Slot::Loading(current)) = slots.get(name) else {
            return;
        };
        if !current.ptr_eq(attempt) {
            return;
        }
        match result {
            Ok(handle) => {
                slots.insert(name.to_owned(), Slot::Ready(Arc::clone(handle)));
            }
            Err(e) => {
                log::debug!("Load of '{name}' failed ({e}), a later request retries");
                slots.remove(name);
            }
        }
    }

    /// Number of names with a completed load.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    /// Whether no sound has finished loading yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn blip() -> SoundData {
        SoundData {
            samples: vec![0.1, 0.2, 0.3],
            channels: 1,
            sample_rate: 3,
        }
    }

    fn spawn_loads(
        cache: &Arc<BufferCache>,
        fetches: &Arc<AtomicUsize>,
        count: usize,
        outcome: fn() -> Result<SoundData, LoadError>,
    ) -> Vec<tokio::task::JoinHandle<Result<SoundHandle, LoadError>>> {
        (0..count)
            .map(|_| {
                let cache = Arc::clone(cache);
                let fetches = Arc::clone(fetches);
                tokio::spawn(async move {
                    cache
                        .get_or_load("door", || async move {
                            fetches.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            outcome()
                        })
                        .await
                })
            })
            .collect()
    }

    fn missing() -> Result<SoundData, LoadError> {
        Err(LoadError::NotFound {
            url: "/audio/door.wav".into(),
        })
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let cache = Arc::new(BufferCache::new());
        let fetches = Arc::new(AtomicUsize::new(0));

        for task in spawn_loads(&cache, &fetches, 8, || Ok(blip())) {
            assert!(task.await.expect("load task panicked").is_ok());
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_loading("door"));
    }

    #[tokio::test]
    async fn concurrent_failed_loads_share_one_fetch_and_error() {
        let cache = Arc::new(BufferCache::new());
        let fetches = Arc::new(AtomicUsize::new(0));

        for task in spawn_loads(&cache, &fetches, 4, missing) {
            let result = task.await.expect("load task panicked");
            assert_eq!(
                result.err(),
                Some(LoadError::NotFound {
                    url: "/audio/door.wav".into()
                })
            );
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(!cache.contains("door"));
        assert!(!cache.is_loading("door"));

        // The failed attempt is gone, so the next request fetches again.
        for task in spawn_loads(&cache, &fetches, 2, || Ok(blip())) {
            assert!(task.await.expect("load task panicked").is_ok());
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert!(cache.contains("door"));
    }

    #[tokio::test]
    async fn failed_load_can_be_retried() {
        let cache = BufferCache::new();
        let first = cache
            .get_or_load("radio", || async {
                Err(LoadError::NotFound {
                    url: "/audio/radio.wav".into(),
                })
            })
            .await;
        assert!(first.is_err());
        assert!(!cache.contains("radio"));

        let second = cache.get_or_load("radio", || async { Ok(blip()) }).await;
        assert!(second.is_ok());
        assert!(cache.contains("radio"));
    }

    #[tokio::test]
    async fn cached_name_skips_the_loader() {
        let cache = BufferCache::new();
        cache.insert("tone", blip());
        let loaded = cache
            .get_or_load("tone", || async { missing() })
            .await
            .expect("already cached");
        assert_eq!(loaded.samples, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn insert_keeps_first_buffer() {
        let cache = BufferCache::new();
        cache.insert("tone", blip());
        let mut other = blip();
        other.samples = vec![0.9];
        let kept = cache.insert("tone", other);
        assert_eq!(kept.samples, vec![0.1, 0.2, 0.3]);
    }
}
