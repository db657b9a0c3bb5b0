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

use async_trait::async_trait;
use limen_core::asset::{AssetSource, LoadError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Serves assets from memory, counting every fetch.
///
/// Used by the headless sandbox and by tests that need to observe how many
/// physical fetches a burst of loads produced.
#[derive(Debug, Default)]
pub struct MemoryAssetSource {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fetches: AtomicUsize,
    latency: Option<Duration>,
}

impl MemoryAssetSource {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every fetch wait `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Stores `bytes` under `url`, replacing any previous content.
    pub fn insert(&self, url: impl Into<String>, bytes: Vec<u8>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), bytes);
    }

    /// Total fetches served or refused so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetSource for MemoryAssetSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                url: url.to_owned(),
            })
    }
}
