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

use super::LoadError;
use async_trait::async_trait;

/// Somewhere raw asset bytes can be fetched from.
///
/// Implementations must be cheap to share: the audio engine holds one behind
/// an `Arc` and calls it from spawned load tasks.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetches the full contents stored at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError>;
}
