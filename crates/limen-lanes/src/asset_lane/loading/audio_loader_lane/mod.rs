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

//! Audio decoders and the dispatcher that picks one per file.

mod symphonia_loader_lane;
mod wav_loader_lane;

pub use symphonia_loader_lane::SymphoniaLoaderLane;
pub use wav_loader_lane::WavLoaderLane;

use super::{AssetLoaderLane, DecodeError};
use limen_data::assets::SoundData;

/// Decodes any supported audio file, choosing a decoder from the file
/// extension of its URL.
///
/// `.wav` goes through `hound`; everything else (and any WAV variant hound
/// rejects) goes through `symphonia`.
#[derive(Debug, Default)]
pub struct SoundLoaderLane {
    wav: WavLoaderLane,
    symphonia: SymphoniaLoaderLane,
}

impl SoundLoaderLane {
    /// Creates the dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `bytes` fetched from `url`.
    pub fn load_from(&self, url: &str, bytes: &[u8]) -> Result<SoundData, DecodeError> {
        let extension = extension_of(url);
        if extension.as_deref() == Some("wav") {
            match self.wav.load(bytes) {
                Ok(sound) => return Ok(sound),
                Err(e) => log::debug!("hound rejected '{url}' ({e}), retrying with symphonia"),
            }
        }
        self.symphonia.load_with_hint(bytes, extension.as_deref())
    }
}

fn extension_of(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_ignores_query_and_case() {
        assert_eq!(extension_of("/audio/door.WAV?v=2").as_deref(), Some("wav"));
        assert_eq!(extension_of("/audio/radio/paragraph_1.mp3").as_deref(), Some("mp3"));
        assert_eq!(extension_of("/audio/v1.2/noext"), None);
    }
}
