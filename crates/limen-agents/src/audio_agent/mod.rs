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

//! The agent responsible for everything audible.
//!
//! [`AudioEngine`] is the game-facing API: it binds sound names to decoded
//! buffers, turns play requests into mixer voices, tracks the single music
//! track and the registry of named loops, and hands the mixer to the device.

mod engine;
mod footstep;
mod loops;
mod music;
mod options;

pub use engine::{AudioEngine, VoiceInfo};
pub use loops::LoopHandle;
pub use options::{AudioEngineOptions, MusicOptions, PlayOptions, Segment, SpatialOptions};

pub use limen_data::audio::{SoundGroup, VoiceId};
