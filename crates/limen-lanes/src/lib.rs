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

//! # Limen Lanes
//!
//! The hot paths of the audio stack: the bus mixer that renders every voice
//! into the device buffer, the decoders that turn fetched bytes into
//! [`SoundData`](limen_data::assets::SoundData), and a small tone synthesizer.
//!
//! Lanes are stateless; all state lives in `limen-data` types passed in.

#![warn(missing_docs)]

pub mod asset_lane;
pub mod audio_lane;
