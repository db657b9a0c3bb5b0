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

//! Mixer-side audio data: buses, voices, and the listener.

mod bus;
mod listener;
mod mixer;
mod voice;

pub use bus::{BusGains, SoundGroup};
pub use listener::AudioListener;
pub use mixer::MixerState;
pub use voice::{FrameRegion, GainRamp, Spatial, Voice, VoiceId};
