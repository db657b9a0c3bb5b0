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

//! # Limen Data
//!
//! Plain data shared by the lanes, agents and game layer: decoded sound
//! buffers and their cache, the mixer's voice and bus state, the process-wide
//! [`RunState`](state::RunState), and per-tick input snapshots.

#![warn(missing_docs)]

pub mod assets;
pub mod audio;
pub mod state;
