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

//! # Limen Core
//!
//! Foundational crate containing math primitives, the simulation clock and
//! scheduler, and the interface contracts (audio device, asset source, command
//! queue) that the rest of the workspace is built against.
//!
//! Nothing in here knows about loops, doors or enemies.

#![warn(missing_docs)]

pub mod asset;
pub mod audio;
pub mod clock;
pub mod command;
pub mod liveness;
pub mod math;

pub use clock::{SimClock, TimerId, Timers};
pub use command::CommandQueue;
pub use liveness::Liveness;
