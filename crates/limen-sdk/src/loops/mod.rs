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

//! Loop content and its lifecycle.
//!
//! Each loop index maps to a factory in a [`LoopRegistry`]. The
//! [`LoopOrchestrator`] mounts a fresh behaviour whenever the run's mount key
//! changes and tears the previous one down first.

pub mod behavior;
pub mod kind;
pub mod orchestrator;
pub mod registry;
pub mod scripts;

pub use behavior::{BehaviorFactory, LoopBehavior};
pub use kind::{ActiveLoop, LoopKind};
pub use orchestrator::LoopOrchestrator;
pub use registry::LoopRegistry;
