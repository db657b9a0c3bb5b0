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

//! The lifecycle contract of loop content.

use crate::config::GameConfig;
use crate::context::FrameContext;
use limen_data::state::MountKey;

/// Content bound to one loop.
///
/// A behaviour instance lives for exactly one mount: it is created, entered,
/// ticked until its mount key changes, exited and dropped. Anything it
/// schedules or loads must be owned by the instance so it dies with it.
pub trait LoopBehavior {
    /// Called once after creation.
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>);

    /// Called every tick while mounted.
    fn on_tick(&mut self, ctx: &mut FrameContext<'_>);

    /// Called once before the instance is dropped.
    fn on_exit(&mut self, ctx: &mut FrameContext<'_>);
}

/// Builds fresh behaviour instances for a registry entry.
pub trait BehaviorFactory {
    /// What this factory builds.
    type Behavior: LoopBehavior;

    /// A new instance for the mount `key`.
    fn create(&self, config: &GameConfig, key: MountKey) -> Self::Behavior;

    /// Name used in logs.
    fn name(&self) -> &str;
}
