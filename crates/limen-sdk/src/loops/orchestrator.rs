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

//! Mounting and unmounting loop content as the run progresses.

use super::behavior::{BehaviorFactory, LoopBehavior};
use super::kind::LoopKind;
use super::registry::LoopRegistry;
use crate::context::FrameContext;
use limen_data::state::MountKey;

struct Mounted<B> {
    key: MountKey,
    name: String,
    behavior: B,
}

/// Keeps exactly the behaviour of the current `(loop, respawn generation)`
/// mounted.
///
/// Whenever the key changes the old instance is exited and dropped before a
/// new one is created and entered, so no instance ever sees a later loop or
/// a later life. Before the run starts, and for indices with nothing
/// registered, nothing is mounted.
pub struct LoopOrchestrator<F: BehaviorFactory = LoopKind> {
    registry: LoopRegistry<F>,
    mounted: Option<Mounted<F::Behavior>>,
    synced: Option<MountKey>,
}

impl<F: BehaviorFactory> LoopOrchestrator<F> {
    /// An orchestrator over `registry` with nothing mounted.
    pub fn new(registry: LoopRegistry<F>) -> Self {
        Self {
            registry,
            mounted: None,
            synced: None,
        }
    }

    /// The factory table.
    pub fn registry(&self) -> &LoopRegistry<F> {
        &self.registry
    }

    /// The factory table, for live registration. Changes take effect at the
    /// next mount.
    pub fn registry_mut(&mut self) -> &mut LoopRegistry<F> {
        &mut self.registry
    }

    /// Key of the mounted behaviour.
    pub fn mounted_key(&self) -> Option<MountKey> {
        self.mounted.as_ref().map(|m| m.key)
    }

    /// The mounted behaviour.
    pub fn mounted(&self) -> Option<&F::Behavior> {
        self.mounted.as_ref().map(|m| &m.behavior)
    }

    /// Remounts if the run's mount key changed since the last call.
    pub fn sync(&mut self, ctx: &mut FrameContext<'_>) {
        let key = ctx.run.mount_key();
        if self.synced == Some(key) {
            return;
        }
        self.synced = Some(key);
        self.unmount(ctx);

        if !ctx.run.is_started() {
            return;
        }
        let Some(factory) = self.registry.get(key.loop_index) else {
            log::warn!(
                "No loop registered for index {} (generation {}), nothing mounted",
                key.loop_index,
                key.respawn_generation
            );
            return;
        };

        let name = factory.name().to_owned();
        let mut behavior = factory.create(ctx.config, key);
        log::info!(
            "Mounting loop {} '{name}' (generation {})",
            key.loop_index,
            key.respawn_generation
        );
        behavior.on_enter(ctx);
        self.mounted = Some(Mounted { key, name, behavior });
    }

    /// Ticks the mounted behaviour.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        if let Some(mounted) = &mut self.mounted {
            mounted.behavior.on_tick(ctx);
        }
    }

    /// Exits and drops the mounted behaviour, if any.
    pub fn unmount(&mut self, ctx: &mut FrameContext<'_>) {
        if let Some(mut mounted) = self.mounted.take() {
            log::info!(
                "Unmounting loop {} '{}'",
                mounted.key.loop_index,
                mounted.name
            );
            mounted.behavior.on_exit(ctx);
        }
    }
}
