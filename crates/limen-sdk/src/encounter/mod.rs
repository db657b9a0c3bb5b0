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

//! Enemies and their behaviour graphs.
//!
//! Each archetype is a small state machine owned by exactly one instance.
//! Instances are created when a loop mounts and dropped when it unmounts,
//! so nothing carries over between loops or lives.

mod body;
mod cadence;
mod jumpscare;
mod sitter;
mod stalker;

pub use body::EnemyBody;
pub use cadence::FootstepCadence;
pub use jumpscare::Jumpscare;
pub use sitter::{Sitter, SitterState};
pub use stalker::{Stalker, StalkerState};

use crate::config::GameConfig;
use crate::context::FrameContext;

/// Enemy archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterKind {
    /// [`Sitter`].
    Sitter,
    /// [`Stalker`].
    Stalker,
}

/// One live enemy of either archetype.
pub enum Encounter {
    /// The man in the chair.
    Sitter(Sitter),
    /// The man behind you.
    Stalker(Stalker),
}

impl Encounter {
    /// A fresh instance of `kind`, named after the scene config.
    pub fn new(kind: EncounterKind, config: &GameConfig) -> Self {
        match kind {
            EncounterKind::Sitter => {
                Encounter::Sitter(Sitter::new(&config.scene.sitter, &config.sitter))
            }
            EncounterKind::Stalker => {
                Encounter::Stalker(Stalker::new(&config.scene.stalker, &config.stalker))
            }
        }
    }

    /// Which archetype this is.
    pub fn kind(&self) -> EncounterKind {
        match self {
            Encounter::Sitter(_) => EncounterKind::Sitter,
            Encounter::Stalker(_) => EncounterKind::Stalker,
        }
    }

    /// Where the enemy is.
    pub fn body(&self) -> &EnemyBody {
        match self {
            Encounter::Sitter(s) => s.body(),
            Encounter::Stalker(s) => s.body(),
        }
    }

    /// Whether the enemy got the player.
    pub fn has_struck(&self) -> bool {
        match self {
            Encounter::Sitter(s) => s.state() == SitterState::Jumpscare,
            Encounter::Stalker(s) => s.state() == StalkerState::Jumpscare,
        }
    }

    /// Animation clip of the current phase.
    pub fn clip(&self) -> &'static str {
        match self {
            Encounter::Sitter(s) => s.state().clip(),
            Encounter::Stalker(s) => s.state().clip(),
        }
    }

    /// Puts the enemy in the scene.
    pub fn spawn(&mut self, ctx: &mut FrameContext<'_>) {
        log::info!("Spawning {:?} '{}'", self.kind(), self.body().name());
        match self {
            Encounter::Sitter(s) => s.spawn(ctx),
            Encounter::Stalker(s) => s.spawn(ctx),
        }
    }

    /// Runs one tick.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        match self {
            Encounter::Sitter(s) => s.tick(ctx),
            Encounter::Stalker(s) => s.tick(ctx),
        }
    }

    /// Takes the enemy out of the scene.
    pub fn despawn(&mut self, ctx: &mut FrameContext<'_>) {
        match self {
            Encounter::Sitter(s) => s.despawn(ctx),
            Encounter::Stalker(s) => s.despawn(ctx),
        }
    }
}
