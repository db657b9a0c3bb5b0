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

//! The built-in loop kinds and the behaviour they build.

use super::behavior::{BehaviorFactory, LoopBehavior};
use super::scripts::{
    BloodyLoop, CryingWifeLoop, FallenObjectsLoop, FlickeringLightsLoop, IntroLoop, NormalLoop,
    PianoPuzzleLoop, RadioPuzzleLoop, SitterEncounterLoop,
};
use crate::config::GameConfig;
use crate::context::{mount_rng, FrameContext};
use limen_data::state::MountKey;

const STALKER_SALT: u64 = 0x57A1_4E52;

/// One of the built-in loop scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    /// Quiet house, ambient music.
    Intro,
    /// Tune the radio.
    RadioPuzzle,
    /// Unsteady lights.
    FlickeringLights,
    /// Play the melody.
    PianoPuzzle,
    /// The crying wife.
    CryingWife,
    /// Nothing, or a stalker.
    Normal,
    /// Knocked-over furniture.
    FallenObjects,
    /// Blood on the walls.
    Bloody,
    /// The man in the chair.
    SitterEncounter,
}

impl LoopKind {
    /// The shipped loop order, starting at index 0.
    pub const DEFAULT_ORDER: [LoopKind; 9] = [
        LoopKind::Intro,
        LoopKind::RadioPuzzle,
        LoopKind::FlickeringLights,
        LoopKind::PianoPuzzle,
        LoopKind::CryingWife,
        LoopKind::Normal,
        LoopKind::FallenObjects,
        LoopKind::Normal,
        LoopKind::SitterEncounter,
    ];

    /// Name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            LoopKind::Intro => "Intro",
            LoopKind::RadioPuzzle => "RadioPuzzle",
            LoopKind::FlickeringLights => "FlickeringLights",
            LoopKind::PianoPuzzle => "PianoPuzzle",
            LoopKind::CryingWife => "CryingWife",
            LoopKind::Normal => "Normal",
            LoopKind::FallenObjects => "FallenObjects",
            LoopKind::Bloody => "Bloody",
            LoopKind::SitterEncounter => "SitterEncounter",
        }
    }
}

/// A mounted built-in loop.
pub enum ActiveLoop {
    /// See [`LoopKind::Intro`].
    Intro(IntroLoop),
    /// See [`LoopKind::RadioPuzzle`].
    RadioPuzzle(RadioPuzzleLoop),
    /// See [`LoopKind::FlickeringLights`].
    FlickeringLights(FlickeringLightsLoop),
    /// See [`LoopKind::PianoPuzzle`].
    PianoPuzzle(PianoPuzzleLoop),
    /// See [`LoopKind::CryingWife`].
    CryingWife(CryingWifeLoop),
    /// See [`LoopKind::Normal`].
    Normal(NormalLoop),
    /// See [`LoopKind::FallenObjects`].
    FallenObjects(FallenObjectsLoop),
    /// See [`LoopKind::Bloody`].
    Bloody(BloodyLoop),
    /// See [`LoopKind::SitterEncounter`].
    SitterEncounter(SitterEncounterLoop),
}

impl ActiveLoop {
    fn as_behavior(&mut self) -> &mut dyn LoopBehavior {
        match self {
            ActiveLoop::Intro(b) => b,
            ActiveLoop::RadioPuzzle(b) => b,
            ActiveLoop::FlickeringLights(b) => b,
            ActiveLoop::PianoPuzzle(b) => b,
            ActiveLoop::CryingWife(b) => b,
            ActiveLoop::Normal(b) => b,
            ActiveLoop::FallenObjects(b) => b,
            ActiveLoop::Bloody(b) => b,
            ActiveLoop::SitterEncounter(b) => b,
        }
    }
}

impl LoopBehavior for ActiveLoop {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        self.as_behavior().on_enter(ctx);
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        self.as_behavior().on_tick(ctx);
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        self.as_behavior().on_exit(ctx);
    }
}

impl BehaviorFactory for LoopKind {
    type Behavior = ActiveLoop;

    fn create(&self, config: &GameConfig, key: MountKey) -> ActiveLoop {
        match self {
            LoopKind::Intro => ActiveLoop::Intro(IntroLoop::new()),
            LoopKind::RadioPuzzle => ActiveLoop::RadioPuzzle(RadioPuzzleLoop::new()),
            LoopKind::FlickeringLights => ActiveLoop::FlickeringLights(FlickeringLightsLoop::new()),
            LoopKind::PianoPuzzle => ActiveLoop::PianoPuzzle(PianoPuzzleLoop::new()),
            LoopKind::CryingWife => ActiveLoop::CryingWife(CryingWifeLoop::new()),
            LoopKind::Normal => {
                let mut rng = mount_rng(config.rng_seed, key, STALKER_SALT);
                ActiveLoop::Normal(NormalLoop::new(config, &mut rng))
            }
            LoopKind::FallenObjects => ActiveLoop::FallenObjects(FallenObjectsLoop::new()),
            LoopKind::Bloody => ActiveLoop::Bloody(BloodyLoop::new()),
            LoopKind::SitterEncounter => {
                ActiveLoop::SitterEncounter(SitterEncounterLoop::new(config))
            }
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}
