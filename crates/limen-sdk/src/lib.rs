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

//! # Limen SDK
//!
//! The game layer of Limen. It owns everything that knows about loops,
//! doors and enemies: the [`Game`] tick driver, loop orchestration, the
//! encounter state machines, the portal doors, the radio narration and the
//! typed [`GameCommand`] set handed to the presentation layer.
//!
//! The presentation layer (camera, rendering, UI) stays outside. It reports
//! the player pose and raw input once per frame, exposes the level through
//! [`SceneQuery`], and consumes the commands each tick returns.

#![warn(missing_docs)]

pub mod ambience;
pub mod command;
pub mod config;
pub mod context;
pub mod encounter;
pub mod game;
pub mod load_tracker;
pub mod loops;
pub mod portal;
pub mod scene;
pub mod subtitle;

pub use command::{GameCommand, ScriptedMove};
pub use config::{ConfigError, GameConfig};
pub use context::{FrameContext, GameEvent};
pub use game::Game;
pub use loops::{BehaviorFactory, LoopBehavior, LoopKind, LoopOrchestrator, LoopRegistry};
pub use scene::{SceneQuery, StaticScene};
pub use subtitle::{SubtitleCue, SubtitleOptions};

/// The types most hosts need.
pub mod prelude {
    pub use crate::{
        BehaviorFactory, FrameContext, Game, GameCommand, GameConfig, LoopBehavior, LoopKind,
        LoopRegistry, SceneQuery, StaticScene,
    };
    pub use limen_agents::audio_agent::{AudioEngine, AudioEngineOptions, SoundGroup};
    pub use limen_core::math::{AffineTransform, Quaternion, Vec3};
    pub use limen_data::state::{InputCollector, InputSnapshot, PlayerPose};
}
