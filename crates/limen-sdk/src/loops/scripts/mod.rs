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

//! The built-in loop content.

mod bloody;
mod crying_wife;
mod fallen_objects;
mod flicker;
mod intro;
mod normal;
mod piano;
mod radio;
mod sitter_encounter;

pub use bloody::BloodyLoop;
pub use crying_wife::CryingWifeLoop;
pub use fallen_objects::FallenObjectsLoop;
pub use flicker::{fnv1a, FlickeringLightsLoop};
pub use intro::IntroLoop;
pub use normal::NormalLoop;
pub use piano::{PianoPhase, PianoPuzzleLoop};
pub use radio::RadioPuzzleLoop;
pub use sitter_encounter::SitterEncounterLoop;

use crate::command::GameCommand;
use crate::context::FrameContext;

/// Lets the player through the end door.
fn unlock_end_door(ctx: &FrameContext<'_>, loop_name: &str) {
    log::info!("{loop_name}: end door unlocked");
    ctx.publish(GameCommand::UnlockEndDoor);
}

/// Shows or hides every object in `names`, warning about missing ones.
fn show_all(ctx: &mut FrameContext<'_>, names: &[String], visible: bool) {
    for name in names {
        ctx.show(name, visible);
    }
}
