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

//! The closed set of commands the game publishes to the presentation layer.

use crate::subtitle::{SubtitleCue, SubtitleOptions};
use limen_core::math::Vec3;

/// A forward walk performed on the player's behalf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedMove {
    /// How long the walk takes.
    pub duration_secs: f32,
    /// How far the player is carried along the view direction.
    pub distance: f32,
    /// Whether mouse-look is disabled during the walk.
    pub lock_look: bool,
    /// A point the camera turns towards while walking.
    pub look_at: Option<Vec3>,
    /// Turn rate towards `look_at`.
    pub look_slerp: Option<f32>,
    /// Delay before the walk starts.
    pub move_delay_secs: f32,
}

impl ScriptedMove {
    /// A plain walk of `distance` over `duration_secs`.
    pub fn walk(duration_secs: f32, distance: f32) -> Self {
        Self {
            duration_secs,
            distance,
            lock_look: false,
            look_at: None,
            look_slerp: None,
            move_delay_secs: 0.0,
        }
    }
}

/// Everything the game asks of the camera, input, render and UI layers, and
/// the few signals those layers send back in.
///
/// Published into a [`limen_core::CommandQueue`] and drained once per tick,
/// so consumers see commands in publish order.
#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    /// The start door began opening.
    DoorOpened,
    /// The current loop is done; the end door may be used.
    UnlockEndDoor,
    /// Walk the player forward.
    ScriptedMove(ScriptedMove),
    /// Move the player on the ground plane and set their yaw.
    TeleportTo {
        /// Target world X.
        x: f32,
        /// Target world Z.
        z: f32,
        /// Keep the current camera height.
        keep_y: bool,
        /// Camera yaw after the move.
        yaw: f32,
    },
    /// Turn the camera towards a point.
    CameraLookAt(Vec3),
    /// Start the radio narration.
    RadioStart,
    /// A radio narration subtitle.
    RadioSubtitle {
        /// Text to show.
        text: String,
        /// Layout and timing.
        options: SubtitleOptions,
        /// Whether to append to the current subtitle.
        append: bool,
    },
    /// The radio narration ran to its end.
    RadioNarrationEnd,
    /// The first user gesture happened; audio may start.
    ResumeAudio,
    /// Pin the camera at `position`, looking at `look_at`.
    CameraLock {
        /// Camera position.
        position: Vec3,
        /// Point the camera looks at.
        look_at: Vec3,
    },
    /// A non-radio subtitle.
    Subtitle(SubtitleCue),
}

impl GameCommand {
    /// The radio subtitle for `cue`.
    pub fn radio_subtitle(cue: SubtitleCue) -> Self {
        GameCommand::RadioSubtitle {
            text: cue.text,
            options: cue.options,
            append: cue.append,
        }
    }

    /// Stable kebab-case name of the command kind, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameCommand::DoorOpened => "door-opened",
            GameCommand::UnlockEndDoor => "unlock-end-door",
            GameCommand::ScriptedMove(_) => "scripted-move",
            GameCommand::TeleportTo { .. } => "teleport-to",
            GameCommand::CameraLookAt(_) => "camera-look-at",
            GameCommand::RadioStart => "radio-start",
            GameCommand::RadioSubtitle { .. } => "radio-subtitle",
            GameCommand::RadioNarrationEnd => "radio-narration-end",
            GameCommand::ResumeAudio => "resume-audio",
            GameCommand::CameraLock { .. } => "camera-lock",
            GameCommand::Subtitle(_) => "subtitle",
        }
    }
}
