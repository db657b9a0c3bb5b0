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

//! The door-to-door relocation at the heart of the looping corridor.

use crate::scene::SceneQuery;
use limen_core::math::{yaw_towards, AffineTransform, Quaternion, Vec3};

/// Where a teleport puts the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportTarget {
    /// Ground-plane target; `y` is meaningless, height is kept by the
    /// camera layer.
    pub position: Vec3,
    /// Camera yaw that looks towards the start door.
    pub yaw: f32,
}

/// Frame of a door without its swing: the world transform with the local
/// yaw undone.
pub fn door_frame(scene: &dyn SceneQuery, name: &str) -> Option<AffineTransform> {
    let world = scene.world_transform(name)?;
    let yaw = scene.local_yaw(name).unwrap_or(0.0);
    Some(world * AffineTransform::from_rotation(Quaternion::from_yaw(-yaw)))
}

/// Moves `player` from near the door framed by `end` to the same spot
/// relative to the door framed by `start`.
///
/// The player's offset from the end door is taken on the door's ground
/// plane (side offset and depth, no height) and replayed through the start
/// door's frame, so the approach line carries over. The yaw faces the start
/// door from the target; when the target sits on the door itself it faces
/// along the door's local X axis.
///
/// Returns `None` when `end` cannot be inverted.
pub fn teleport_target(
    end: &AffineTransform,
    start: &AffineTransform,
    player: Vec3,
) -> Option<TeleportTarget> {
    let local = end.inverse()?.transform_point(player).with_y(0.0);
    let position = start.transform_point(local);

    let towards_door = (start.translation() - position).flatten();
    let look = if towards_door.normalize() == Vec3::ZERO {
        start.right().flatten()
    } else {
        towards_door
    };

    Some(TeleportTarget {
        position,
        yaw: yaw_towards(look),
    })
}
