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

//! Where an enemy is and how it is shown in the scene.

use crate::context::FrameContext;
use limen_core::math::{Quaternion, Vec3};

/// Position and orientation of one enemy, mirrored into the scene as a
/// runtime actor.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBody {
    name: String,
    /// World position of the feet.
    pub position: Vec3,
    /// World orientation; local +Z is the facing.
    pub rotation: Quaternion,
}

impl EnemyBody {
    /// A body called `name` at `position`, facing `yaw`.
    pub fn new(name: &str, position: Vec3, yaw: f32) -> Self {
        Self {
            name: name.to_owned(),
            position,
            rotation: Quaternion::from_yaw(yaw),
        }
    }

    /// Actor name in the scene.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A point given in the body's frame, in world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Turns a fraction `factor` of the way towards facing `direction` on
    /// the ground plane.
    pub fn turn_towards(&mut self, direction: Vec3, factor: f32) {
        let flat = direction.flatten();
        if flat == Vec3::ZERO {
            return;
        }
        let target = Quaternion::from_yaw(limen_core::math::heading_yaw(flat));
        self.rotation = Quaternion::slerp(self.rotation, target, factor).normalize();
    }

    /// Writes the body into the scene.
    pub fn sync(&self, ctx: &mut FrameContext<'_>) {
        ctx.scene.place_actor(&self.name, self.position, self.rotation);
    }

    /// Takes the body out of the scene.
    pub fn remove(&self, ctx: &mut FrameContext<'_>) {
        if !ctx.scene.remove_actor(&self.name) {
            log::debug!("Actor '{}' was already gone", self.name);
        }
    }
}
