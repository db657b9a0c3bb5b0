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

use limen_core::math::Vec3;

/// Where the camera is and where it looks, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    /// Camera world position.
    pub position: Vec3,
    /// Camera forward direction (unit length).
    pub forward: Vec3,
}

impl PlayerPose {
    /// A pose at `position` looking along `forward`.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let forward = forward.normalize();
        Self {
            position,
            forward: if forward == Vec3::ZERO {
                Vec3::new(0.0, 0.0, -1.0)
            } else {
                forward
            },
        }
    }

    /// How directly the camera looks at `target`: the dot product of the
    /// forward vector with the unit direction to it, in `[-1, 1]`.
    pub fn gaze_dot(&self, target: Vec3) -> f32 {
        self.forward.dot((target - self.position).normalize())
    }
}

impl Default for PlayerPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gaze_dot_is_one_when_looking_straight_at_target() {
        let pose = PlayerPose::new(Vec3::ZERO, Vec3::Z);
        assert_abs_diff_eq!(pose.gaze_dot(Vec3::new(0.0, 0.0, 5.0)), 1.0, epsilon = 1e-6);
        assert!(pose.gaze_dot(Vec3::new(0.0, 0.0, -5.0)) < -0.99);
    }
}
