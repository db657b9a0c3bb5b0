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

use limen_core::math::{Vec3, EPSILON};

/// The point of audition: where the player's ears are and which way is right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioListener {
    /// World position of the listener.
    pub position: Vec3,
    /// Unit vector pointing to the listener's right.
    pub right: Vec3,
}

impl AudioListener {
    /// A listener at `position` facing `forward` with world up as +Y.
    pub fn from_pose(position: Vec3, forward: Vec3) -> Self {
        let mut right = forward.cross(Vec3::Y).normalize();
        if right.length_squared() < EPSILON {
            right = Vec3::X;
        }
        Self { position, right }
    }

    /// Equal-power pan in `[0, 1]` (0 = left, 1 = right) for a source at `source`.
    pub fn pan_towards(&self, source: Vec3) -> f32 {
        let to_source = source - self.position;
        if to_source.length() <= 0.001 {
            return 0.5;
        }
        (to_source.normalize().dot(self.right) + 1.0) * 0.5
    }
}

impl Default for AudioListener {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            right: Vec3::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn right_vector_of_default_camera_is_plus_x() {
        let listener = AudioListener::from_pose(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_abs_diff_eq!(listener.right.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(listener.pan_towards(Vec3::new(5.0, 0.0, 0.0)), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(listener.pan_towards(Vec3::new(-5.0, 0.0, 0.0)), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn coincident_source_is_centered() {
        let listener = AudioListener::default();
        assert_eq!(listener.pan_towards(Vec3::ZERO), 0.5);
    }
}
