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

//! Provides the 3D math primitives used by the game systems.
//!
//! Vectors, quaternions and 4x4 matrices, plus an [`AffineTransform`] wrapper
//! for world transforms of scene anchors (doors, enemies, the listener).
//!
//! All angular functions in this module operate in **radians**.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;

// --- Declare Sub-Modules ---

pub mod affine_transform;
pub mod matrix;
pub mod quaternion;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::affine_transform::AffineTransform;
pub use self::matrix::Mat4;
pub use self::quaternion::Quaternion;
pub use self::vector::{Vec3, Vec4};

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Hermite smoothstep of `t`, clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Yaw angle (rotation about +Y) that makes a `-Z`-forward camera look along
/// `direction`, ignoring its vertical component.
///
/// Matches the convention `yaw = atan2(-dir.x, -dir.z)`, so a camera with this
/// yaw faces `direction`.
#[inline]
pub fn yaw_towards(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Yaw angle that rotates a `+Z`-forward model to face `direction`.
#[inline]
pub fn heading_yaw(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn smoothstep_is_clamped_and_symmetric() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(2.0), 1.0);
        assert_abs_diff_eq!(smoothstep(0.5), 0.5, epsilon = EPSILON);
    }

    #[test]
    fn camera_yaw_faces_direction() {
        // A -Z forward camera already looks down -Z at yaw 0.
        assert_abs_diff_eq!(yaw_towards(Vec3::new(0.0, 0.0, -1.0)), 0.0, epsilon = EPSILON);
        // Looking down +X needs a -90 degree turn.
        assert_abs_diff_eq!(yaw_towards(Vec3::X), -FRAC_PI_2, epsilon = EPSILON);
    }

    #[test]
    fn model_heading_faces_direction() {
        assert_abs_diff_eq!(heading_yaw(Vec3::Z), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(heading_yaw(Vec3::X), FRAC_PI_2, epsilon = EPSILON);
    }
}
