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

//! World transforms of scene anchors.

use super::{Mat4, Quaternion, Vec3};
use std::ops::Mul;

/// Represents a 3D affine transformation (translation, rotation, scale).
///
/// A semantic wrapper around a [`Mat4`] whose bottom row is `(0, 0, 0, 1)`.
/// Scene objects report their world transform in this form, which may include
/// mirroring scale when content is authored that way.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AffineTransform(pub Mat4);

impl AffineTransform {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    /// Creates an `AffineTransform` from a translation vector.
    ///
    /// ```rust
    /// use limen_core::math::{AffineTransform, Vec3};
    ///
    /// let transform = AffineTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
    /// ```
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self(Mat4::from_translation(v))
    }

    /// Creates an `AffineTransform` from a non-uniform scale vector.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self(Mat4::from_scale(scale))
    }

    /// Creates an `AffineTransform` from a rotation.
    #[inline]
    pub fn from_rotation(rotation: Quaternion) -> Self {
        Self(Mat4::from_quat(rotation))
    }

    /// Translation followed by a rotation about the local origin.
    pub fn from_translation_rotation(translation: Vec3, rotation: Quaternion) -> Self {
        Self::from_translation(translation) * Self::from_rotation(rotation)
    }

    /// Translation plus a yaw about the world up axis.
    pub fn from_translation_yaw(translation: Vec3, yaw: f32) -> Self {
        Self::from_translation_rotation(translation, Quaternion::from_yaw(yaw))
    }

    /// The translation component.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.0.cols[3].truncate()
    }

    /// The transformed local X axis (not normalized when scaled).
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.0.cols[0].truncate()
    }

    /// The transformed local Z axis (not normalized when scaled).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.0.cols[2].truncate()
    }

    /// Maps a local point to world space.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.0.transform_point(p)
    }

    /// Maps a local direction to world space.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.0.transform_vector(v)
    }

    /// The inverse transform, or `None` for a degenerate (zero-scale) transform.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.0.affine_inverse().map(Self)
    }
}

impl Mul for AffineTransform {
    type Output = Self;
    /// `self * rhs` applies `rhs` first.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_abs_diff_eq;

    #[test]
    fn yawed_transform_maps_local_forward() {
        let t = AffineTransform::from_translation_yaw(Vec3::new(1.0, 0.0, 1.0), FRAC_PI_2);
        let p = t.transform_point(Vec3::Z);
        assert_abs_diff_eq!(p.x, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn inverse_brings_world_point_home() {
        let t = AffineTransform::from_translation_yaw(Vec3::new(-3.0, 1.0, 6.0), 1.3);
        let local = Vec3::new(0.5, 0.0, -1.0);
        let world = t.transform_point(local);
        let back = t.inverse().expect("rigid transforms invert").transform_point(world);
        assert_abs_diff_eq!(back.x, local.x, epsilon = 1e-4);
        assert_abs_diff_eq!(back.y, local.y, epsilon = 1e-4);
        assert_abs_diff_eq!(back.z, local.z, epsilon = 1e-4);
    }
}
