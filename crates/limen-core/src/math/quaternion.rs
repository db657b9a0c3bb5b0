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

//! Unit quaternions for orientations of enemies, doors and the listener.

use super::{Vec3, EPSILON};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg};

/// A rotation stored as a unit quaternion `(x, y, z, w)`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar part.
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from raw components. Does not normalize.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle_radians` around `axis`. The axis is normalized first.
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let axis = axis.normalize();
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Rotation of `yaw` radians around the world up axis.
    #[inline]
    pub fn from_yaw(yaw: f32) -> Self {
        Self::from_axis_angle(Vec3::Y, yaw)
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Returns the quaternion scaled to unit length, or identity if degenerate.
    pub fn normalize(&self) -> Self {
        let len_sq = self.dot(*self);
        if len_sq > EPSILON * EPSILON {
            *self * (1.0 / len_sq.sqrt())
        } else {
            Self::IDENTITY
        }
    }

    /// The inverse rotation. Assumes a unit quaternion.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates a vector by this quaternion.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Spherical interpolation from `start` towards `end` along the shortest arc.
    ///
    /// `t` is clamped to `[0, 1]`. Nearly parallel inputs fall back to a
    /// normalized linear blend.
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut cos_theta = start.dot(end);
        let mut end = end;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end = -end;
        }

        if cos_theta > 1.0 - EPSILON {
            return (start * (1.0 - t) + end * t).normalize();
        }

        let angle = cos_theta.acos();
        let inv_sin = 1.0 / angle.sin();
        start * (((1.0 - t) * angle).sin() * inv_sin) + end * ((t * angle).sin() * inv_sin)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Hamilton product: `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vec3(rhs)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Add for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FRAC_PI_2, PI};
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-4);
    }

    #[test]
    fn yaw_rotates_forward_axis() {
        let q = Quaternion::from_yaw(FRAC_PI_2);
        assert_vec_eq(q * Vec3::Z, Vec3::X);
        assert_vec_eq(q * Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn conjugate_undoes_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, 0.5), 1.1);
        let v = Vec3::new(0.3, -2.0, 4.0);
        assert_vec_eq(q.conjugate() * (q * v), v);
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_yaw(PI / 2.0);
        assert_vec_eq(Quaternion::slerp(a, b, 0.0) * Vec3::Z, Vec3::Z);
        assert_vec_eq(Quaternion::slerp(a, b, 1.0) * Vec3::Z, Vec3::X);
        let half = Quaternion::slerp(a, b, 0.5) * Vec3::Z;
        let s = (PI / 4.0).sin();
        assert_vec_eq(half, Vec3::new(s, 0.0, s));
    }

    #[test]
    fn product_composes_rotations() {
        let a = Quaternion::from_yaw(0.4);
        let b = Quaternion::from_yaw(0.6);
        assert_vec_eq((a * b) * Vec3::Z, Quaternion::from_yaw(1.0) * Vec3::Z);
    }
}
