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

//! Column-major 4x4 matrices.

use super::{Quaternion, Vec3, Vec4, EPSILON};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// Only the affine subset is needed by the game systems: the bottom row is
/// assumed to be `(0, 0, 0, 1)` by [`Mat4::affine_inverse`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    /// The four columns of the matrix.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Builds a matrix from four columns.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// A translation matrix.
    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::from_vec3(v, 1.0);
        m
    }

    /// A non-uniform scale matrix. Negative factors mirror an axis.
    pub fn from_scale(s: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(s.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, s.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, s.z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// A rotation matrix from a unit quaternion.
    pub fn from_quat(q: Quaternion) -> Self {
        let x = q * Vec3::X;
        let y = q * Vec3::Y;
        let z = q * Vec3::Z;
        Self::from_cols(
            Vec4::from_vec3(x, 0.0),
            Vec4::from_vec3(y, 0.0),
            Vec4::from_vec3(z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Returns row `i` as a vector.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        let pick = |c: &Vec4| match i {
            0 => c.x,
            1 => c.y,
            2 => c.z,
            _ => c.w,
        };
        Vec4::new(
            pick(&self.cols[0]),
            pick(&self.cols[1]),
            pick(&self.cols[2]),
            pick(&self.cols[3]),
        )
    }

    /// Transforms a point (`w = 1`).
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).truncate()
    }

    /// Inverse of an affine matrix, or `None` if the linear part is singular.
    pub fn affine_inverse(&self) -> Option<Self> {
        let a = self.cols[0].truncate();
        let b = self.cols[1].truncate();
        let c = self.cols[2].truncate();
        let t = self.cols[3].truncate();

        // Rows of the inverse of [a b c] are the cross products over the determinant.
        let r0 = b.cross(c);
        let r1 = c.cross(a);
        let r2 = a.cross(b);
        let det = a.dot(r0);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let (r0, r1, r2) = (r0 * inv_det, r1 * inv_det, r2 * inv_det);
        let it = Vec3::new(-r0.dot(t), -r1.dot(t), -r2.dot(t));

        Some(Self::from_cols(
            Vec4::new(r0.x, r1.x, r2.x, 0.0),
            Vec4::new(r0.y, r1.y, r2.y, 0.0),
            Vec4::new(r0.z, r1.z, r2.z, 0.0),
            Vec4::from_vec3(it, 1.0),
        ))
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-4);
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn affine_inverse_round_trips_points() {
        let m = Mat4::from_translation(Vec3::new(4.0, -1.0, 2.5))
            * Mat4::from_quat(Quaternion::from_yaw(0.7))
            * Mat4::from_scale(Vec3::new(2.0, 1.0, -1.0));
        let inv = m.affine_inverse().expect("matrix is invertible");
        let p = Vec3::new(0.25, 3.0, -8.0);
        assert_vec_eq(inv.transform_point(m.transform_point(p)), p);
        assert_vec_eq((m * inv).transform_point(p), p);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(m.affine_inverse().is_none());
    }

    #[test]
    fn row_reads_across_columns() {
        let m = Mat4::from_translation(Vec3::new(7.0, 8.0, 9.0));
        assert_eq!(m.row(0), Vec4::new(1.0, 0.0, 0.0, 7.0));
    }
}
