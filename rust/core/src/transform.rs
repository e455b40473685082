// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Affine transforms for instanced geometry
//!
//! Stored as a 4x4 matrix whose columns are the world-space directions of the
//! local axes plus the origin.

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Affine 3D map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformRepr", into = "TransformRepr")]
pub struct Transform {
    matrix: Matrix4<f64>,
}

/// Snapshot layout: origin plus the three basis vectors
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TransformRepr {
    origin: Point3<f64>,
    basis_x: Vector3<f64>,
    basis_y: Vector3<f64>,
    basis_z: Vector3<f64>,
}

impl From<TransformRepr> for Transform {
    fn from(repr: TransformRepr) -> Self {
        Transform::from_basis(repr.origin, repr.basis_x, repr.basis_y, repr.basis_z)
    }
}

impl From<Transform> for TransformRepr {
    fn from(t: Transform) -> Self {
        TransformRepr {
            origin: t.origin(),
            basis_x: t.matrix.fixed_view::<3, 1>(0, 0).into_owned(),
            basis_y: t.matrix.fixed_view::<3, 1>(0, 1).into_owned(),
            basis_z: t.matrix.fixed_view::<3, 1>(0, 2).into_owned(),
        }
    }
}

impl Transform {
    #[inline]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    #[inline]
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    #[rustfmt::skip]
    pub fn from_basis(
        origin: Point3<f64>,
        basis_x: Vector3<f64>,
        basis_y: Vector3<f64>,
        basis_z: Vector3<f64>,
    ) -> Self {
        // Column-major constructor takes rows
        Self {
            matrix: Matrix4::new(
                basis_x.x, basis_y.x, basis_z.x, origin.x,
                basis_x.y, basis_y.y, basis_z.y, origin.y,
                basis_x.z, basis_y.z, basis_z.z, origin.z,
                0.0, 0.0, 0.0, 1.0,
            ),
        }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_basis(
            Point3::new(x, y, z),
            Vector3::x(),
            Vector3::y(),
            Vector3::z(),
        )
    }

    /// Rotation about the Z axis by `angle` radians
    pub fn rotation_z(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_basis(
            Point3::origin(),
            Vector3::new(cos, sin, 0.0),
            Vector3::new(-sin, cos, 0.0),
            Vector3::z(),
        )
    }

    pub fn uniform_scale(factor: f64) -> Self {
        Self::from_matrix(Matrix4::new_scaling(factor))
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn origin(&self) -> Point3<f64> {
        Point3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }

    /// `self * inner`: maps a point through `inner` first, then through `self`
    #[inline]
    pub fn compose(&self, inner: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * inner.matrix,
        }
    }

    #[inline]
    pub fn of_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
