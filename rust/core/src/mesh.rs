// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Triangle mesh
///
/// Positions stay in f64 so the exported coordinates keep all twelve
/// fractional digits. Triangle indices are 0-based into `points`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions
    pub points: Vec<Point3<f64>>,
    /// Triangle indices (i0, i1, i2)
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Add a vertex and return its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.points.push(position);
        (self.points.len() - 1) as u32
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.triangles.push([i0, i1, i2]);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when every index refers to a point of this mesh
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.points.len() as u64;
        self.triangles
            .iter()
            .all(|t| t.iter().all(|&i| (i as u64) < count))
    }

    /// This mesh with every point mapped through `transform`
    pub fn transformed(mut self, transform: &Transform) -> Mesh {
        if !transform.is_identity() {
            for p in &mut self.points {
                *p = transform.of_point(p);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_index_detected() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::origin());
        mesh.add_triangle(0, 0, 1);
        assert!(!mesh.indices_in_bounds());
    }

    #[test]
    fn test_transformed_moves_points() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0));
        let moved = mesh.transformed(&Transform::translation(1.0, 1.0, 1.0));
        assert_eq!(moved.points[0], Point3::new(2.0, 3.0, 4.0));
    }
}
