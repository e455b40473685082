// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference geometry kernel for planar B-reps
//!
//! Stands in for the host kernel when exporting scene snapshots. Faces are
//! triangulated on their own plane; solids are triangulated face by face,
//! coincident vertices are welded and the result is split into connected
//! shell components.

use bim_json_core::{Curve, Face, GeometryKernel, Mesh, Solid};
use rustc_hash::FxHashMap;

use crate::triangulation::triangulate_planar_loops;
use crate::{Error, Point3, Result};

/// Tessellation tolerances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelSettings {
    /// Maximum distance between an arc and its chords
    pub chord_tolerance: f64,
    /// Upper bound on segments per arc
    pub max_arc_segments: usize,
    /// Maximum distance of a face vertex from the face plane
    pub planarity_tolerance: f64,
}

impl Default for KernelSettings {
    fn default() -> Self {
        Self {
            chord_tolerance: 0.01,
            max_arc_segments: 256,
            planarity_tolerance: 1e-6,
        }
    }
}

/// Geometry kernel for planar faces, lines, arcs and sampled curves
#[derive(Debug, Clone, Default)]
pub struct PlanarKernel {
    settings: KernelSettings,
}

impl PlanarKernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: KernelSettings) -> Self {
        Self { settings }
    }

    fn face_mesh(&self, face: &Face) -> Result<Mesh> {
        let (points, triangles) =
            triangulate_planar_loops(&face.outer, &face.holes, self.settings.planarity_tolerance)?;
        Ok(Mesh { points, triangles })
    }

    /// Segment count keeping the sagitta under the chord tolerance
    fn arc_segments(&self, radius: f64, sweep: f64) -> usize {
        let tolerance = self.settings.chord_tolerance;
        let max = self.settings.max_arc_segments.max(1);
        if radius <= tolerance || tolerance <= 0.0 {
            return max.min(8);
        }
        // sagitta = r (1 - cos(theta / 2)) <= tolerance
        let step = 2.0 * (1.0 - tolerance / radius).acos();
        if !step.is_finite() || step <= 0.0 {
            return max;
        }
        ((sweep.abs() / step).ceil() as usize).clamp(1, max)
    }
}

/// Quantized key for welding coincident vertices
fn weld_key(p: &Point3<f64>) -> [u64; 3] {
    // Normalise -0.0 so both zeros weld together
    let bits = |v: f64| if v == 0.0 { 0u64 } else { v.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}

/// Union-find root with path halving
fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Split a welded mesh into connected components, each re-indexed from 0
fn split_shells(mesh: &Mesh) -> Vec<Mesh> {
    let mut parent: Vec<usize> = (0..mesh.points.len()).collect();
    for t in &mesh.triangles {
        let a = find(&mut parent, t[0] as usize);
        for &i in &t[1..] {
            let b = find(&mut parent, i as usize);
            if a != b {
                parent[b] = a;
            }
        }
    }

    // Every point belongs to exactly one component, so one table suffices
    let mut shell_of_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut shells: Vec<Mesh> = Vec::new();
    let mut local: Vec<Option<u32>> = vec![None; mesh.points.len()];

    for t in &mesh.triangles {
        let root = find(&mut parent, t[0] as usize);
        let shell_idx = *shell_of_root.entry(root).or_insert_with(|| {
            shells.push(Mesh::new());
            shells.len() - 1
        });

        let shell = &mut shells[shell_idx];
        let mut tri = [0u32; 3];
        for (k, &i) in t.iter().enumerate() {
            tri[k] = match local[i as usize] {
                Some(j) => j,
                None => {
                    let j = shell.add_vertex(mesh.points[i as usize]);
                    local[i as usize] = Some(j);
                    j
                }
            };
        }
        shell.add_triangle(tri[0], tri[1], tri[2]);
    }

    shells
}

impl GeometryKernel for PlanarKernel {
    fn tessellate_solid(&self, solid: &Solid) -> bim_json_core::Result<Vec<Mesh>> {
        if solid.faces.is_empty() {
            return Err(bim_json_core::Error::tessellation("solid has no faces"));
        }

        let mut welded = Mesh::new();
        let mut index: FxHashMap<[u64; 3], u32> = FxHashMap::default();

        for (face_idx, face) in solid.faces.iter().enumerate() {
            let mesh = self.face_mesh(face).map_err(|e| {
                bim_json_core::Error::tessellation(format!("face {}: {}", face_idx, e))
            })?;

            let local: Vec<u32> = mesh
                .points
                .iter()
                .map(|p| {
                    *index
                        .entry(weld_key(p))
                        .or_insert_with(|| welded.add_vertex(*p))
                })
                .collect();

            for t in &mesh.triangles {
                welded.add_triangle(
                    local[t[0] as usize],
                    local[t[1] as usize],
                    local[t[2] as usize],
                );
            }
        }

        Ok(split_shells(&welded))
    }

    fn triangulate_face(&self, face: &Face) -> bim_json_core::Result<Mesh> {
        Ok(self.face_mesh(face)?)
    }

    fn tessellate_curve(&self, curve: &Curve) -> bim_json_core::Result<Vec<Point3<f64>>> {
        match curve {
            Curve::Line { start, end } => Ok(vec![*start, *end]),
            Curve::Arc {
                center,
                radius,
                x_axis,
                y_axis,
                start_angle,
                end_angle,
            } => {
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(Error::DegenerateCurve(format!("arc radius {}", radius)).into());
                }
                let sweep = end_angle - start_angle;
                let segments = self.arc_segments(*radius, sweep);
                let points = (0..=segments)
                    .map(|i| {
                        let t = start_angle + sweep * (i as f64 / segments as f64);
                        let (sin, cos) = t.sin_cos();
                        center + (x_axis * cos + y_axis * sin) * *radius
                    })
                    .collect();
                Ok(points)
            }
            Curve::Sampled { points } => Ok(points.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bim_json_core::Vector3;
    use std::f64::consts::PI;

    #[test]
    fn box_tessellates_to_one_closed_shell() {
        let kernel = PlanarKernel::new();
        let solid = Solid::cuboid(Point3::origin(), Point3::new(1.0, 2.0, 3.0));
        let shells = kernel.tessellate_solid(&solid).unwrap();

        assert_eq!(shells.len(), 1);
        assert_eq!(shells[0].vertex_count(), 8);
        assert_eq!(shells[0].triangle_count(), 12);
        assert!(shells[0].indices_in_bounds());
    }

    #[test]
    fn disjoint_boxes_become_separate_shells() {
        let kernel = PlanarKernel::new();
        let mut solid = Solid::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let other = Solid::cuboid(Point3::new(5.0, 0.0, 0.0), Point3::new(6.0, 1.0, 1.0));
        solid.faces.extend(other.faces);

        let shells = kernel.tessellate_solid(&solid).unwrap();
        assert_eq!(shells.len(), 2);
        for shell in &shells {
            assert_eq!(shell.vertex_count(), 8);
            assert!(shell.indices_in_bounds());
        }
        assert!(shells[1].points.iter().all(|p| p.x >= 5.0));
    }

    #[test]
    fn many_disjoint_boxes_keep_local_indices() {
        let kernel = PlanarKernel::new();
        let mut solid = Solid::default();
        for i in 0..300 {
            let x = i as f64 * 2.0;
            let cube = Solid::cuboid(Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 1.0, 1.0));
            solid.faces.extend(cube.faces);
        }

        let shells = kernel.tessellate_solid(&solid).unwrap();
        assert_eq!(shells.len(), 300);
        for (i, shell) in shells.iter().enumerate() {
            let x = i as f64 * 2.0;
            assert_eq!(shell.vertex_count(), 8);
            assert_eq!(shell.triangle_count(), 12);
            assert!(shell.indices_in_bounds());
            assert!(shell.points.iter().all(|p| p.x == x || p.x == x + 1.0));
        }
    }

    #[test]
    fn non_planar_face_fails_solid() {
        let kernel = PlanarKernel::new();
        let mut solid = Solid::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        solid.faces[0].outer[1].z += 0.25;
        assert!(kernel.tessellate_solid(&solid).is_err());
        assert!(kernel.triangulate_face(&solid.faces[0]).is_err());
        assert!(kernel.triangulate_face(&solid.faces[1]).is_ok());
    }

    #[test]
    fn solid_without_faces_fails() {
        assert!(PlanarKernel::new().tessellate_solid(&Solid::default()).is_err());
    }

    #[test]
    fn arc_respects_chord_tolerance() {
        let kernel = PlanarKernel::with_settings(KernelSettings {
            chord_tolerance: 0.001,
            ..KernelSettings::default()
        });
        let arc = Curve::Arc {
            center: Point3::origin(),
            radius: 1.0,
            x_axis: Vector3::x(),
            y_axis: Vector3::y(),
            start_angle: 0.0,
            end_angle: PI,
        };
        let points = kernel.tessellate_curve(&arc).unwrap();

        assert!(points.len() > 10);
        assert_relative_eq!(points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points.last().unwrap().x, -1.0, epsilon = 1e-12);
        for p in &points {
            assert_relative_eq!((p - Point3::origin()).norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_radius_arc_fails() {
        let arc = Curve::Arc {
            center: Point3::origin(),
            radius: 0.0,
            x_axis: Vector3::x(),
            y_axis: Vector3::y(),
            start_angle: 0.0,
            end_angle: 1.0,
        };
        assert!(PlanarKernel::new().tessellate_curve(&arc).is_err());
    }

    #[test]
    fn line_tessellates_to_endpoints() {
        let line = Curve::Line {
            start: Point3::new(0.0, 0.0, 0.0),
            end: Point3::new(3.0, 0.0, 0.0),
        };
        assert_eq!(PlanarKernel::new().tessellate_curve(&line).unwrap().len(), 2);
    }
}
