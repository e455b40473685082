// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygon triangulation
//!
//! Faces are projected onto their own plane and handed to earcutr. Loops are
//! expected without a repeated closing point; one is dropped if present.

use crate::{Error, Point2, Point3, Result, Vector3};

/// Newell normal of a loop, unit length; `None` for degenerate loops
pub fn loop_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    if points.len() < 3 {
        return None;
    }

    let mut normal = Vector3::<f64>::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    let len = normal.norm();
    if len > 1e-12 {
        Some(normal / len)
    } else {
        None
    }
}

/// Orthonormal (u, v) basis spanning the plane with the given normal
fn plane_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    // Reference axis least parallel to the normal
    let reference = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u = normal.cross(&reference).normalize();
    let v = normal.cross(&u).normalize();
    (u, v)
}

fn open_loop(points: &[Point3<f64>]) -> &[Point3<f64>] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first == last => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}

/// Largest distance of any loop point from the plane through `origin`
fn plane_deviation(
    loops: &[&[Point3<f64>]],
    origin: &Point3<f64>,
    normal: &Vector3<f64>,
) -> f64 {
    loops
        .iter()
        .flat_map(|l| l.iter())
        .map(|p| (p - origin).dot(normal).abs())
        .fold(0.0, f64::max)
}

/// Triangulate a planar face given as an outer loop plus holes
///
/// Returns the points actually used (outer followed by holes, closing
/// duplicates removed) and 0-based triangles into them.
pub fn triangulate_planar_loops(
    outer: &[Point3<f64>],
    holes: &[Vec<Point3<f64>>],
    planarity_tolerance: f64,
) -> Result<(Vec<Point3<f64>>, Vec<[u32; 3]>)> {
    let outer = open_loop(outer);
    if outer.len() < 3 {
        return Err(Error::TriangulationError(format!(
            "outer loop has {} points, need at least 3",
            outer.len()
        )));
    }

    let normal = loop_normal(outer)
        .ok_or_else(|| Error::TriangulationError("outer loop has zero area".to_string()))?;

    let holes: Vec<&[Point3<f64>]> = holes
        .iter()
        .map(|h| open_loop(h))
        .filter(|h| h.len() >= 3)
        .collect();

    let origin = outer[0];
    let mut loops: Vec<&[Point3<f64>]> = Vec::with_capacity(holes.len() + 1);
    loops.push(outer);
    loops.extend(holes.iter().copied());

    let deviation = plane_deviation(&loops, &origin, &normal);
    if deviation > planarity_tolerance {
        return Err(Error::NonPlanarFace(deviation));
    }

    let (u, v) = plane_basis(&normal);
    let project = |p: &Point3<f64>| {
        let d = p - origin;
        Point2::new(d.dot(&u), d.dot(&v))
    };

    let total: usize = loops.iter().map(|l| l.len()).sum();
    let mut flat = Vec::with_capacity(total * 2);
    let mut points = Vec::with_capacity(total);
    let mut hole_starts = Vec::with_capacity(holes.len());

    for (i, l) in loops.iter().enumerate() {
        if i > 0 {
            hole_starts.push(points.len());
        }
        for p in l.iter() {
            let p2 = project(p);
            flat.push(p2.x);
            flat.push(p2.y);
            points.push(*p);
        }
    }

    // Triangles need no ear clipping and keep their input winding
    if points.len() == 3 {
        return Ok((points, vec![[0, 1, 2]]));
    }

    let indices = earcutr::earcut(&flat, &hole_starts, 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;
    if indices.is_empty() {
        return Err(Error::TriangulationError(
            "earcut produced no triangles".to_string(),
        ));
    }

    let triangles = indices
        .chunks_exact(3)
        .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
        .collect();

    Ok((points, triangles))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: f64, size: f64) -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(size, 0.0, z),
            Point3::new(size, size, z),
            Point3::new(0.0, size, z),
        ]
    }

    #[test]
    fn test_triangulate_square() {
        let (points, triangles) = triangulate_planar_loops(&square(0.0, 1.0), &[], 1e-9).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn test_closing_point_is_dropped() {
        let mut closed = square(2.0, 1.0);
        closed.push(closed[0]);
        let (points, triangles) = triangulate_planar_loops(&closed, &[], 1e-9).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn test_square_with_hole() {
        let outer = square(0.0, 10.0);
        let hole = vec![
            Point3::new(3.0, 3.0, 0.0),
            Point3::new(3.0, 7.0, 0.0),
            Point3::new(7.0, 7.0, 0.0),
            Point3::new(7.0, 3.0, 0.0),
        ];
        let (points, triangles) = triangulate_planar_loops(&outer, &[hole], 1e-9).unwrap();
        assert_eq!(points.len(), 8);
        // An annulus of 8 vertices needs 8 triangles
        assert_eq!(triangles.len(), 8);
        assert!(triangles
            .iter()
            .all(|t| t.iter().all(|&i| (i as usize) < points.len())));
    }

    #[test]
    fn test_vertical_face() {
        let face = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 3.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let (_, triangles) = triangulate_planar_loops(&face, &[], 1e-9).unwrap();
        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn test_insufficient_points() {
        let line = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert!(triangulate_planar_loops(&line, &[], 1e-9).is_err());
    }

    #[test]
    fn test_non_planar_rejected() {
        let mut warped = square(0.0, 1.0);
        warped[2].z = 0.5;
        let result = triangulate_planar_loops(&warped, &[], 1e-6);
        assert!(matches!(result, Err(Error::NonPlanarFace(_))));
    }

    #[test]
    fn test_loop_normal() {
        let normal = loop_normal(&square(0.0, 1.0)).unwrap();
        assert!((normal.z - 1.0).abs() < 1e-12);
        assert!(loop_normal(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).is_none());
    }
}
