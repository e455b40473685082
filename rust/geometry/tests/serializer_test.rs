// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry serialization across nested instances and solid fallbacks.

use approx::assert_relative_eq;
use bim_json_core::{
    Curve, Edge, ElementContext, ElementId, ExportLog, Face, GeometryNode, GeometryTree, Mesh,
    Solid, Transform,
};
use bim_json_geometry::{serialize_geometry, GeometryRecord, PlanarKernel, Point3, SourceKind};
use std::f64::consts::FRAC_PI_2;

fn element() -> ElementContext {
    ElementContext::new(ElementId(1001), "Basic Wall")
}

fn points_of(record: &GeometryRecord) -> &[Point3<f64>] {
    match record {
        GeometryRecord::Poly { points, .. } | GeometryRecord::Mesh { points, .. } => points,
        GeometryRecord::Node { coords, .. } => std::slice::from_ref(coords),
        GeometryRecord::Terminator => &[],
    }
}

#[test]
fn nested_instances_compose_transforms() {
    let symbol = GeometryTree::new(vec![GeometryNode::Point(Point3::new(1.0, 0.0, 0.0))]);
    let inner = GeometryTree::new(vec![GeometryNode::instance(
        Transform::rotation_z(FRAC_PI_2),
        symbol,
    )]);
    let tree = GeometryTree::new(vec![GeometryNode::instance(
        Transform::translation(10.0, 0.0, 0.0),
        inner,
    )]);

    let mut log = ExportLog::new();
    let out = serialize_geometry(
        &PlanarKernel::new(),
        &tree,
        &Transform::translation(0.0, 0.0, 5.0),
        element(),
        &mut log,
    );

    // No wrapping record for instances
    assert_eq!(out.content().len(), 1);
    let p = points_of(&out.content()[0])[0];
    assert_relative_eq!(p.x, 10.0, epsilon = 1e-12);
    assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(p.z, 5.0, epsilon = 1e-12);
    assert!(out.records.last().unwrap().is_terminator());
}

#[test]
fn warped_solid_falls_back_to_faces() {
    let mut solid = Solid::cuboid(Point3::origin(), Point3::new(2.0, 2.0, 2.0));
    solid.faces[3].outer[2].x += 0.5;
    let tree = GeometryTree::new(vec![GeometryNode::Solid(solid)]);

    let mut log = ExportLog::new();
    let out = serialize_geometry(
        &PlanarKernel::new(),
        &tree,
        &Transform::identity(),
        element(),
        &mut log,
    );

    let kinds: Vec<_> = out.content().iter().filter_map(|r| r.kind()).collect();
    assert_eq!(kinds.len(), 5);
    assert!(kinds.iter().all(|k| *k == SourceKind::Face));
    assert!(out.outcome.is_success());
    assert_eq!(
        log.lines()[0],
        "Failed Solid to Json at Element Id 1001 Name \"Basic Wall\""
    );
}

#[test]
fn wire_solid_becomes_edge_polylines() {
    let solid = Solid {
        faces: Vec::new(),
        edges: Solid::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).edges,
    };
    let tree = GeometryTree::new(vec![GeometryNode::Solid(solid)]);

    let mut log = ExportLog::new();
    let out = serialize_geometry(
        &PlanarKernel::new(),
        &tree,
        &Transform::identity(),
        element(),
        &mut log,
    );

    assert_eq!(out.content().len(), 12);
    for record in out.content() {
        assert_eq!(record.type_tag(), "Poly");
        assert_eq!(record.kind(), Some(SourceKind::Edge));
        assert_eq!(points_of(record).len(), 2);
    }
    assert!(log.is_empty());
}

#[test]
fn profile_succeeds_when_any_curve_does() {
    let tree = GeometryTree::new(vec![GeometryNode::Profile(vec![
        Curve::Sampled {
            points: vec![Point3::origin()],
        },
        Curve::Line {
            start: Point3::origin(),
            end: Point3::new(1.0, 1.0, 0.0),
        },
    ])]);

    let mut log = ExportLog::new();
    let out = serialize_geometry(
        &PlanarKernel::new(),
        &tree,
        &Transform::identity(),
        element(),
        &mut log,
    );

    assert_eq!(out.content().len(), 1);
    assert_eq!(out.content()[0].kind(), Some(SourceKind::Curve));
    assert_eq!(out.outcome.attempted, 2);
    assert!(out.outcome.is_success());
    assert_eq!(log.failure_count(), 1);
}

#[test]
fn mesh_indices_are_local_to_each_record() {
    let mut host_mesh = Mesh::new();
    let a = host_mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    let b = host_mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
    let c = host_mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
    host_mesh.add_triangle(a, b, c);

    let tree = GeometryTree::new(vec![
        GeometryNode::Solid(Solid::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0))),
        GeometryNode::Mesh(host_mesh),
        GeometryNode::Face(Face::new(vec![
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(4.0, 0.0, 3.0),
            Point3::new(4.0, 4.0, 3.0),
            Point3::new(0.0, 4.0, 3.0),
        ])),
    ]);

    let mut log = ExportLog::new();
    let out = serialize_geometry(
        &PlanarKernel::new(),
        &tree,
        &Transform::uniform_scale(2.0),
        element(),
        &mut log,
    );

    assert_eq!(out.content().len(), 3);
    for record in out.content() {
        match record {
            GeometryRecord::Mesh {
                points, triangles, ..
            } => {
                assert!(!triangles.is_empty());
                assert!(triangles
                    .iter()
                    .flatten()
                    .all(|&i| (i as usize) < points.len()));
            }
            other => panic!("expected mesh record, got {:?}", other),
        }
    }
    assert_eq!(out.content()[1].kind(), Some(SourceKind::Mesh));
    assert_relative_eq!(points_of(&out.content()[1])[1].x, 2.0);
    assert_eq!(out.content()[2].kind(), Some(SourceKind::Face));
}

#[test]
fn edge_curves_keep_their_own_kind() {
    let tree = GeometryTree::new(vec![GeometryNode::Solid(Solid {
        faces: Vec::new(),
        edges: vec![Edge {
            curve: Curve::Sampled {
                points: vec![
                    Point3::origin(),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(1.0, 1.0, 0.0),
                ],
            },
        }],
    })]);

    let mut log = ExportLog::new();
    let out = serialize_geometry(
        &PlanarKernel::new(),
        &tree,
        &Transform::identity(),
        element(),
        &mut log,
    );
    assert_eq!(out.content().len(), 1);
    assert_eq!(out.content()[0].kind(), Some(SourceKind::Edge));
    assert_eq!(points_of(&out.content()[0]).len(), 3);
}
