// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry tree to record list
//!
//! Walks a host geometry tree, applies the accumulated placement transform
//! to every emitted coordinate and collects [`GeometryRecord`]s. Instances
//! are flattened: their transform is composed with the ambient one and
//! their symbol geometry is visited in place, without a wrapping record.

use bim_json_core::{
    Curve, ElementContext, ExportLog, GeometryKernel, GeometryNode, GeometryTree, Outcome,
    Transform,
};

use crate::records::{GeometryRecord, SourceKind};
use crate::tessellation::{mesh_piece, polyline_piece, solid_to_meshes, Tessellated};

/// Records for one element's geometry, always closed by the terminator
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedGeometry {
    pub records: Vec<GeometryRecord>,
    pub outcome: Outcome,
}

impl SerializedGeometry {
    /// Geometry array of an element the host returned no geometry for
    pub fn empty() -> Self {
        Self {
            records: vec![GeometryRecord::Terminator],
            outcome: Outcome::default(),
        }
    }

    /// Content records, terminator excluded
    pub fn content(&self) -> &[GeometryRecord] {
        match self.records.split_last() {
            Some((GeometryRecord::Terminator, rest)) => rest,
            _ => &self.records,
        }
    }
}

/// Serializes geometry trees for a single element
pub struct GeometrySerializer<'a, K: GeometryKernel + ?Sized> {
    kernel: &'a K,
    element: ElementContext,
    log: &'a mut ExportLog,
    records: Vec<GeometryRecord>,
}

impl<'a, K: GeometryKernel + ?Sized> GeometrySerializer<'a, K> {
    pub fn new(kernel: &'a K, element: ElementContext, log: &'a mut ExportLog) -> Self {
        Self {
            kernel,
            element,
            log,
            records: Vec::new(),
        }
    }

    /// Serialize a tree under `transform` and append the terminator
    pub fn serialize(mut self, tree: &GeometryTree, transform: &Transform) -> SerializedGeometry {
        let outcome = self.visit_tree(tree, transform);
        self.records.push(GeometryRecord::Terminator);

        tracing::trace!(
            element_id = self.element.id.value(),
            records = self.records.len() - 1,
            attempted = outcome.attempted,
            succeeded = outcome.succeeded,
            "Serialized geometry"
        );

        SerializedGeometry {
            records: self.records,
            outcome,
        }
    }

    fn visit_tree(&mut self, tree: &GeometryTree, transform: &Transform) -> Outcome {
        tree.nodes
            .iter()
            .map(|node| self.visit_node(node, transform))
            .sum()
    }

    fn visit_node(&mut self, node: &GeometryNode, transform: &Transform) -> Outcome {
        match node {
            GeometryNode::Point(p) => {
                self.records.push(GeometryRecord::Node {
                    kind: SourceKind::Point,
                    coords: transform.of_point(p),
                });
                Outcome::success()
            }
            GeometryNode::Line { start, end } => {
                let line = Curve::Line {
                    start: *start,
                    end: *end,
                };
                self.curve(&line, SourceKind::Line, transform)
            }
            GeometryNode::Curve(curve) => {
                let kind = match curve {
                    Curve::Line { .. } => SourceKind::Line,
                    _ => SourceKind::Curve,
                };
                self.curve(curve, kind, transform)
            }
            GeometryNode::PolyLine(points) => {
                let piece =
                    polyline_piece(SourceKind::PolyLine, points.clone(), &self.element, self.log);
                self.emit(piece, transform)
            }
            GeometryNode::Profile(curves) => curves
                .iter()
                .map(|c| self.curve(c, SourceKind::Curve, transform))
                .sum(),
            GeometryNode::Face(face) => match self.kernel.triangulate_face(face) {
                Ok(mesh) => {
                    let piece = mesh_piece(SourceKind::Face, mesh, &self.element, self.log);
                    self.emit(piece, transform)
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Face triangulation failed");
                    self.log.failure("Face", &self.element);
                    Outcome::failure()
                }
            },
            GeometryNode::Mesh(mesh) => {
                let piece = mesh_piece(SourceKind::Mesh, mesh.clone(), &self.element, self.log);
                self.emit(piece, transform)
            }
            GeometryNode::Solid(solid) => {
                let result = solid_to_meshes(self.kernel, solid, &self.element, self.log);
                for piece in result.pieces {
                    self.push(piece, transform);
                }
                result.outcome
            }
            GeometryNode::Instance(instance) => {
                let placed = transform.compose(&instance.transform);
                self.visit_tree(&instance.symbol_geometry, &placed)
            }
        }
    }

    fn curve(&mut self, curve: &Curve, kind: SourceKind, transform: &Transform) -> Outcome {
        match self.kernel.tessellate_curve(curve) {
            Ok(points) => {
                let piece = polyline_piece(kind, points, &self.element, self.log);
                self.emit(piece, transform)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Curve tessellation failed");
                self.log.failure("Curve", &self.element);
                Outcome::failure()
            }
        }
    }

    fn emit(&mut self, piece: Option<Tessellated>, transform: &Transform) -> Outcome {
        match piece {
            Some(piece) => {
                self.push(piece, transform);
                Outcome::success()
            }
            None => Outcome::failure(),
        }
    }

    fn push(&mut self, piece: Tessellated, transform: &Transform) {
        let record = match piece {
            Tessellated::Polyline { kind, points } => GeometryRecord::Poly {
                kind,
                points: points.iter().map(|p| transform.of_point(p)).collect(),
            },
            Tessellated::Mesh { kind, mesh } => {
                let mesh = mesh.transformed(transform);
                GeometryRecord::Mesh {
                    kind,
                    points: mesh.points,
                    triangles: mesh.triangles,
                }
            }
        };
        self.records.push(record);
    }
}

/// Serialize one element's geometry tree
pub fn serialize_geometry<K: GeometryKernel + ?Sized>(
    kernel: &K,
    tree: &GeometryTree,
    transform: &Transform,
    element: ElementContext,
    log: &mut ExportLog,
) -> SerializedGeometry {
    GeometrySerializer::new(kernel, element, log).serialize(tree, transform)
}
