// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid tessellation with fallback
//!
//! Order of attempts for a solid:
//! 1. no faces and no edges: nothing to emit, failure
//! 2. edges only: every edge as a polyline (`Edge`)
//! 3. kernel shell tessellation: one mesh per shell component (`Solid`)
//! 4. on kernel failure: every face triangulated on its own (`Face`),
//!    failing faces are logged and skipped
//!
//! Nothing here returns an error; failures are logged against the owning
//! element and reflected in the returned [`Outcome`].

use bim_json_core::{ElementContext, ExportLog, GeometryKernel, Mesh, Outcome, Solid};

use crate::records::SourceKind;
use crate::Point3;

/// Untransformed tessellation output
#[derive(Debug, Clone, PartialEq)]
pub enum Tessellated {
    Mesh { kind: SourceKind, mesh: Mesh },
    Polyline { kind: SourceKind, points: Vec<Point3<f64>> },
}

impl Tessellated {
    pub fn kind(&self) -> SourceKind {
        match self {
            Tessellated::Mesh { kind, .. } | Tessellated::Polyline { kind, .. } => *kind,
        }
    }
}

/// Pieces produced for one solid plus the sub-operation counts
#[derive(Debug, Clone, Default)]
pub struct SolidTessellation {
    pub pieces: Vec<Tessellated>,
    pub outcome: Outcome,
}

/// Accept a polyline of at least two points
pub fn polyline_piece(
    kind: SourceKind,
    points: Vec<Point3<f64>>,
    element: &ElementContext,
    log: &mut ExportLog,
) -> Option<Tessellated> {
    if points.len() < 2 {
        log.failure("Points", element);
        return None;
    }
    Some(Tessellated::Polyline { kind, points })
}

/// Accept a non-empty mesh whose indices stay inside its own point list
pub fn mesh_piece(
    kind: SourceKind,
    mesh: Mesh,
    element: &ElementContext,
    log: &mut ExportLog,
) -> Option<Tessellated> {
    if mesh.points.is_empty() || mesh.triangles.is_empty() || !mesh.indices_in_bounds() {
        log.failure("Mesh", element);
        return None;
    }
    Some(Tessellated::Mesh { kind, mesh })
}

fn push(result: &mut SolidTessellation, piece: Option<Tessellated>) {
    result.outcome += Outcome::from_bool(piece.is_some());
    result.pieces.extend(piece);
}

/// Tessellate a solid, falling back to edges or per-face triangulation
pub fn solid_to_meshes<K: GeometryKernel + ?Sized>(
    kernel: &K,
    solid: &Solid,
    element: &ElementContext,
    log: &mut ExportLog,
) -> SolidTessellation {
    let mut result = SolidTessellation::default();

    if solid.faces.is_empty() {
        if solid.edges.is_empty() {
            result.outcome = Outcome::failure();
            return result;
        }

        for edge in &solid.edges {
            let piece = match kernel.tessellate_curve(&edge.curve) {
                Ok(points) => polyline_piece(SourceKind::Edge, points, element, log),
                Err(err) => {
                    tracing::debug!(error = %err, "Edge tessellation failed");
                    log.failure("Edge", element);
                    None
                }
            };
            push(&mut result, piece);
        }
        return result;
    }

    match kernel.tessellate_solid(solid) {
        Ok(shells) => {
            if shells.is_empty() {
                result.outcome = Outcome::failure();
                return result;
            }
            for shell in shells {
                let piece = mesh_piece(SourceKind::Solid, shell, element, log);
                push(&mut result, piece);
            }
        }
        Err(err) => {
            tracing::debug!(
                element_id = element.id.value(),
                error = %err,
                faces = solid.faces.len(),
                "Solid tessellation failed, triangulating faces individually"
            );
            log.failure("Solid", element);

            for face in &solid.faces {
                let piece = match kernel.triangulate_face(face) {
                    Ok(mesh) => mesh_piece(SourceKind::Face, mesh, element, log),
                    Err(_) => {
                        log.failure("Face", element);
                        None
                    }
                };
                push(&mut result, piece);
            }
        }
    }

    result
}
