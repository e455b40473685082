// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-JSON Geometry
//!
//! Turns host geometry trees into flat, transformed geometry records using
//! earcutr triangulation and nalgebra for transformations. Solids that the
//! kernel cannot tessellate fall back to per-face triangulation.

pub mod error;
pub mod kernel;
pub mod records;
pub mod serializer;
pub mod tessellation;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use error::{Error, Result};
pub use kernel::{KernelSettings, PlanarKernel};
pub use records::{GeometryRecord, SourceKind};
pub use serializer::{serialize_geometry, GeometrySerializer, SerializedGeometry};
pub use tessellation::{solid_to_meshes, SolidTessellation, Tessellated};
pub use triangulation::{loop_normal, triangulate_planar_loops};
