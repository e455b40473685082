// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BIM-JSON Core
//!
//! Host model adapter for exporting BIM scenes to JSON.
//!
//! The exporter reads a host CAD/BIM document through two traits:
//!
//! - [`HostDocument`]: element enumeration, per-element geometry trees,
//!   material and graphics style lookup
//! - [`GeometryKernel`]: solid tessellation, face triangulation and curve
//!   tessellation, treated as black boxes
//!
//! The data model ([`Element`], [`Category`], [`Parameter`], [`GeometryNode`],
//! [`Material`]) is a read-only view for the duration of one export.
//! [`SceneDocument`] is an in-memory adapter backed by serde snapshots.
//!
//! ```rust,ignore
//! use bim_json_core::{Element, SceneDocument, HostDocument};
//!
//! let mut doc = SceneDocument::new("tower.rvt");
//! doc.add_element(Element::new("uid-1", 1, "Wall"));
//! assert_eq!(doc.elements().count(), 1);
//! ```

pub mod diagnostics;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod host;
pub mod material;
pub mod mesh;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use diagnostics::{ElementContext, ExportLog, Outcome};
pub use document::{SceneDocument, SceneSnapshot};
pub use element::{
    Category, CategoryRef, Element, ElementClass, ElementId, Parameter, ParameterDefinition,
    ParameterType, ParameterValue,
};
pub use error::{Error, Result};
pub use geometry::{
    Curve, DetailLevel, Edge, Face, GeometryNode, GeometryOptions, GeometryTree, Instance, Solid,
};
pub use host::{GeometryKernel, HostDocument};
pub use material::{Color, GraphicsStyle, Material};
pub use mesh::Mesh;
pub use transform::Transform;
