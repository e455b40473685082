// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BIM-JSON Export
//!
//! Writes every exportable element of a host document into one JSON map
//! keyed by element unique id:
//!
//! ```text
//! {
//! "<uid>": {
//!     "Geometry": [ ..., { "Type": "" } ],
//!     "Materials": [ ... ],
//!     "Attributes": { ... }
//! }
//! }
//! ```
//!
//! Geometry failures are recoverable: they are logged against the element
//! and the export continues. Missing materials and I/O errors abort.
//!
//! ```rust,ignore
//! use bim_json_core::SceneDocument;
//! use bim_json_export::Exporter;
//! use bim_json_geometry::PlanarKernel;
//!
//! let doc: SceneDocument = serde_json::from_str(&text)?;
//! let kernel = PlanarKernel::new();
//! let report = Exporter::new(&doc, &kernel).export_to_path("tower.json")?;
//! print!("{}", report.summary());
//! ```

pub mod attributes;
pub mod config;
pub mod error;
pub mod exporter;
pub mod format;
pub mod geometry;
pub mod materials;

pub use nalgebra::Point3;

pub use attributes::flatten_attributes;
pub use config::ExportConfig;
pub use error::{Error, Result};
pub use exporter::{default_output_name, ElementOutcome, ExportOutput, ExportReport, Exporter};
pub use format::{
    escape_string, format_double, format_triangle, format_xyz, FormatOptions, JsonWriter,
};
pub use geometry::write_geometry;
pub use materials::{resolve_materials, write_materials, MaterialSource, ResolvedMaterial};
