// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host model adapter
//!
//! The exporter never owns the host document. It reads elements, geometry and
//! materials through [`HostDocument`] and delegates every tessellation step to
//! a [`GeometryKernel`], mirroring how geometry processors are routed in the
//! geometry crate.

use nalgebra::Point3;
use std::borrow::Cow;

use crate::element::{Element, ElementId};
use crate::error::Result;
use crate::geometry::{Curve, Face, GeometryOptions, GeometryTree, Solid};
use crate::material::{GraphicsStyle, Material};
use crate::mesh::Mesh;

/// Read-only view of a host document for the duration of one export
pub trait HostDocument {
    /// Path or name of the document; empty when it was never saved
    fn title(&self) -> &str;

    /// All elements in enumeration order
    fn elements(&self) -> Box<dyn Iterator<Item = &Element> + '_>;

    /// Geometry of an element, `None` when it has no geometric representation
    fn geometry<'a>(
        &'a self,
        element: &'a Element,
        options: &GeometryOptions,
    ) -> Option<Cow<'a, GeometryTree>>;

    fn material(&self, id: ElementId) -> Option<&Material>;

    fn graphics_style(&self, id: ElementId) -> Option<&GraphicsStyle>;
}

/// Black-box tessellation services of the host geometry kernel
pub trait GeometryKernel {
    /// Tessellate a solid into one mesh per disjoint shell component
    fn tessellate_solid(&self, solid: &Solid) -> Result<Vec<Mesh>>;

    /// Triangulate a single face
    fn triangulate_face(&self, face: &Face) -> Result<Mesh>;

    /// Approximate a curve by a polyline
    fn tessellate_curve(&self, curve: &Curve) -> Result<Vec<Point3<f64>>>;
}

impl<K: GeometryKernel + ?Sized> GeometryKernel for &K {
    fn tessellate_solid(&self, solid: &Solid) -> Result<Vec<Mesh>> {
        (**self).tessellate_solid(solid)
    }

    fn triangulate_face(&self, face: &Face) -> Result<Mesh> {
        (**self).triangulate_face(face)
    }

    fn tessellate_curve(&self, curve: &Curve) -> Result<Vec<Point3<f64>>> {
        (**self).tessellate_curve(curve)
    }
}
