// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry records: the flattened, transformed output of a geometry tree

use std::fmt;

use crate::Point3;

/// Geometry variant a record was produced from (the `Kind` tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Point,
    Line,
    Curve,
    PolyLine,
    Edge,
    Solid,
    Face,
    Mesh,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Point => "Point",
            SourceKind::Line => "Line",
            SourceKind::Curve => "Curve",
            SourceKind::PolyLine => "PolyLine",
            SourceKind::Edge => "Edge",
            SourceKind::Solid => "Solid",
            SourceKind::Face => "Face",
            SourceKind::Mesh => "Mesh",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an element's `Geometry` array
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryRecord {
    /// Single point, `"Type": "Node"`
    Node {
        kind: SourceKind,
        coords: Point3<f64>,
    },
    /// Polyline of at least two points, `"Type": "Poly"`
    Poly {
        kind: SourceKind,
        points: Vec<Point3<f64>>,
    },
    /// Triangle mesh, `"Type": "Mesh"`; indices refer to this record's points only
    Mesh {
        kind: SourceKind,
        points: Vec<Point3<f64>>,
        triangles: Vec<[u32; 3]>,
    },
    /// Content-free `{ "Type": "" }` closing every geometry array
    Terminator,
}

impl GeometryRecord {
    /// Value of the `Type` tag
    pub fn type_tag(&self) -> &'static str {
        match self {
            GeometryRecord::Node { .. } => "Node",
            GeometryRecord::Poly { .. } => "Poly",
            GeometryRecord::Mesh { .. } => "Mesh",
            GeometryRecord::Terminator => "",
        }
    }

    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            GeometryRecord::Node { kind, .. }
            | GeometryRecord::Poly { kind, .. }
            | GeometryRecord::Mesh { kind, .. } => Some(*kind),
            GeometryRecord::Terminator => None,
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, GeometryRecord::Terminator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags() {
        let node = GeometryRecord::Node {
            kind: SourceKind::Point,
            coords: Point3::origin(),
        };
        assert_eq!(node.type_tag(), "Node");
        assert_eq!(node.kind(), Some(SourceKind::Point));
        assert_eq!(GeometryRecord::Terminator.type_tag(), "");
        assert_eq!(GeometryRecord::Terminator.kind(), None);
        assert_eq!(SourceKind::PolyLine.to_string(), "PolyLine");
    }
}
