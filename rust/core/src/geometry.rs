// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host geometry tree
//!
//! A geometry tree is what the host returns for an element: an ordered list of
//! nodes plus the material and graphics style assigned at the root. Nodes are a
//! closed sum type; instanced geometry nests a full tree under a transform.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::mesh::Mesh;
use crate::transform::Transform;

/// Level of detail requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetailLevel {
    Coarse,
    Medium,
    #[default]
    Fine,
}

/// Options passed to the host when extracting element geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryOptions {
    pub compute_references: bool,
    pub detail_level: DetailLevel,
}

impl GeometryOptions {
    /// Reference tracking on, finest detail
    pub fn full_fidelity() -> Self {
        Self {
            compute_references: true,
            detail_level: DetailLevel::Fine,
        }
    }
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self::full_fidelity()
    }
}

/// Parametric curve, tessellated by the kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve")]
pub enum Curve {
    Line {
        start: Point3<f64>,
        end: Point3<f64>,
    },
    /// Circular arc `center + radius * (cos t * x_axis + sin t * y_axis)`
    Arc {
        center: Point3<f64>,
        radius: f64,
        x_axis: Vector3<f64>,
        y_axis: Vector3<f64>,
        start_angle: f64,
        end_angle: f64,
    },
    /// Free-form curve already sampled by the host (splines, ellipses)
    Sampled { points: Vec<Point3<f64>> },
}

/// Boundary edge of a solid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub curve: Curve,
}

/// Planar face bounded by an outer loop and optional holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub outer: Vec<Point3<f64>>,
    #[serde(default)]
    pub holes: Vec<Vec<Point3<f64>>>,
}

impl Face {
    pub fn new(outer: Vec<Point3<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }
}

/// Solid bounded by faces; a wire solid has edges only
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solid {
    #[serde(default)]
    pub faces: Vec<Face>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Solid {
    /// Axis-aligned box between `min` and `max`, faces wound outward
    pub fn cuboid(min: Point3<f64>, max: Point3<f64>) -> Self {
        let corner = |x: bool, y: bool, z: bool| {
            Point3::new(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };
        let quad = |a, b, c, d| Face::new(vec![a, b, c, d]);

        let faces = vec![
            quad(
                corner(false, false, false),
                corner(false, true, false),
                corner(true, true, false),
                corner(true, false, false),
            ),
            quad(
                corner(false, false, true),
                corner(true, false, true),
                corner(true, true, true),
                corner(false, true, true),
            ),
            quad(
                corner(false, false, false),
                corner(true, false, false),
                corner(true, false, true),
                corner(false, false, true),
            ),
            quad(
                corner(true, false, false),
                corner(true, true, false),
                corner(true, true, true),
                corner(true, false, true),
            ),
            quad(
                corner(true, true, false),
                corner(false, true, false),
                corner(false, true, true),
                corner(true, true, true),
            ),
            quad(
                corner(false, true, false),
                corner(false, false, false),
                corner(false, false, true),
                corner(false, true, true),
            ),
        ];

        let mut edges = Vec::with_capacity(12);
        for face in faces.iter().take(2) {
            for i in 0..4 {
                edges.push(Edge {
                    curve: Curve::Line {
                        start: face.outer[i],
                        end: face.outer[(i + 1) % 4],
                    },
                });
            }
        }
        for (x, y) in [(false, false), (true, false), (true, true), (false, true)] {
            edges.push(Edge {
                curve: Curve::Line {
                    start: corner(x, y, false),
                    end: corner(x, y, true),
                },
            });
        }

        Self { faces, edges }
    }
}

/// Placed reference to shared symbol geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub transform: Transform,
    pub symbol_geometry: GeometryTree,
}

/// One node of a geometry tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum GeometryNode {
    Solid(Solid),
    Mesh(Mesh),
    Point(Point3<f64>),
    Line { start: Point3<f64>, end: Point3<f64> },
    PolyLine(Vec<Point3<f64>>),
    Curve(Curve),
    Profile(Vec<Curve>),
    Face(Face),
    Instance(Box<Instance>),
}

impl GeometryNode {
    pub fn instance(transform: Transform, symbol_geometry: GeometryTree) -> Self {
        GeometryNode::Instance(Box::new(Instance {
            transform,
            symbol_geometry,
        }))
    }
}

/// Geometry of one element as returned by the host
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryTree {
    #[serde(default)]
    pub nodes: Vec<GeometryNode>,
    /// Material assigned at the root of the tree
    #[serde(default)]
    pub material: Option<ElementId>,
    #[serde(default)]
    pub graphics_style: Option<ElementId>,
}

impl GeometryTree {
    pub fn new(nodes: Vec<GeometryNode>) -> Self {
        Self {
            nodes,
            material: None,
            graphics_style: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
