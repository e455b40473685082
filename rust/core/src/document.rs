// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host document
//!
//! `SceneDocument` is a self-contained snapshot of a host document: elements
//! with their geometry, plus the material and graphics style tables they
//! reference. It deserializes from the scene snapshot JSON used by the CLI.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::element::{Element, ElementId};
use crate::geometry::{GeometryOptions, GeometryTree};
use crate::host::HostDocument;
use crate::material::{GraphicsStyle, Material};

/// Serialized form of a scene document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub graphics_styles: Vec<GraphicsStyle>,
}

/// Indexed in-memory document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "SceneSnapshot")]
pub struct SceneDocument {
    snapshot: SceneSnapshot,
    material_index: FxHashMap<ElementId, usize>,
    style_index: FxHashMap<ElementId, usize>,
}

impl From<SceneSnapshot> for SceneDocument {
    fn from(snapshot: SceneSnapshot) -> Self {
        let material_index = snapshot
            .materials
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();
        let style_index = snapshot
            .graphics_styles
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
        Self {
            snapshot,
            material_index,
            style_index,
        }
    }
}

impl SceneDocument {
    pub fn new(title: impl Into<String>) -> Self {
        SceneSnapshot {
            title: title.into(),
            ..SceneSnapshot::default()
        }
        .into()
    }

    pub fn add_element(&mut self, element: Element) -> &mut Self {
        self.snapshot.elements.push(element);
        self
    }

    pub fn add_material(&mut self, material: Material) -> &mut Self {
        self.material_index
            .insert(material.id, self.snapshot.materials.len());
        self.snapshot.materials.push(material);
        self
    }

    pub fn add_graphics_style(&mut self, style: GraphicsStyle) -> &mut Self {
        self.style_index
            .insert(style.id, self.snapshot.graphics_styles.len());
        self.snapshot.graphics_styles.push(style);
        self
    }

    pub fn element_count(&self) -> usize {
        self.snapshot.elements.len()
    }
}

impl HostDocument for SceneDocument {
    fn title(&self) -> &str {
        &self.snapshot.title
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(self.snapshot.elements.iter())
    }

    fn geometry<'a>(
        &'a self,
        element: &'a Element,
        _options: &GeometryOptions,
    ) -> Option<Cow<'a, GeometryTree>> {
        // Snapshots carry geometry already extracted at full fidelity
        element.geometry.as_ref().map(Cow::Borrowed)
    }

    fn material(&self, id: ElementId) -> Option<&Material> {
        self.material_index
            .get(&id)
            .and_then(|&i| self.snapshot.materials.get(i))
    }

    fn graphics_style(&self, id: ElementId) -> Option<&GraphicsStyle> {
        self.style_index
            .get(&id)
            .and_then(|&i| self.snapshot.graphics_styles.get(i))
    }
}
