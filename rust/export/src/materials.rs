// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material resolution
//!
//! Collects the materials that apply to an element from four sources, in
//! precedence order: the element itself, the root of its geometry tree, the
//! category of the tree's graphics style and the element's own category.
//! The first source naming a material wins its `Kind` tag.

use std::fmt;

use bim_json_core::{Element, ElementId, Error as CoreError, GeometryTree, HostDocument, Material};
use rustc_hash::FxHashSet;

use crate::format::JsonWriter;
use crate::Result;

/// Where a material reference was found (the `Kind` tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialSource {
    Element,
    Geometry,
    Style,
    Category,
}

impl MaterialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialSource::Element => "Element",
            MaterialSource::Geometry => "Geometry",
            MaterialSource::Style => "Style",
            MaterialSource::Category => "Category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMaterial<'d> {
    pub material: &'d Material,
    pub source: MaterialSource,
}

/// Resolve every material of `element`, deduplicated by id
///
/// A referenced id the document cannot resolve aborts with
/// [`CoreError::MissingMaterial`].
pub fn resolve_materials<'d, D: HostDocument + ?Sized>(
    document: &'d D,
    element: &Element,
    tree: &GeometryTree,
) -> Result<Vec<ResolvedMaterial<'d>>> {
    let style_material = tree
        .graphics_style
        .and_then(|id| document.graphics_style(id))
        .and_then(|style| style.category_material());
    let category_material = element.category.as_ref().and_then(|c| c.material);

    let candidates = element
        .material_ids
        .iter()
        .map(|id| (*id, MaterialSource::Element))
        .chain(tree.material.map(|id| (id, MaterialSource::Geometry)))
        .chain(style_material.map(|id| (id, MaterialSource::Style)))
        .chain(category_material.map(|id| (id, MaterialSource::Category)));

    let mut seen: FxHashSet<ElementId> = FxHashSet::default();
    let mut resolved = Vec::new();

    for (id, source) in candidates {
        if !seen.insert(id) {
            continue;
        }
        let material = document
            .material(id)
            .ok_or(CoreError::MissingMaterial(id))?;
        resolved.push(ResolvedMaterial { material, source });
    }

    Ok(resolved)
}

/// Write the `Materials` array
pub fn write_materials(writer: &mut JsonWriter, materials: &[ResolvedMaterial<'_>]) -> fmt::Result {
    writer.begin_array(Some("Materials"))?;
    for entry in materials {
        let m = entry.material;
        writer.begin_object(None)?;
        writer.string(Some("Name"), &m.name)?;
        writer.raw(Some("Guid"), m.id)?;
        writer.string(Some("Kind"), entry.source.as_str())?;
        writer.raw(Some("Color"), m.color.packed())?;
        writer.string(Some("Category"), &m.category)?;
        writer.string(Some("Class"), &m.class)?;
        writer.raw(Some("Shininess"), m.shininess)?;
        writer.raw(Some("Smoothness"), m.smoothness)?;
        writer.raw(Some("Transparency"), m.transparency)?;
        writer.end()?;
    }
    writer.end()
}
