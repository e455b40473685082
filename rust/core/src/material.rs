// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Materials and graphics styles

use serde::{Deserialize, Serialize};

use crate::element::{Category, ElementId};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// 24-bit packed value, red in the high byte
    #[inline]
    pub fn packed(&self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }
}

/// Render material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: ElementId,
    pub name: String,
    #[serde(default)]
    pub color: Color,
    /// Material category label (e.g. `Concrete`)
    #[serde(default)]
    pub category: String,
    /// Material class label
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub shininess: i32,
    #[serde(default)]
    pub smoothness: i32,
    #[serde(default)]
    pub transparency: i32,
}

/// Graphics style; the exporter only needs the category it points at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsStyle {
    pub id: ElementId,
    #[serde(default)]
    pub category: Option<Category>,
}

impl GraphicsStyle {
    pub fn category_material(&self) -> Option<ElementId> {
        self.category.as_ref().and_then(|c| c.material)
    }
}
