// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elements, categories and parameters as seen through the host adapter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::GeometryTree;

/// Integer identity of any host object (element, category, material, style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl ElementId {
    #[inline]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host class of an element, used for enumeration filtering and the `Symbol` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind")]
pub enum ElementClass {
    /// A loadable family definition
    Family,
    /// A family type; never exported
    FamilySymbol,
    /// Any other type element; never exported
    ElementType,
    /// A placed family instance referencing its symbol by name
    FamilyInstance { symbol: String },
    #[default]
    Other,
}

impl ElementClass {
    /// Type-like elements are skipped by the exporter
    pub fn is_type(&self) -> bool {
        matches!(self, ElementClass::FamilySymbol | ElementClass::ElementType)
    }

    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            ElementClass::FamilyInstance { symbol } => Some(symbol),
            _ => None,
        }
    }
}

/// Reference to a parent category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: ElementId,
    pub name: String,
}

/// Classification attached to an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: ElementId,
    pub name: String,
    /// Built-in enumerant name (e.g. `OST_Walls`), absent for user categories
    #[serde(default)]
    pub built_in: Option<String>,
    #[serde(default)]
    pub parent: Option<CategoryRef>,
    /// Default material of the category
    #[serde(default)]
    pub material: Option<ElementId>,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl Category {
    /// Enumerant label; falls back to the integer id when the host has no name for it
    pub fn built_in_label(&self) -> String {
        match &self.built_in {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }

    pub fn parent_name(&self) -> &str {
        self.parent.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }
}

/// Semantic type of a parameter definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ParameterType {
    YesNo,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(default)]
    pub parameter_type: ParameterType,
}

/// Raw parameter value, one variant per storage kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "storage", content = "value")]
pub enum ParameterValue {
    String(Option<String>),
    Integer(i32),
    Double(f64),
    ElementId(ElementId),
    #[default]
    Unset,
}

/// Typed, named metadata field on an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameters without a definition are ignored by the exporter
    #[serde(default)]
    pub definition: Option<ParameterDefinition>,
    #[serde(default)]
    pub value: ParameterValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            definition: Some(ParameterDefinition {
                name: name.into(),
                parameter_type: ParameterType::Other,
            }),
            value,
        }
    }

    pub fn yes_no(name: impl Into<String>, raw: i32) -> Self {
        Self {
            definition: Some(ParameterDefinition {
                name: name.into(),
                parameter_type: ParameterType::YesNo,
            }),
            value: ParameterValue::Integer(raw),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.definition.as_ref().map(|d| d.name.as_str())
    }
}

/// One addressable object of the host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub unique_id: String,
    pub id: ElementId,
    #[serde(default)]
    pub name: String,
    /// Runtime kind label (e.g. `Wall`, `FamilyInstance`)
    pub type_name: String,
    #[serde(default)]
    pub class: ElementClass,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Materials assigned directly to the element
    #[serde(default)]
    pub material_ids: Vec<ElementId>,
    #[serde(default)]
    pub geometry: Option<GeometryTree>,
}

impl Element {
    pub fn new(unique_id: impl Into<String>, id: i64, type_name: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            id: ElementId(id),
            name: String::new(),
            type_name: type_name.into(),
            class: ElementClass::Other,
            category: None,
            pinned: false,
            parameters: Vec::new(),
            material_ids: Vec::new(),
            geometry: None,
        }
    }
}
