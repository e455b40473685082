// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute flattening
//!
//! Writes the fixed identity fields, the category block and every defined
//! parameter of an element into one flat `Attributes` object. Keys are
//! unique: the first field to claim an (escaped) name keeps it.

use std::fmt;

use bim_json_core::{Category, Element, Parameter, ParameterType, ParameterValue};
use rustc_hash::FxHashSet;

use crate::format::{escape_string, JsonWriter};

fn write_category_fields(writer: &mut JsonWriter, category: &Category) -> fmt::Result {
    writer.string(Some("Name"), &category.name)?;
    writer.raw(Some("Guid"), category.id)?;
    writer.string(Some("Type"), &category.built_in_label())?;
    writer.string(Some("Kind"), category.parent_name())
}

fn write_category(writer: &mut JsonWriter, category: &Category) -> fmt::Result {
    writer.begin_object(Some("Category"))?;
    write_category_fields(writer, category)?;

    // Subcategories are listed one level deep only
    writer.begin_array(Some("Subs"))?;
    for sub in &category.subcategories {
        writer.begin_object(None)?;
        write_category_fields(writer, sub)?;
        writer.end()?;
    }
    writer.end()?;

    writer.end()
}

fn write_parameter(writer: &mut JsonWriter, name: &str, parameter: &Parameter) -> fmt::Result {
    let yes_no = parameter
        .definition
        .as_ref()
        .map_or(false, |d| d.parameter_type == ParameterType::YesNo);

    match &parameter.value {
        ParameterValue::String(text) => writer.string(Some(name), text.as_deref().unwrap_or("")),
        // Stored zero reads as true; kept for compatibility with existing consumers
        ParameterValue::Integer(value) if yes_no => writer.boolean(Some(name), *value == 0),
        ParameterValue::Integer(value) => writer.raw(Some(name), value),
        ParameterValue::Double(value) => writer.double(Some(name), *value),
        ParameterValue::ElementId(id) => writer.raw(Some(name), id),
        ParameterValue::Unset => writer.null(Some(name)),
    }
}

/// Write the `Attributes` object of an element
pub fn flatten_attributes(writer: &mut JsonWriter, element: &Element) -> fmt::Result {
    let mut claimed: FxHashSet<String> = FxHashSet::default();
    let mut claim = |key: &str| claimed.insert(escape_string(key));

    writer.begin_object(Some("Attributes"))?;

    writer.string(Some("Name"), &element.name)?;
    claim("Name");

    // The integer id is written as a string
    writer.string(Some("Guid"), &element.id.to_string())?;
    claim("Guid");

    writer.string(Some("Type"), &element.type_name)?;
    claim("Type");

    if let Some(symbol) = element.class.symbol_name() {
        writer.string(Some("Symbol"), symbol)?;
        claim("Symbol");
    }

    if let Some(category) = &element.category {
        write_category(writer, category)?;
        claim("Category");
    }

    for parameter in &element.parameters {
        let Some(name) = parameter.name() else {
            continue;
        };
        if !claim(name) {
            continue;
        }
        write_parameter(writer, name, parameter)?;
    }

    writer.boolean(Some("Pinned"), element.pinned)?;
    writer.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOptions;
    use bim_json_core::{CategoryRef, ElementClass, ElementId, ParameterDefinition};
    use serde_json::Value;

    fn render(element: &Element) -> Value {
        let mut writer = JsonWriter::new(FormatOptions::default());
        writer.begin_object(None).unwrap();
        flatten_attributes(&mut writer, element).unwrap();
        writer.end().unwrap();
        let text = writer.finish().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        value["Attributes"].clone()
    }

    fn keys(value: &Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn fixed_fields() {
        let mut element = Element::new("uid", 316, "FamilyInstance");
        element.name = "Door 900".to_string();
        element.class = ElementClass::FamilyInstance {
            symbol: "900 x 2100".to_string(),
        };
        element.pinned = true;

        let attrs = render(&element);
        assert_eq!(attrs["Name"], "Door 900");
        assert_eq!(attrs["Guid"], "316");
        assert_eq!(attrs["Type"], "FamilyInstance");
        assert_eq!(attrs["Symbol"], "900 x 2100");
        assert_eq!(attrs["Pinned"], true);
        assert!(attrs.get("Category").is_none());
    }

    #[test]
    fn category_block_with_subs() {
        let mut element = Element::new("uid", 1, "Wall");
        element.category = Some(Category {
            id: ElementId(-2000011),
            name: "Walls".to_string(),
            built_in: Some("OST_Walls".to_string()),
            parent: None,
            material: None,
            subcategories: vec![Category {
                id: ElementId(4242),
                name: "Hidden Lines".to_string(),
                built_in: None,
                parent: Some(CategoryRef {
                    id: ElementId(-2000011),
                    name: "Walls".to_string(),
                }),
                material: None,
                subcategories: Vec::new(),
            }],
        });

        let attrs = render(&element);
        let category = &attrs["Category"];
        assert_eq!(category["Name"], "Walls");
        assert_eq!(category["Guid"], -2000011);
        assert_eq!(category["Type"], "OST_Walls");
        assert_eq!(category["Kind"], "");
        assert_eq!(category["Subs"][0]["Type"], "4242");
        assert_eq!(category["Subs"][0]["Kind"], "Walls");
        assert!(category["Subs"][0].get("Subs").is_none());
    }

    #[test]
    fn parameter_values() {
        let mut element = Element::new("uid", 1, "Wall");
        element.parameters = vec![
            Parameter::new("Comments", ParameterValue::String(Some("a \"b\"".into()))),
            Parameter::new("Mark", ParameterValue::String(None)),
            Parameter::new("Count", ParameterValue::Integer(-3)),
            Parameter::new("Length", ParameterValue::Double(2.75)),
            Parameter::new("Broken", ParameterValue::Double(f64::NAN)),
            Parameter::new("Level", ParameterValue::ElementId(ElementId(311))),
            Parameter::new("Empty", ParameterValue::Unset),
            Parameter::yes_no("Structural", 0),
            Parameter::yes_no("Room Bounding", 1),
        ];

        let attrs = render(&element);
        assert_eq!(attrs["Comments"], "a \"b\"");
        assert_eq!(attrs["Mark"], "");
        assert_eq!(attrs["Count"], -3);
        assert_eq!(attrs["Length"], 2.75);
        assert_eq!(attrs["Broken"], Value::Null);
        assert_eq!(attrs["Level"], 311);
        assert_eq!(attrs["Empty"], Value::Null);
        assert_eq!(attrs["Structural"], true);
        assert_eq!(attrs["Room Bounding"], false);
    }

    #[test]
    fn first_claim_wins() {
        let mut element = Element::new("uid", 1, "Wall");
        element.name = "Real Name".to_string();
        element.parameters = vec![
            Parameter::new("Name", ParameterValue::String(Some("shadow".into()))),
            Parameter::new("Width", ParameterValue::Double(1.0)),
            Parameter::new("Width", ParameterValue::Double(2.0)),
            Parameter {
                definition: None,
                value: ParameterValue::Integer(5),
            },
        ];

        let attrs = render(&element);
        assert_eq!(attrs["Name"], "Real Name");
        assert_eq!(attrs["Width"], 1.0);
        assert_eq!(
            keys(&attrs),
            vec!["Guid", "Name", "Pinned", "Type", "Width"]
        );
    }

    #[test]
    fn yes_no_definition_only_applies_to_integers() {
        let mut element = Element::new("uid", 1, "Wall");
        element.parameters = vec![Parameter {
            definition: Some(ParameterDefinition {
                name: "Flag".to_string(),
                parameter_type: ParameterType::YesNo,
            }),
            value: ParameterValue::String(Some("yes".into())),
        }];
        assert_eq!(render(&element)["Flag"], "yes");
    }
}
