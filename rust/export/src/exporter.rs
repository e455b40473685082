// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document export orchestration
//!
//! Enumerates the exportable elements of a host document, serializes each
//! into one entry of the output map and collects the diagnostic log.

use std::path::Path;
use std::time::{Duration, Instant};

use bim_json_core::{
    Element, ElementClass, ElementContext, ElementId, ExportLog, GeometryKernel, HostDocument,
    Outcome, Transform,
};
use bim_json_geometry::{serialize_geometry, SerializedGeometry};

use crate::attributes::flatten_attributes;
use crate::config::ExportConfig;
use crate::format::JsonWriter;
use crate::geometry::write_geometry;
use crate::materials::{resolve_materials, write_materials};
use crate::{Error, Result};

/// Default output file name for a document path or title
///
/// `<stem>.json`, or `Untitled.json` for documents that were never saved.
pub fn default_output_name(title: &str) -> String {
    match Path::new(title.trim()).file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.is_empty() => format!("{}.json", stem),
        _ => "Untitled.json".to_string(),
    }
}

/// Per-element result
#[derive(Debug, Clone, PartialEq)]
pub struct ElementOutcome {
    pub id: ElementId,
    pub unique_id: String,
    /// Geometry sub-operations attempted and succeeded
    pub geometry: Outcome,
    /// Number of materials written
    pub materials: usize,
    /// Attributes are always written
    pub attributes: bool,
}

impl ElementOutcome {
    pub fn is_success(&self) -> bool {
        self.geometry.is_success() || self.materials > 0 || self.attributes
    }
}

/// Summary of one export run
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub elements: Vec<ElementOutcome>,
    /// Geometry sub-operations over all elements
    pub geometry: Outcome,
    pub elapsed: Duration,
    pub log: ExportLog,
}

impl ExportReport {
    /// Logical OR of the per-element results
    pub fn is_success(&self) -> bool {
        self.elements.iter().any(ElementOutcome::is_success)
    }

    /// Text shown to the user: failure lines, elapsed time, pass/fail
    pub fn summary(&self) -> String {
        format!(
            "{}Elapsed {:.1}sec\n{}\n",
            self.log,
            self.elapsed.as_secs_f64(),
            if self.is_success() { "Success" } else { "Failure" }
        )
    }
}

/// Result of [`Exporter::export_to_string`]
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub json: String,
    pub report: ExportReport,
}

/// Exports a host document through a geometry kernel
pub struct Exporter<'a, D: HostDocument + ?Sized, K: GeometryKernel + ?Sized> {
    document: &'a D,
    kernel: &'a K,
    config: ExportConfig,
}

impl<'a, D: HostDocument + ?Sized, K: GeometryKernel + ?Sized> Exporter<'a, D, K> {
    pub fn new(document: &'a D, kernel: &'a K) -> Self {
        Self {
            document,
            kernel,
            config: ExportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Elements in enumeration order, minus type elements and the first family
    pub fn exported_elements(&self) -> Vec<&'a Element> {
        let mut family_skipped = false;
        self.document
            .elements()
            .filter(|element| match element.class {
                ElementClass::Family if !family_skipped => {
                    family_skipped = true;
                    false
                }
                ref class => !class.is_type(),
            })
            .collect()
    }

    /// Build the whole document in memory
    pub fn export_to_string(&self) -> Result<ExportOutput> {
        let start = Instant::now();
        let elements = self.exported_elements();

        tracing::info!(
            title = self.document.title(),
            elements = elements.len(),
            "Exporting document"
        );

        let mut writer = JsonWriter::new(self.config.format);
        let mut log = ExportLog::new();
        let mut outcomes = Vec::with_capacity(elements.len());

        writer.begin_object(None)?;
        for element in elements {
            outcomes.push(self.write_element(&mut writer, element, &mut log)?);
        }
        writer.end()?;
        let json = writer.finish()?;

        let report = ExportReport {
            geometry: outcomes.iter().map(|o| o.geometry).sum(),
            elements: outcomes,
            elapsed: start.elapsed(),
            log,
        };

        tracing::info!(
            elements = report.elements.len(),
            attempted = report.geometry.attempted,
            failed = report.geometry.failed(),
            bytes = json.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Export complete"
        );

        Ok(ExportOutput { json, report })
    }

    /// Build the document and write it to `path` as UTF-8
    pub fn export_to_path(&self, path: impl AsRef<Path>) -> Result<ExportReport> {
        let path = path.as_ref();
        let output = self.export_to_string()?;
        std::fs::write(path, output.json.as_bytes()).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), "Wrote export");
        Ok(output.report)
    }

    fn write_element(
        &self,
        writer: &mut JsonWriter,
        element: &Element,
        log: &mut ExportLog,
    ) -> Result<ElementOutcome> {
        writer.begin_object(Some(&element.unique_id))?;

        let (geometry, materials) = match self.document.geometry(element, &self.config.geometry) {
            Some(tree) => {
                let serialized = serialize_geometry(
                    self.kernel,
                    &tree,
                    &Transform::identity(),
                    ElementContext::from(element),
                    log,
                );
                write_geometry(writer, &serialized.records)?;

                let resolved = resolve_materials(self.document, element, &tree)?;
                write_materials(writer, &resolved)?;
                (serialized.outcome, resolved.len())
            }
            None => {
                write_geometry(writer, &SerializedGeometry::empty().records)?;
                write_materials(writer, &[])?;
                (Outcome::default(), 0)
            }
        };

        flatten_attributes(writer, element)?;
        writer.end()?;

        tracing::trace!(
            element_id = element.id.value(),
            attempted = geometry.attempted,
            succeeded = geometry.succeeded,
            materials,
            "Exported element"
        );

        Ok(ElementOutcome {
            id: element.id,
            unique_id: element.unique_id.clone(),
            geometry,
            materials,
            attributes: true,
        })
    }
}
