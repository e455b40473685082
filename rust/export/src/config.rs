// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export configuration loaded from environment variables.

use bim_json_core::GeometryOptions;
use bim_json_geometry::KernelSettings;

use crate::format::FormatOptions;

/// Export configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Number formatting of geometry arrays.
    pub format: FormatOptions,
    /// Options passed to the host when requesting element geometry.
    pub geometry: GeometryOptions,
    /// Maximum chord deviation for the reference kernel's arc tessellation.
    pub chord_tolerance: f64,
}

impl ExportConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            format: FormatOptions {
                coord_precision: std::env::var("BIM_JSON_COORD_PRECISION")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.format.coord_precision),
                coord_width: std::env::var("BIM_JSON_COORD_WIDTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.format.coord_width),
                index_width: std::env::var("BIM_JSON_INDEX_WIDTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.format.index_width),
            },
            geometry: defaults.geometry,
            chord_tolerance: std::env::var("BIM_JSON_CHORD_TOLERANCE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|t| t.is_finite() && *t > 0.0)
                .unwrap_or(defaults.chord_tolerance),
        }
    }

    /// Kernel settings derived from this configuration.
    pub fn kernel_settings(&self) -> KernelSettings {
        KernelSettings {
            chord_tolerance: self.chord_tolerance,
            ..KernelSettings::default()
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: FormatOptions::default(),
            geometry: GeometryOptions::full_fidelity(),
            chord_tolerance: KernelSettings::default().chord_tolerance,
        }
    }
}
