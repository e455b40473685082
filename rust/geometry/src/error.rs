// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Face is not planar: deviation {0:.6} exceeds tolerance")]
    NonPlanarFace(f64),

    #[error("Degenerate curve: {0}")]
    DegenerateCurve(String),

    #[error("Host model error: {0}")]
    CoreError(#[from] bim_json_core::Error),
}

impl From<Error> for bim_json_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::CoreError(inner) => inner,
            Error::DegenerateCurve(msg) => bim_json_core::Error::curve(msg),
            other => bim_json_core::Error::triangulation(other.to_string()),
        }
    }
}
