// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::element::ElementId;

/// Result type for host model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the host model and its geometry kernel
#[derive(Error, Debug)]
pub enum Error {
    #[error("Material {0} is referenced but not present in the document")]
    MissingMaterial(ElementId),

    #[error("Solid tessellation failed: {0}")]
    Tessellation(String),

    #[error("Face triangulation failed: {0}")]
    Triangulation(String),

    #[error("Curve tessellation failed: {0}")]
    CurveTessellation(String),
}

impl Error {
    pub fn tessellation(msg: impl Into<String>) -> Self {
        Error::Tessellation(msg.into())
    }

    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }

    pub fn curve(msg: impl Into<String>) -> Self {
        Error::CurveTessellation(msg.into())
    }
}
