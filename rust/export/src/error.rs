// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unrecoverable export errors
///
/// Geometry failures never surface here; they are logged per element.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error(transparent)]
    Core(#[from] bim_json_core::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
