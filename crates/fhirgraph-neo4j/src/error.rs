// FHIR Graph - FHIR bundle loading for Neo4j
//
// Copyright (c) 2025 FHIR Graph contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for bundle loading.

use crate::executor::Row;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for bundle serialization and loading operations.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a bundle file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error.
        path: PathBuf,
        /// The error message.
        message: String,
    },

    /// Bundle file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// The file path that exceeded the limit.
        path: PathBuf,
        /// The actual file size in bytes.
        actual: u64,
        /// The maximum allowed file size in bytes.
        max: u64,
    },

    /// Bundle text is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bundle is valid JSON but lacks required structure.
    #[error("malformed bundle: {0}")]
    MalformedBundle(String),

    /// Opening a session with the database failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// The database rejected or failed to run the query.
    #[error("query error: {0}")]
    Query(String),

    /// The row stream failed after some rows were already received.
    #[error("result stream interrupted after {} row(s): {message}", rows.len())]
    Interrupted {
        /// The underlying driver error.
        message: String,
        /// Rows received before the failure.
        rows: Vec<Row>,
    },

    /// A result row could not be decoded.
    #[error("failed to decode result row: {0}")]
    RowDecode(String),

    /// The query did not finish within the configured timeout.
    #[error("query timed out after {seconds} seconds")]
    Timeout {
        /// The configured timeout in seconds.
        seconds: f64,
    },

    /// The bundle directory does not exist or is not a directory.
    #[error("bundle directory '{0}' does not exist")]
    DirectoryNotFound(PathBuf),

    /// The bundle directory contains no `.json` files.
    #[error("no FHIR bundles (*.json) found in '{0}'")]
    NoBundlesFound(PathBuf),
}

impl LoadError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a malformed bundle error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedBundle(msg.into())
    }

    /// Rows that were received before the failure, if any.
    pub fn partial_rows(&self) -> Option<&[Row]> {
        match self {
            LoadError::Interrupted { rows, .. } => Some(rows),
            _ => None,
        }
    }

    /// Whether the error was caused by the input file rather than the database.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LoadError::Io { .. }
                | LoadError::FileTooLarge { .. }
                | LoadError::Json(_)
                | LoadError::MalformedBundle(_)
        )
    }
}

/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
