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

//! Bundle file discovery and naming.

use crate::error::{LoadError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// List the `*.json` files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// - [`LoadError::DirectoryNotFound`] if `dir` is not a directory
/// - [`LoadError::Io`] if the directory cannot be listed
/// - [`LoadError::NoBundlesFound`] if no bundle files are present
pub fn discover_bundles(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut bundles = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| LoadError::io_error(dir, e))? {
        let path = entry.map_err(|e| LoadError::io_error(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            bundles.push(path);
        }
    }

    if bundles.is_empty() {
        return Err(LoadError::NoBundlesFound(dir.to_path_buf()));
    }

    bundles.sort();
    tracing::debug!(dir = %dir.display(), count = bundles.len(), "discovered bundles");
    Ok(bundles)
}

/// Derive a log-friendly patient label from a bundle file name.
///
/// The file name is split on `_` and its first two tokens are joined with a
/// space. Names with a single token are returned whole.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::patient_identifier;
/// # use std::path::Path;
/// assert_eq!(patient_identifier(Path::new("/data/42_doe_bundle.json")), "42 doe");
/// assert_eq!(patient_identifier(Path::new(r"C:\fhir\Aaron697_Brekke496_2fa1.json")), "Aaron697 Brekke496");
/// ```
pub fn patient_identifier(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let file_name = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    file_name.split('_').take(2).collect::<Vec<_>>().join(" ")
}
