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

//! FHIR bundle documents.
//!
//! A [`Bundle`] is a JSON tree whose root object carries an `entry` array.
//! Each entry holds a `resource` which may carry a `text` narrative with an
//! XHTML `div`. The graph import has no use for the narrative, so it is
//! replaced by a placeholder before serialization.

use crate::error::{LoadError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default text written over every narrative `div`.
pub const DEFAULT_NARRATIVE_PLACEHOLDER: &str = "Removed 'div' for Neo4j";

/// Default maximum bundle file size (1 GB).
///
/// Can be overridden via the `FHIRGRAPH_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Get the maximum bundle file size from the environment or use the default.
pub fn max_file_size_from_env() -> u64 {
    std::env::var("FHIRGRAPH_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// A parsed FHIR bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    root: Value,
}

impl Bundle {
    /// Wrap a JSON value, checking that it carries an `entry` array.
    pub fn from_value(root: Value) -> Result<Self> {
        match root.get("entry") {
            Some(Value::Array(_)) => Ok(Self { root }),
            Some(other) => Err(LoadError::malformed(format!(
                "'entry' must be an array, found {}",
                json_kind(other)
            ))),
            None if root.is_object() => {
                Err(LoadError::malformed("missing 'entry' collection"))
            }
            None => Err(LoadError::malformed(format!(
                "bundle root must be an object, found {}",
                json_kind(&root)
            ))),
        }
    }

    /// Parse bundle JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(root)
    }

    /// Read and parse a bundle file, rejecting files larger than `max_size` bytes.
    pub fn read(path: &Path, max_size: u64) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| LoadError::io_error(path, e))?;
        if metadata.len() > max_size {
            return Err(LoadError::FileTooLarge {
                path: path.to_path_buf(),
                actual: metadata.len(),
                max: max_size,
            });
        }

        let text = fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
        Self::parse(&text)
    }

    /// Number of entries in the bundle.
    pub fn entry_count(&self) -> usize {
        self.entries().map(|e| e.len()).unwrap_or(0)
    }

    fn entries(&self) -> Option<&Vec<Value>> {
        self.root.get("entry").and_then(Value::as_array)
    }

    /// Replace the narrative `div` of every entry that has a `text` field.
    ///
    /// Entries without a `resource`, or whose resource has no `text` or an
    /// empty one (`null`, `false`, `0`, `""`, `[]`, `{}`), are left untouched.
    /// Returns the number of narratives replaced.
    pub fn strip_narrative(&mut self, placeholder: &str) -> Result<usize> {
        let entries = self
            .root
            .get_mut("entry")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| LoadError::malformed("missing 'entry' collection"))?;

        let mut replaced = 0;
        for (index, entry) in entries.iter_mut().enumerate() {
            let Some(text) = entry.get_mut("resource").and_then(|r| r.get_mut("text")) else {
                continue;
            };
            if is_empty_value(text) {
                continue;
            }
            match text {
                Value::Object(fields) => {
                    fields.insert("div".to_string(), Value::String(placeholder.to_string()));
                    replaced += 1;
                }
                other => {
                    return Err(LoadError::malformed(format!(
                        "entry {}: resource 'text' must be an object, found {}",
                        index,
                        json_kind(other)
                    )));
                }
            }
        }
        Ok(replaced)
    }

    /// Remove newline characters from every string value and object key.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MalformedBundle`] if two keys of one object become
    /// equal once their newlines are removed. The offending object is left
    /// as it was.
    pub fn strip_newlines(&mut self) -> Result<()> {
        strip_newlines_in(&mut self.root)
    }

    /// Compact JSON text of the bundle.
    pub fn to_canonical_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    /// Borrow the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consume the bundle, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.root
    }
}

fn strip_newlines_in(value: &mut Value) -> Result<()> {
    match value {
        Value::String(s) => {
            if s.contains('\n') {
                s.retain(|c| c != '\n');
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_newlines_in(item)?;
            }
        }
        Value::Object(map) => {
            if map.keys().any(|k| k.contains('\n')) {
                let mut seen = HashSet::with_capacity(map.len());
                for key in map.keys() {
                    let stripped = key.replace('\n', "");
                    if !seen.insert(stripped) {
                        return Err(LoadError::malformed(format!(
                            "key {:?} collides with another key once newlines are removed",
                            key
                        )));
                    }
                }
                let old = std::mem::take(map);
                for (key, v) in old {
                    map.insert(key.replace('\n', ""), v);
                }
            }
            for v in map.values_mut() {
                strip_newlines_in(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// `null`, `false`, zero, and empty strings, arrays or objects.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
