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

//! Cypher statement types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Cypher parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Boolean value.
    Bool(bool),
    /// String value.
    String(String),
    /// Map/object value.
    Map(BTreeMap<String, CypherValue>),
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl CypherValue {
    /// Convert to Cypher literal syntax.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CypherValue::String(s) => super::escape::quote_string(s),
            CypherValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            super::escape::escape_identifier(k),
                            v.to_cypher_literal()
                        )
                    })
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }

    /// Try to get as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A single Cypher statement with optional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The Cypher query text.
    pub query: String,
    /// Parameters bound by name at execution time.
    pub parameters: BTreeMap<String, CypherValue>,
    /// Optional comment describing the statement.
    pub comment: Option<String>,
}

impl CypherStatement {
    /// Create a new Cypher statement without parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: BTreeMap::new(),
            comment: None,
        }
    }

    /// Add a parameter to this statement.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add a comment to this statement.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check if this statement has parameters.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Render this statement as a string with embedded values.
    ///
    /// Longer parameter names are substituted first so `$bundle` never
    /// clobbers the prefix of `$bundle_id`.
    pub fn render_inline(&self) -> String {
        let mut names: Vec<&String> = self.parameters.keys().collect();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));

        let mut result = self.query.clone();
        for name in names {
            let placeholder = format!("${}", name);
            result = result.replace(&placeholder, &self.parameters[name].to_cypher_literal());
        }
        result
    }

    /// Format this statement with optional comment prefix.
    ///
    /// This inlines all parameters so the result is directly executable.
    pub fn format(&self, include_comment: bool) -> String {
        let mut lines = Vec::new();

        if include_comment {
            if let Some(comment) = &self.comment {
                lines.push(format!("// {}", comment));
            }
        }

        lines.push(format!("{};", self.render_inline()));

        lines.join("\n")
    }
}
