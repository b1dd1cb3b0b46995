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

//! Configuration types for bundle loading.

use crate::bundle::{DEFAULT_MAX_FILE_SIZE, DEFAULT_NARRATIVE_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default FHIR profile version passed to the bulk-import procedure.
pub const DEFAULT_PROFILE_VERSION: &str = "r4";

/// How the bundle reaches the bulk-import procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryMode {
    /// Bind the bundle JSON as the `$bundle` query parameter.
    #[default]
    Parameterized,
    /// Splice a strictly escaped literal into the query text.
    Literal,
    /// Splice a literal escaped with quote-only replacements.
    LegacyLiteral,
}

impl QueryMode {
    /// Escape mode used when this mode embeds a literal.
    pub fn escape_mode(self) -> Option<EscapeMode> {
        match self {
            QueryMode::Parameterized => None,
            QueryMode::Literal => Some(EscapeMode::Strict),
            QueryMode::LegacyLiteral => Some(EscapeMode::Legacy),
        }
    }
}

/// How bundle text is escaped for a double-quoted Cypher literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapeMode {
    /// Escape backslashes and quotes; strip newlines from values first.
    #[default]
    Strict,
    /// Escape quotes only and delete newline sequences from the text.
    Legacy,
}

/// Configuration for loading bundles into Neo4j.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// How the bundle is passed to the import procedure (default: parameterized).
    pub query_mode: QueryMode,

    /// Ask the import procedure to validate bundles (default: true).
    pub validation: bool,

    /// FHIR profile version tag (default: "r4").
    pub profile_version: String,

    /// Text written over narrative `div` fields.
    pub narrative_placeholder: String,

    /// Per-bundle query timeout (default: None, wait forever).
    pub timeout: Option<Duration>,

    /// Maximum bundle file size in bytes (default: 1 GB).
    pub max_file_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            query_mode: QueryMode::Parameterized,
            validation: true,
            profile_version: DEFAULT_PROFILE_VERSION.to_string(),
            narrative_placeholder: DEFAULT_NARRATIVE_PLACEHOLDER.to_string(),
            timeout: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl LoaderConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> LoaderConfigBuilder {
        LoaderConfigBuilder::default()
    }

    /// Set the query mode.
    pub fn with_query_mode(mut self, mode: QueryMode) -> Self {
        self.query_mode = mode;
        self
    }

    /// Disable validation by the import procedure.
    pub fn without_validation(mut self) -> Self {
        self.validation = false;
        self
    }

    /// Set the FHIR profile version tag.
    pub fn with_profile_version(mut self, version: impl Into<String>) -> Self {
        self.profile_version = version.into();
        self
    }

    /// Set the narrative placeholder text.
    pub fn with_narrative_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.narrative_placeholder = placeholder.into();
        self
    }

    /// Set a per-bundle query timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum bundle file size in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

/// Builder for [`LoaderConfig`].
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::{LoaderConfig, QueryMode};
/// # use std::time::Duration;
/// let config = LoaderConfig::builder()
///     .query_mode(QueryMode::Literal)
///     .timeout(Duration::from_secs(30))
///     .build();
/// assert!(config.validation);
/// ```
#[derive(Debug, Default)]
pub struct LoaderConfigBuilder {
    query_mode: Option<QueryMode>,
    validation: Option<bool>,
    profile_version: Option<String>,
    narrative_placeholder: Option<String>,
    timeout: Option<Duration>,
    max_file_size: Option<u64>,
}

impl LoaderConfigBuilder {
    /// Set the query mode.
    pub fn query_mode(mut self, mode: QueryMode) -> Self {
        self.query_mode = Some(mode);
        self
    }

    /// Enable or disable validation by the import procedure.
    pub fn validation(mut self, validation: bool) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Set the FHIR profile version tag.
    pub fn profile_version(mut self, version: impl Into<String>) -> Self {
        self.profile_version = Some(version.into());
        self
    }

    /// Set the narrative placeholder text.
    pub fn narrative_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.narrative_placeholder = Some(placeholder.into());
        self
    }

    /// Set a per-bundle query timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum bundle file size in bytes.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Build the configuration, falling back to defaults for unset fields.
    pub fn build(self) -> LoaderConfig {
        let defaults = LoaderConfig::default();
        LoaderConfig {
            query_mode: self.query_mode.unwrap_or(defaults.query_mode),
            validation: self.validation.unwrap_or(defaults.validation),
            profile_version: self.profile_version.unwrap_or(defaults.profile_version),
            narrative_placeholder: self
                .narrative_placeholder
                .unwrap_or(defaults.narrative_placeholder),
            timeout: self.timeout.or(defaults.timeout),
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
        }
    }
}
