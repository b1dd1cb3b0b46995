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

//! Bulk-import statement building.
//!
//! Every bundle becomes one call of the `cyfhir.bundle.load` procedure:
//!
//! ```cypher
//! CALL cyfhir.bundle.load($bundle, {validation: true, version: 'r4'})
//! ```
//!
//! In the literal modes `$bundle` is replaced by the serialized literal in
//! the query text itself.

use crate::bundle::Bundle;
use crate::config::{LoaderConfig, QueryMode};
use crate::cypher::{CypherStatement, CypherValue};
use crate::error::Result;
use crate::serializer::BundleSerializer;
use std::collections::BTreeMap;

/// Name of the bulk-import procedure.
pub const IMPORT_PROCEDURE: &str = "cyfhir.bundle.load";

/// Name of the query parameter carrying the bundle in parameterized mode.
pub const BUNDLE_PARAM: &str = "bundle";

/// Options map passed as the procedure's second argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Validate the bundle against the profile before import.
    pub validation: bool,
    /// FHIR profile version tag.
    pub version: String,
}

impl ImportOptions {
    /// Options taken from a loader configuration.
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self {
            validation: config.validation,
            version: config.profile_version.clone(),
        }
    }

    /// The options as a Cypher map value.
    pub fn to_cypher_value(&self) -> CypherValue {
        let mut map = BTreeMap::new();
        map.insert("validation".to_string(), CypherValue::Bool(self.validation));
        map.insert("version".to_string(), CypherValue::from(self.version.as_str()));
        CypherValue::Map(map)
    }
}

/// Builds one import statement per bundle.
#[derive(Debug, Clone)]
pub struct ImportStatementBuilder {
    mode: QueryMode,
    options: ImportOptions,
    serializer: BundleSerializer,
}

impl ImportStatementBuilder {
    /// Create a builder from a loader configuration.
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            mode: config.query_mode,
            options: ImportOptions::from_config(config),
            serializer: BundleSerializer::new(
                config.narrative_placeholder.clone(),
                config.query_mode.escape_mode().unwrap_or_default(),
            ),
        }
    }

    /// The query mode this builder emits.
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Build the import statement for one bundle.
    ///
    /// The bundle's narratives are replaced in place.
    pub fn build(&self, bundle: &mut Bundle) -> Result<CypherStatement> {
        let options = self.options.to_cypher_value().to_cypher_literal();
        let statement = match self.mode {
            QueryMode::Parameterized => {
                let json = self.serializer.to_json(bundle)?;
                CypherStatement::new(format!(
                    "CALL {}(${}, {})",
                    IMPORT_PROCEDURE, BUNDLE_PARAM, options
                ))
                .with_param(BUNDLE_PARAM, json)
            }
            QueryMode::Literal | QueryMode::LegacyLiteral => {
                let literal = self.serializer.to_literal(bundle)?;
                CypherStatement::new(format!("CALL {}({}, {})", IMPORT_PROCEDURE, literal, options))
            }
        };
        Ok(statement.with_comment(format!(
            "Load FHIR bundle with {} entries",
            bundle.entry_count()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> Bundle {
        Bundle::parse(
            r#"{"entry": [{"resource": {"resourceType": "Patient", "text": {"div": "<b>x</b>"}}}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_options_literal() {
        let options = ImportOptions::from_config(&LoaderConfig::default());
        assert_eq!(
            options.to_cypher_value().to_cypher_literal(),
            "{validation: true, version: 'r4'}"
        );
    }

    #[test]
    fn test_parameterized_statement() {
        let builder = ImportStatementBuilder::new(&LoaderConfig::default());
        let stmt = builder.build(&mut bundle()).unwrap();
        assert_eq!(
            stmt.query,
            "CALL cyfhir.bundle.load($bundle, {validation: true, version: 'r4'})"
        );
        let json = stmt.parameters["bundle"].as_str().unwrap();
        assert!(json.contains("Removed 'div' for Neo4j"));
        assert!(!json.contains("<b>"));
    }

    #[test]
    fn test_literal_statement() {
        let config = LoaderConfig::default()
            .with_query_mode(QueryMode::Literal)
            .without_validation()
            .with_profile_version("r5");
        let stmt = ImportStatementBuilder::new(&config).build(&mut bundle()).unwrap();
        assert!(!stmt.has_parameters());
        assert!(stmt.query.starts_with(r#"CALL cyfhir.bundle.load("{\"entry\":"#));
        assert!(stmt.query.ends_with(r#"}", {validation: false, version: 'r5'})"#));
    }

    #[test]
    fn test_legacy_literal_statement() {
        let config = LoaderConfig::default().with_query_mode(QueryMode::LegacyLiteral);
        let stmt = ImportStatementBuilder::new(&config).build(&mut bundle()).unwrap();
        assert!(stmt.query.contains(r"Removed \'div\' for Neo4j"));
    }

    #[test]
    fn test_statement_comment_counts_entries() {
        let stmt = ImportStatementBuilder::new(&LoaderConfig::default())
            .build(&mut bundle())
            .unwrap();
        assert_eq!(stmt.comment.as_deref(), Some("Load FHIR bundle with 1 entries"));
    }
}
