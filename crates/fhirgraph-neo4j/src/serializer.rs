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

//! Bundle serialization for the bulk-import procedure.
//!
//! Serialization mutates the bundle in place: narratives are replaced by the
//! placeholder (and, in strict mode, newlines are dropped from string values)
//! before the compact JSON text is produced.

use crate::bundle::{Bundle, DEFAULT_NARRATIVE_PLACEHOLDER};
use crate::config::EscapeMode;
use crate::cypher::{escape_legacy_literal, escape_literal, quote_literal};
use crate::error::Result;

/// Turns bundles into query-safe text.
#[derive(Debug, Clone)]
pub struct BundleSerializer {
    placeholder: String,
    escape: EscapeMode,
}

impl Default for BundleSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_NARRATIVE_PLACEHOLDER, EscapeMode::Strict)
    }
}

impl BundleSerializer {
    /// Create a serializer with the given narrative placeholder and escape mode.
    pub fn new(placeholder: impl Into<String>, escape: EscapeMode) -> Self {
        Self {
            placeholder: placeholder.into(),
            escape,
        }
    }

    /// The placeholder written over narrative `div` fields.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The escape mode used for literals.
    pub fn escape_mode(&self) -> EscapeMode {
        self.escape
    }

    /// Replace narratives and return the compact JSON text.
    ///
    /// This is the form bound as a query parameter; no escaping is applied.
    pub fn to_json(&self, bundle: &mut Bundle) -> Result<String> {
        bundle.strip_narrative(&self.placeholder)?;
        bundle.to_canonical_string()
    }

    /// Replace narratives and return a double-quoted literal that can be
    /// spliced into a Cypher query.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fhirgraph_neo4j::{Bundle, BundleSerializer};
    /// let mut bundle = Bundle::parse(
    ///     r#"{"entry": [{"resource": {"text": {"div": "<div>x</div>"}}}]}"#,
    /// ).unwrap();
    /// let literal = BundleSerializer::default().to_literal(&mut bundle).unwrap();
    /// assert_eq!(
    ///     literal,
    ///     r#""{\"entry\":[{\"resource\":{\"text\":{\"div\":\"Removed \'div\' for Neo4j\"}}}]}""#
    /// );
    /// ```
    pub fn to_literal(&self, bundle: &mut Bundle) -> Result<String> {
        bundle.strip_narrative(&self.placeholder)?;

        let escaped = match self.escape {
            EscapeMode::Strict => {
                bundle.strip_newlines()?;
                escape_literal(&bundle.to_canonical_string()?).into_owned()
            }
            EscapeMode::Legacy => escape_legacy_literal(&bundle.to_canonical_string()?),
        };

        Ok(quote_literal(&escaped))
    }
}

/// Serialize a bundle to a strict literal with the default placeholder.
pub fn format_bundle(bundle: &mut Bundle) -> Result<String> {
    BundleSerializer::default().to_literal(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use serde_json::json;

    fn bundle_with_narrative() -> Bundle {
        Bundle::from_value(json!({
            "resourceType": "Bundle",
            "entry": [{
                "resource": {
                    "resourceType": "Patient",
                    "name": [{"family": "O'Brien"}],
                    "text": {"status": "generated", "div": "<div xmlns=\"http://www.w3.org/1999/xhtml\">Secret\nhistory</div>"}
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_literal_replaces_narrative() {
        let mut bundle = bundle_with_narrative();
        let literal = format_bundle(&mut bundle).unwrap();
        assert!(!literal.contains("Secret"));
        assert!(literal.contains(r"Removed \'div\' for Neo4j"));
    }

    #[test]
    fn test_literal_is_wrapped_once() {
        let mut bundle = bundle_with_narrative();
        let literal = format_bundle(&mut bundle).unwrap();
        assert!(literal.starts_with('"') && literal.ends_with('"'));
        assert!(!literal[1..literal.len() - 1].starts_with('"'));
        assert!(!literal.contains('\n'));
    }

    #[test]
    fn test_literal_escapes_quotes() {
        let mut bundle = bundle_with_narrative();
        let literal = format_bundle(&mut bundle).unwrap();
        assert!(literal.contains(r"O\'Brien"));
        assert!(literal.contains(r#"\"family\""#));
    }

    #[test]
    fn test_strict_literal_strips_value_newlines() {
        let mut bundle =
            Bundle::parse(r#"{"entry": [{"resource": {"note": "line1\nline2"}}]}"#).unwrap();
        let literal = format_bundle(&mut bundle).unwrap();
        assert!(literal.contains("line1line2"));
        assert!(!literal.contains("\\n"));
    }

    #[test]
    fn test_strict_literal_rejects_keys_colliding_after_newline_removal() {
        let mut bundle =
            Bundle::parse(r#"{"entry": [{"resource": {"a\n": 1, "a": 2}}]}"#).unwrap();
        let err = format_bundle(&mut bundle).unwrap_err();
        assert!(matches!(err, LoadError::MalformedBundle(_)));
    }

    #[test]
    fn test_legacy_literal_replacements() {
        let mut bundle =
            Bundle::parse(r#"{"entry": [{"resource": {"note": "line1\nline2", "text": {"div": "d"}}}]}"#)
                .unwrap();
        let serializer = BundleSerializer::new(DEFAULT_NARRATIVE_PLACEHOLDER, EscapeMode::Legacy);
        let literal = serializer.to_literal(&mut bundle).unwrap();
        assert_eq!(
            literal,
            r#""{\"entry\":[{\"resource\":{\"note\":\"line1line2\",\"text\":{\"div\":\"Removed \'div\' for Neo4j\"}}}]}""#
        );
    }

    #[test]
    fn test_serializing_twice_is_stable() {
        let mut bundle = bundle_with_narrative();
        let first = format_bundle(&mut bundle).unwrap();
        let second = format_bundle(&mut bundle).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_to_json_is_unescaped() {
        let mut bundle = bundle_with_narrative();
        let text = BundleSerializer::default().to_json(&mut bundle).unwrap();
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            back["entry"][0]["resource"]["text"]["div"],
            DEFAULT_NARRATIVE_PLACEHOLDER
        );
        assert_eq!(back["entry"][0]["resource"]["name"][0]["family"], "O'Brien");
    }

    #[test]
    fn test_custom_placeholder() {
        let mut bundle = bundle_with_narrative();
        let serializer = BundleSerializer::new("narrative removed for graph import", EscapeMode::Strict);
        let literal = serializer.to_literal(&mut bundle).unwrap();
        assert!(literal.contains("narrative removed for graph import"));
        assert_eq!(serializer.placeholder(), "narrative removed for graph import");
    }
}
