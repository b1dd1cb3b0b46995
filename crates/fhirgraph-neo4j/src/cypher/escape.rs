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

//! Cypher string escaping and identifier validation utilities.
//!
//! Two families live here. The string-value escapers (`escape_string`,
//! `quote_string`, `escape_identifier`) render option maps and parameters.
//! The bundle literal escapers (`escape_literal`, `escape_legacy_literal`)
//! turn a whole compact JSON document into text that can sit between a pair
//! of double quotes inside a generated query.

use std::borrow::Cow;

/// Check if a string needs escaping for Cypher queries.
#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars().any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string value for use in Cypher queries.
///
/// Returns `Cow::Borrowed` when nothing needs escaping.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_string;
/// let clean = escape_string("r4");
/// assert!(matches!(clean, std::borrow::Cow::Borrowed(_)));
///
/// let dirty = escape_string("it's");
/// assert_eq!(dirty, "it\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value for Cypher with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Escape compact JSON text for embedding in a double-quoted Cypher literal.
///
/// Backslashes, single quotes and double quotes are backslash-escaped; raw
/// newlines are deleted. Callers strip newlines from the document's string
/// values beforehand (see [`Bundle::strip_newlines`](crate::Bundle::strip_newlines)),
/// so the JSON `\n` escape never reaches this function and the literal
/// unescapes to exactly the input.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_literal;
/// assert_eq!(escape_literal(r#"{"a":"it's"}"#), r#"{\"a\":\"it\'s\"}"#);
/// assert_eq!(escape_literal(r#"{"p":"C:\\x"}"#), r#"{\"p\":\"C:\\\\x\"}"#);
/// ```
pub fn escape_literal(json: &str) -> Cow<'_, str> {
    if !json.chars().any(|c| matches!(c, '\\' | '\'' | '"' | '\n')) {
        return Cow::Borrowed(json);
    }

    let mut escaped = String::with_capacity(json.len() + json.len() / 4);
    for c in json.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => {}
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Escape compact JSON text with plain quote and newline replacements.
///
/// Single and double quotes are backslash-escaped, then raw newlines and
/// every two-character `\n` sequence are deleted. Backslashes already in the
/// text are not escaped, so a value containing `"` or `\` can terminate the
/// literal early. Only use this for compatibility with existing imports.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_legacy_literal;
/// assert_eq!(escape_legacy_literal(r#"{"a":"x\ny"}"#), r#"{\"a\":\"xy\"}"#);
/// ```
pub fn escape_legacy_literal(json: &str) -> String {
    json.replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('\n', "")
        .replace("\\n", "")
}

/// Wrap already-escaped text in a pair of double quotes.
pub fn quote_literal(escaped: &str) -> String {
    format!("\"{}\"", escaped)
}

/// Check if a string is a valid Cypher identifier.
///
/// Valid identifiers start with a letter or underscore, and contain only
/// letters, digits, and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Escape an identifier for Cypher using backticks if needed.
///
/// Control characters are dropped. Identifiers that are not plain
/// `[A-Za-z_][A-Za-z0-9_]*` or collide with a keyword are backtick-quoted.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_identifier;
/// assert_eq!(escape_identifier("validation"), "validation");
/// assert_eq!(escape_identifier("profile-version"), "`profile-version`");
/// assert_eq!(escape_identifier("MATCH"), "`MATCH`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    let sanitized: String = s.chars().filter(|c| !c.is_control()).collect();

    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Check if a string is a Cypher reserved keyword.
fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "AS"
            | "ASC"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DETACH"
            | "DISTINCT"
            | "ELSE"
            | "END"
            | "EXISTS"
            | "FALSE"
            | "IN"
            | "IS"
            | "LIMIT"
            | "MATCH"
            | "MERGE"
            | "NOT"
            | "NULL"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SKIP"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNWIND"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}
