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

//! Integration tests against a real Neo4j instance with the cyfhir plugin.
//!
//! Connection settings come from `NEO4J_URI`, `NEO4J_USER` and `NEO4J_PASSWORD`.
//! Run with: cargo test -p fhirgraph-neo4j --features integration-tests --test integration_tests

#![cfg(feature = "integration-tests")]

use fhirgraph_neo4j::{
    discover_bundles, BatchLoader, ConnectionSettings, CypherStatement, LoaderConfig, Neo4jExecutor,
    QueryExecutor, QueryMode, RecordingReporter,
};
use serial_test::serial;
use std::fs;
use std::time::Duration;

const SAMPLE_BUNDLE: &str = r#"{
  "resourceType": "Bundle",
  "type": "transaction",
  "entry": [
    {
      "fullUrl": "urn:uuid:8f6d7a2e-5c1b-4b6a-9a1e-000000000001",
      "resource": {
        "resourceType": "Patient",
        "id": "8f6d7a2e-5c1b-4b6a-9a1e-000000000001",
        "text": {"status": "generated", "div": "<div xmlns=\"http://www.w3.org/1999/xhtml\">Generated</div>"},
        "name": [{"use": "official", "family": "O'Brien", "given": ["Siobhan"]}],
        "gender": "female",
        "birthDate": "1970-01-01"
      },
      "request": {"method": "POST", "url": "Patient"}
    }
  ]
}"#;

/// Helper to build connection settings from the environment.
fn settings() -> ConnectionSettings {
    let uri = std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
    let user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
    let password = std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "".to_string());
    ConnectionSettings::new(uri, user, password)
}

fn executor() -> Neo4jExecutor {
    Neo4jExecutor::new(settings())
        .expect("Failed to create executor")
        .with_timeout(Some(Duration::from_secs(60)))
}

/// Helper to clean up test data.
fn cleanup(executor: &Neo4jExecutor) {
    executor
        .execute(&CypherStatement::new("MATCH (n) DETACH DELETE n"))
        .expect("Failed to cleanup");
}

fn count_patients(executor: &Neo4jExecutor) -> i64 {
    let rows = executor
        .execute(&CypherStatement::new("MATCH (p:Patient) RETURN count(p) AS total"))
        .expect("Failed to count patients");
    rows[0]["total"].as_i64().unwrap_or_default()
}

fn load_sample(mode: QueryMode) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("42_obrien_bundle.json"), SAMPLE_BUNDLE).unwrap();
    let files = discover_bundles(dir.path()).unwrap();

    let db = executor();
    cleanup(&db);

    let config = LoaderConfig::default().with_query_mode(mode);
    let loader = BatchLoader::new(&db, &config);
    let mut reporter = RecordingReporter::new();
    let summary = loader.load_all(&files, &mut reporter);

    assert!(summary.all_succeeded(), "{:?}", reporter.lines);
    assert!(reporter.lines[0].starts_with("Loaded patient '42 obrien'"));
    assert_eq!(count_patients(&db), 1);
}

#[test]
#[serial]
fn test_parameterized_load() {
    load_sample(QueryMode::Parameterized);
}

#[test]
#[serial]
fn test_literal_load() {
    load_sample(QueryMode::Literal);
}

#[test]
#[serial]
fn test_parameter_round_trip() {
    let db = executor();
    let statement = CypherStatement::new("RETURN $value AS value").with_param("value", "O'Brien");
    let rows = db.execute(&statement).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["value"], serde_json::json!("O'Brien"));
}

#[test]
#[serial]
fn test_invalid_bundle_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("7_bad_bundle.json"),
        r#"{"resourceType": "Bundle", "entry": [{"resource": {"resourceType": "NotAResource"}}]}"#,
    )
    .unwrap();
    let files = discover_bundles(dir.path()).unwrap();

    let db = executor();
    let loader = BatchLoader::new(&db, &LoaderConfig::default());
    let summary = loader.load_all(&files, &mut RecordingReporter::new());

    assert_eq!(summary.failed_count(), 1);
    assert_eq!(summary.total_secs, 0.0);
}
