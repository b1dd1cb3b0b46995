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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BUNDLE: &str = r#"{
  "resourceType": "Bundle",
  "type": "transaction",
  "entry": [
    {
      "resource": {
        "resourceType": "Patient",
        "text": {"status": "generated", "div": "<div>Jane Doe</div>"},
        "name": [{"family": "Doe", "given": ["Jane"]}]
      }
    }
  ]
}"#;

// Test helper to create a fhirgraph command
fn fhirgraph_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fhirgraph").expect("Failed to find fhirgraph binary");
    cmd.env_remove("NEO4J_URI")
        .env_remove("NEO4J_USER")
        .env_remove("NEO4J_PASSWORD")
        .env_remove("NEO4J_DATABASE");
    cmd
}

// Test helper to create a bundle directory
fn bundle_dir(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for name in names {
        fs::write(dir.path().join(name), BUNDLE).expect("Failed to write bundle");
    }
    dir
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    fhirgraph_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FHIR Graph - load FHIR bundles into Neo4j"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn test_version_output() {
    fhirgraph_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fhirgraph"));
}

#[test]
fn test_no_subcommand_fails() {
    fhirgraph_cmd().assert().failure();
}

#[test]
fn test_load_help_lists_options() {
    fhirgraph_cmd()
        .args(["load", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--fhir-folder"))
        .stdout(predicate::str::contains("--mode"))
        .stdout(predicate::str::contains("legacy-literal"))
        .stdout(predicate::str::contains("NEO4J_PASSWORD"));
}

// ===== Render Command Tests =====

#[test]
fn test_render_parameterized() {
    let dir = bundle_dir(&["42_doe_bundle.json"]);

    fhirgraph_cmd()
        .arg("render")
        .arg(dir.path().join("42_doe_bundle.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("CALL cyfhir.bundle.load('"))
        .stdout(predicate::str::contains("Removed \\'div\\' for Neo4j"))
        .stdout(predicate::str::contains("Jane Doe").not());
}

#[test]
fn test_render_literal_without_validation() {
    let dir = bundle_dir(&["42_doe_bundle.json"]);

    fhirgraph_cmd()
        .arg("render")
        .arg(dir.path().join("42_doe_bundle.json"))
        .args(["--mode", "literal", "--no-validation", "--placeholder", "n/a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CALL cyfhir.bundle.load(\"{"))
        .stdout(predicate::str::contains(r#"\"div\":\"n/a\""#))
        .stdout(predicate::str::contains("{validation: false, version: 'r4'});"));
}

#[test]
fn test_render_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    fhirgraph_cmd()
        .arg("render")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_render_unknown_mode() {
    let dir = bundle_dir(&["1_a_x.json"]);

    fhirgraph_cmd()
        .arg("render")
        .arg(dir.path().join("1_a_x.json"))
        .args(["--mode", "inline"])
        .assert()
        .failure();
}

// ===== Load Command Tests =====

#[test]
fn test_load_missing_directory() {
    fhirgraph_cmd()
        .args(["load", "--fhir-folder", "/nonexistent/fhir", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_load_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("readme.txt"), "no bundles here").unwrap();

    fhirgraph_cmd()
        .arg("load")
        .arg("--fhir-folder")
        .arg(dir.path())
        .args(["--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no FHIR bundles"));
}

#[test]
fn test_load_requires_password() {
    let dir = bundle_dir(&["1_a_x.json"]);

    fhirgraph_cmd()
        .arg("load")
        .arg("--fhir-folder")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));
}

#[test]
fn test_load_zero_timeout_rejected() {
    let dir = bundle_dir(&["1_a_x.json"]);

    fhirgraph_cmd()
        .arg("load")
        .arg("--fhir-folder")
        .arg(dir.path())
        .args(["--password", "pw", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn test_load_unreachable_server_is_not_fatal() {
    let dir = bundle_dir(&["1_a_x.json", "2_b_x.json"]);

    fhirgraph_cmd()
        .arg("load")
        .arg("--fhir-folder")
        .arg(dir.path())
        .args(["--uri", "bolt://127.0.0.1:1", "--password", "pw", "--timeout", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 2 FHIR Bundles"))
        .stderr(predicate::str::contains("Failed to load patient '1 a'"))
        .stderr(predicate::str::contains("Failed to load patient '2 b'"))
        .stderr(predicate::str::contains("Loaded 2 patients' medical history FHIR bundles"));
}

#[test]
fn test_load_strict_fails_on_any_error() {
    let dir = bundle_dir(&["1_a_x.json"]);

    fhirgraph_cmd()
        .arg("load")
        .arg("--fhir-folder")
        .arg(dir.path())
        .args(["--uri", "bolt://127.0.0.1:1", "--password", "pw", "--timeout", "5", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 FHIR bundles failed to load"));
}
