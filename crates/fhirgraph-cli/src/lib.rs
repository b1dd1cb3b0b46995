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

//! FHIR Graph CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **load**: discover the `*.json` bundles in a directory and load each one
//!   through `cyfhir.bundle.load`
//! - **render**: print the import statement for a single bundle (dry run)
//!
//! # Configuration
//!
//! Connection flags fall back to `NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASSWORD`
//! and `NEO4J_DATABASE`. The bundle size limit is read from
//! `FHIRGRAPH_MAX_FILE_SIZE` (bytes, default 1 GB).
//!
//! # Examples
//!
//! ```no_run
//! use fhirgraph_cli::commands::render_statement;
//! use fhirgraph_neo4j::LoaderConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fhirgraph_cli::error::CliError> {
//! let cypher = render_statement(Path::new("42_doe_bundle.json"), &LoaderConfig::default())?;
//! println!("{}", cypher);
//! # Ok(())
//! # }
//! ```
//!
//! # Exit status
//!
//! `load` exits successfully once the batch has run, even if some bundles
//! failed; pass `--strict` to turn any failure into a non-zero exit.

pub mod cli;
pub mod commands;
pub mod error;
