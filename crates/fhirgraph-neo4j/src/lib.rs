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

//! Loading FHIR bundles into Neo4j.
//!
//! This crate turns a directory of FHIR bundle files into one
//! `cyfhir.bundle.load` call per bundle:
//!
//! - [`Bundle`] parses a file and replaces narrative `div` markup with a
//!   placeholder
//! - [`BundleSerializer`] renders a bundle as JSON for a query parameter or
//!   as an escaped literal for splicing into query text
//! - [`ImportStatementBuilder`] builds the procedure call
//! - [`Neo4jExecutor`] runs one statement on a connection scoped to the call
//! - [`BatchLoader`] processes files one by one, isolates failures and sums
//!   the time of successful loads
//!
//! # Query modes
//!
//! | Mode | Bundle reaches the procedure as |
//! |------|---------------------------------|
//! | [`QueryMode::Parameterized`] (default) | `$bundle` parameter |
//! | [`QueryMode::Literal`] | double-quoted literal, backslashes and quotes escaped |
//! | [`QueryMode::LegacyLiteral`] | double-quoted literal, quotes escaped only |
//!
//! # Example
//!
//! ```rust,no_run
//! use fhirgraph_neo4j::{
//!     discover_bundles, BatchLoader, ConnectionSettings, LoaderConfig, Neo4jExecutor,
//!     TracingReporter,
//! };
//! use std::path::Path;
//!
//! fn example() -> Result<(), fhirgraph_neo4j::LoadError> {
//!     let dir = Path::new("./fhir");
//!     let bundles = discover_bundles(dir)?;
//!
//!     let config = LoaderConfig::default();
//!     let settings = ConnectionSettings::new("bolt://localhost:7687", "neo4j", "password");
//!     let executor = Neo4jExecutor::new(settings)?.with_timeout(config.timeout);
//!
//!     let loader = BatchLoader::new(executor, &config);
//!     let mut reporter = TracingReporter::new().with_source(dir);
//!     let summary = loader.load_all(&bundles, &mut reporter);
//!
//!     println!("{} of {} loaded", summary.loaded_count(), summary.discovered);
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bundle;
pub mod config;
pub mod cypher;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod import;
pub mod loader;
pub mod reporter;
pub mod serializer;
pub mod stopwatch;

pub use bundle::{Bundle, DEFAULT_MAX_FILE_SIZE, DEFAULT_NARRATIVE_PLACEHOLDER};
pub use config::{EscapeMode, LoaderConfig, LoaderConfigBuilder, QueryMode, DEFAULT_PROFILE_VERSION};
pub use cypher::{CypherStatement, CypherValue};
pub use discovery::{discover_bundles, patient_identifier};
pub use error::{LoadError, Result};
pub use executor::{ConnectionSettings, Neo4jExecutor, QueryExecutor, Row};
pub use import::{ImportOptions, ImportStatementBuilder, IMPORT_PROCEDURE};
pub use loader::{BatchLoader, BatchSummary, LoadOutcome, LoadResult};
pub use reporter::{LoadReporter, RecordingReporter, TracingReporter};
pub use serializer::{format_bundle, BundleSerializer};
pub use stopwatch::{Clock, Stopwatch, SystemClock};
