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

//! Batch loading of bundle files.
//!
//! Files are processed one at a time in the order given. Each file becomes a
//! [`LoadResult`]; a failure in one file is recorded and the loop moves on.
//!
//! Only successful loads add to the batch's total elapsed time. Time spent on
//! a call that ends in an error is reported on that item but never summed.

use crate::bundle::Bundle;
use crate::config::LoaderConfig;
use crate::discovery::patient_identifier;
use crate::error::LoadError;
use crate::executor::{QueryExecutor, Row};
use crate::import::ImportStatementBuilder;
use crate::reporter::LoadReporter;
use crate::stopwatch::{round_secs, Clock, Stopwatch, SystemClock};
use std::path::{Path, PathBuf};

/// What happened to one bundle file.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The import call succeeded.
    Loaded {
        /// Number of rows the call returned.
        rows: usize,
    },
    /// Reading, serializing or importing failed.
    Failed {
        /// The captured error.
        error: LoadError,
        /// Rows received before the failure, if any.
        partial: Option<Vec<Row>>,
    },
}

/// Result of loading a single bundle file.
#[derive(Debug)]
pub struct LoadResult {
    /// The bundle file.
    pub path: PathBuf,
    /// Patient label derived from the file name.
    pub identifier: String,
    /// Seconds spent in the import call; `None` if the call was never made.
    pub elapsed_secs: Option<f64>,
    /// Success or failure.
    pub outcome: LoadOutcome,
}

impl LoadResult {
    /// Check if the bundle was loaded.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Loaded { .. })
    }

    /// Check if loading failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The error, if loading failed.
    pub fn error(&self) -> Option<&LoadError> {
        match &self.outcome {
            LoadOutcome::Failed { error, .. } => Some(error),
            LoadOutcome::Loaded { .. } => None,
        }
    }

    /// Elapsed seconds counted toward the batch total.
    pub fn counted_secs(&self) -> Option<f64> {
        match self.outcome {
            LoadOutcome::Loaded { .. } => self.elapsed_secs,
            LoadOutcome::Failed { .. } => None,
        }
    }

    /// One-line human readable description.
    pub fn describe(&self) -> String {
        match &self.outcome {
            LoadOutcome::Loaded { .. } => format!(
                "Loaded patient '{}' in {} seconds",
                self.identifier,
                self.elapsed_secs.unwrap_or_default()
            ),
            LoadOutcome::Failed { error, partial } => format!(
                "Failed to load patient '{}': {}; result: {}",
                self.identifier,
                error,
                match partial {
                    Some(rows) => format!("{} partial row(s)", rows.len()),
                    None => "None".to_string(),
                }
            ),
        }
    }
}

/// Aggregated outcome of a batch.
#[derive(Debug)]
pub struct BatchSummary {
    /// Sum of successful load durations, rounded to three decimals.
    pub total_secs: f64,
    /// Number of files handed to the loader.
    pub discovered: usize,
    /// Per-file results, in processing order.
    pub results: Vec<LoadResult>,
}

impl BatchSummary {
    /// Number of bundles loaded.
    pub fn loaded_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of bundles that failed.
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Check if every bundle loaded.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(LoadResult::is_success)
    }

    /// Iterate over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &LoadResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Summary sentence, optionally naming the source directory.
    pub fn describe(&self, source: Option<&Path>) -> String {
        let mut line = format!(
            "In {} seconds... Loaded {} patients' medical history FHIR bundles",
            self.total_secs, self.discovered
        );
        if let Some(dir) = source {
            line.push_str(&format!(" from '{}'", dir.display()));
        }
        line.push('.');
        line
    }
}

/// Drives the read, serialize, import pipeline over a list of files.
#[derive(Debug)]
pub struct BatchLoader<E, C = SystemClock> {
    executor: E,
    statements: ImportStatementBuilder,
    max_file_size: u64,
    clock: C,
}

impl<E: QueryExecutor> BatchLoader<E, SystemClock> {
    /// Create a loader that times calls with the system clock.
    pub fn new(executor: E, config: &LoaderConfig) -> Self {
        Self {
            executor,
            statements: ImportStatementBuilder::new(config),
            max_file_size: config.max_file_size,
            clock: SystemClock::new(),
        }
    }
}

impl<E: QueryExecutor, C: Clock> BatchLoader<E, C> {
    /// Replace the clock used to time import calls.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> BatchLoader<E, C2> {
        BatchLoader {
            executor: self.executor,
            statements: self.statements,
            max_file_size: self.max_file_size,
            clock,
        }
    }

    /// The executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Load a single bundle file.
    pub fn load_one(&self, path: &Path) -> LoadResult {
        let identifier = patient_identifier(path);

        let statement = match Bundle::read(path, self.max_file_size)
            .and_then(|mut bundle| self.statements.build(&mut bundle))
        {
            Ok(statement) => statement,
            Err(error) => {
                return LoadResult {
                    path: path.to_path_buf(),
                    identifier,
                    elapsed_secs: None,
                    outcome: LoadOutcome::Failed {
                        error,
                        partial: None,
                    },
                }
            }
        };

        let watch = Stopwatch::start(&self.clock);
        let result = self.executor.execute(&statement);
        let elapsed = watch.stop();

        let outcome = match result {
            Ok(rows) => LoadOutcome::Loaded { rows: rows.len() },
            Err(error) => {
                let partial = error.partial_rows().map(<[Row]>::to_vec);
                LoadOutcome::Failed { error, partial }
            }
        };

        LoadResult {
            path: path.to_path_buf(),
            identifier,
            elapsed_secs: Some(elapsed),
            outcome,
        }
    }

    /// Load every file in order, reporting each outcome.
    pub fn load_all(&self, paths: &[PathBuf], reporter: &mut dyn LoadReporter) -> BatchSummary {
        let mut total = 0.0;
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            let result = self.load_one(path);
            if let Some(secs) = result.counted_secs() {
                total += secs;
            }
            reporter.report(&result);
            results.push(result);
        }

        let summary = BatchSummary {
            total_secs: round_secs(total),
            discovered: paths.len(),
            results,
        };
        reporter.finish(&summary);
        summary
    }
}
