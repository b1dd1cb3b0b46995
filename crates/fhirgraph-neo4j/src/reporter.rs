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

//! Per-item and summary reporting for batch loads.
//!
//! The batch loader never logs directly; it hands every [`LoadResult`] and
//! the final [`BatchSummary`] to a [`LoadReporter`] supplied by the caller.

use crate::loader::{BatchSummary, LoadOutcome, LoadResult};
use std::path::PathBuf;

/// Receives load outcomes as the batch progresses.
pub trait LoadReporter {
    /// Called once per file, in processing order.
    fn report(&mut self, result: &LoadResult);

    /// Called once after the last file.
    fn finish(&mut self, _summary: &BatchSummary) {}
}

/// Forwards outcomes to `tracing` events.
#[derive(Debug, Default, Clone)]
pub struct TracingReporter {
    source: Option<PathBuf>,
}

impl TracingReporter {
    /// Create a reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the directory the bundles came from in the summary line.
    pub fn with_source(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source = Some(dir.into());
        self
    }
}

impl LoadReporter for TracingReporter {
    fn report(&mut self, result: &LoadResult) {
        match &result.outcome {
            LoadOutcome::Loaded { rows } => tracing::info!(
                patient = %result.identifier,
                seconds = result.elapsed_secs.unwrap_or_default(),
                rows = *rows,
                "--- {} ---",
                result.describe()
            ),
            LoadOutcome::Failed { error, partial } => tracing::error!(
                patient = %result.identifier,
                file = %result.path.display(),
                %error,
                input_error = error.is_input_error(),
                partial = ?partial,
                "--- {} ---",
                result.describe()
            ),
        }
    }

    fn finish(&mut self, summary: &BatchSummary) {
        tracing::info!(
            total_seconds = summary.total_secs,
            discovered = summary.discovered,
            loaded = summary.loaded_count(),
            failed = summary.failed_count(),
            "{}",
            summary.describe(self.source.as_deref())
        );
    }
}

/// Keeps every reported line in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    /// One line per reported file.
    pub lines: Vec<String>,
    /// The summary line, once the batch has finished.
    pub summary: Option<String>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoadReporter for RecordingReporter {
    fn report(&mut self, result: &LoadResult) {
        self.lines.push(result.describe());
    }

    fn finish(&mut self, summary: &BatchSummary) {
        self.summary = Some(summary.describe(None));
    }
}
