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

//! Load command - discover bundles and load them into Neo4j

use crate::cli::LoadArgs;
use crate::error::CliError;
use colored::Colorize;
use fhirgraph_neo4j::{
    discover_bundles, BatchLoader, BatchSummary, LoadReporter, Neo4jExecutor, QueryExecutor,
    TracingReporter,
};
use std::path::Path;

/// Discover the bundles in `--fhir-folder` and load each one.
///
/// Per-bundle failures are reported and skipped. The batch still counts as a
/// success unless `--strict` is set.
///
/// # Errors
///
/// Returns `Err` if:
/// - The folder does not exist or holds no `*.json` files
/// - Arguments are invalid
/// - `--strict` is set and at least one bundle failed
pub fn load(args: &LoadArgs) -> Result<BatchSummary, CliError> {
    let config = args.to_config()?;
    let executor =
        Neo4jExecutor::new(args.connection.to_settings())?.with_timeout(config.timeout);
    let loader = BatchLoader::new(executor, &config);
    let mut reporter = TracingReporter::new().with_source(&args.fhir_folder);

    let summary = run(&loader, &args.fhir_folder, &mut reporter)?;

    if summary.failed_count() > 0 {
        eprintln!("{}", "Failed bundles:".red().bold());
        for failure in summary.failures() {
            eprintln!("  {} {}", "✗".red(), failure.path.display());
        }
        if args.strict {
            return Err(CliError::LoadFailures {
                failed: summary.failed_count(),
                total: summary.discovered,
            });
        }
    }

    Ok(summary)
}

/// Discover bundles in `dir` and hand them to `loader`.
pub fn run<E: QueryExecutor>(
    loader: &BatchLoader<E>,
    dir: &Path,
    reporter: &mut dyn LoadReporter,
) -> Result<BatchSummary, CliError> {
    tracing::info!("--- Looking for FHIR bundles ---");
    let bundles = discover_bundles(dir)?;
    tracing::info!("--- Found {} FHIR Bundles ---", bundles.len());

    Ok(loader.load_all(&bundles, reporter))
}
