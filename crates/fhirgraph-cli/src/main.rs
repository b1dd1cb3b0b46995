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

//! FHIR Graph command line interface

use clap::Parser;
use fhirgraph_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// FHIR Graph - load FHIR bundles into Neo4j
///
/// Reads every `.json` bundle in a directory and hands each one to the
/// `cyfhir.bundle.load` procedure, one call per bundle.
///
/// # Examples
///
/// ```bash
/// # Load a directory of Synthea output
/// NEO4J_PASSWORD=secret fhirgraph load --fhir-folder ./output/fhir
///
/// # Preview the statement for one bundle
/// fhirgraph render ./output/fhir/42_doe_bundle.json --mode literal
///
/// # Verbose logging
/// RUST_LOG=fhirgraph=debug fhirgraph load --fhir-folder ./output/fhir
/// ```
#[derive(Parser)]
#[command(name = "fhirgraph")]
#[command(author, version, about = "FHIR Graph - load FHIR bundles into Neo4j", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fhirgraph=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
