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

//! CLI command definitions and argument parsing.
//!
//! - [`LoadArgs`]: discover bundles in a directory and load them
//! - [`RenderArgs`]: print the import statement for one bundle (dry run)

mod args;

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

pub use args::{ConnectionArgs, LoadArgs, ModeArg, RenderArgs, StatementArgs};

/// Top-level CLI commands enum.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use fhirgraph_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Load every FHIR bundle in a directory into Neo4j
    ///
    /// Each `*.json` file is passed to `cyfhir.bundle.load` in its own call.
    /// A failing bundle is logged and skipped; the rest of the batch still runs.
    Load(LoadArgs),

    /// Print the import statement for one bundle without running it
    Render(RenderArgs),
}

impl Commands {
    /// Execute the command with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The bundle directory is missing or holds no bundles
    /// - Arguments are invalid
    /// - The bundle cannot be read or rendered (`render`)
    /// - Any bundle failed and `--strict` was given (`load`)
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Load(args) => commands::load(&args).map(|_| ()),
            Commands::Render(args) => commands::render(&args),
        }
    }
}
