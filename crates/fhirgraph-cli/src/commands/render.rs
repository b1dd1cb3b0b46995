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

//! Render command - print the import statement for one bundle

use crate::cli::RenderArgs;
use crate::error::CliError;
use fhirgraph_neo4j::{Bundle, ImportStatementBuilder, LoaderConfig};
use std::io::{self, Write};
use std::path::Path;

/// Build the import statement for `file` as executable Cypher text.
///
/// Parameters are inlined, so the output can be pasted into a Cypher shell.
///
/// # Errors
///
/// Returns `Err` if the bundle cannot be read, parsed or serialized.
pub fn render_statement(file: &Path, config: &LoaderConfig) -> Result<String, CliError> {
    let mut bundle = Bundle::read(file, config.max_file_size)?;
    let statement = ImportStatementBuilder::new(config).build(&mut bundle)?;
    Ok(statement.format(true))
}

/// Print the import statement for one bundle to stdout.
///
/// Nothing is sent to the database.
pub fn render(args: &RenderArgs) -> Result<(), CliError> {
    let config = args.statement.to_config();
    let text = render_statement(&args.file, &config)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)
        .map_err(|e| CliError::invalid_input(format!("Failed to write to stdout: {}", e)))
}
