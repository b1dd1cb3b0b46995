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

//! Structured error types for the FHIR Graph CLI.
//!
//! Every command returns `Result<T, CliError>`; `main` prints the error and
//! exits with a failure status.

use fhirgraph_neo4j::LoadError;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use fhirgraph_cli::error::CliError;
/// use fhirgraph_neo4j::discover_bundles;
/// use std::path::Path;
///
/// fn count(dir: &Path) -> Result<usize, CliError> {
///     // Library errors convert automatically
///     Ok(discover_bundles(dir)?.len())
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// Error raised by the loader library.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// One or more bundles failed to load under `--strict`.
    #[error("{failed} of {total} FHIR bundles failed to load")]
    LoadFailures {
        /// Number of failed bundles
        failed: usize,
        /// Number of bundles attempted
        total: usize,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_error_is_transparent() {
        let err: CliError = LoadError::NoBundlesFound(PathBuf::from("/data/fhir")).into();
        assert_eq!(
            err.to_string(),
            LoadError::NoBundlesFound(PathBuf::from("/data/fhir")).to_string()
        );
    }

    #[test]
    fn test_load_failures_message() {
        let err = CliError::LoadFailures {
            failed: 2,
            total: 10,
        };
        assert_eq!(err.to_string(), "2 of 10 FHIR bundles failed to load");
    }

    #[test]
    fn test_invalid_input() {
        let err = CliError::invalid_input("timeout must be positive");
        assert_eq!(err.to_string(), "Invalid input: timeout must be positive");
    }
}
