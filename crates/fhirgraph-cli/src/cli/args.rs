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

//! Argument structs shared by the commands.

use crate::error::CliError;
use clap::{Args, ValueEnum};
use fhirgraph_neo4j::bundle::max_file_size_from_env;
use fhirgraph_neo4j::{
    ConnectionSettings, LoaderConfig, QueryMode, DEFAULT_NARRATIVE_PLACEHOLDER,
    DEFAULT_PROFILE_VERSION,
};
use std::path::PathBuf;
use std::time::Duration;

/// How the bundle is handed to the import procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Bind the bundle as the `$bundle` query parameter
    #[default]
    Parameterized,
    /// Embed the bundle as an escaped string literal
    Literal,
    /// Embed the bundle with quote-only escaping
    LegacyLiteral,
}

impl From<ModeArg> for QueryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Parameterized => QueryMode::Parameterized,
            ModeArg::Literal => QueryMode::Literal,
            ModeArg::LegacyLiteral => QueryMode::LegacyLiteral,
        }
    }
}

/// Options that shape the generated statement.
#[derive(Args, Debug, Clone)]
pub struct StatementArgs {
    /// How the bundle reaches the procedure
    #[arg(long, value_enum, default_value_t = ModeArg::Parameterized)]
    pub mode: ModeArg,

    /// Skip validation inside the import procedure
    #[arg(long)]
    pub no_validation: bool,

    /// FHIR profile version passed to the procedure
    #[arg(long, default_value = DEFAULT_PROFILE_VERSION)]
    pub profile_version: String,

    /// Text written over every narrative `div`
    #[arg(long, default_value = DEFAULT_NARRATIVE_PLACEHOLDER)]
    pub placeholder: String,
}

impl StatementArgs {
    /// Build the loader configuration these options describe.
    pub fn to_config(&self) -> LoaderConfig {
        let mut builder = LoaderConfig::builder()
            .query_mode(self.mode.into())
            .profile_version(self.profile_version.clone())
            .narrative_placeholder(self.placeholder.clone())
            .max_file_size(max_file_size_from_env());
        if self.no_validation {
            builder = builder.validation(false);
        }
        builder.build()
    }
}

/// Neo4j connection options, each with an environment fallback.
#[derive(Args, Clone)]
pub struct ConnectionArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub uri: String,

    /// Database user
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    pub user: String,

    /// Database password
    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Database name (server default when omitted)
    #[arg(long, env = "NEO4J_DATABASE")]
    pub database: Option<String>,
}

impl ConnectionArgs {
    /// Convert to driver connection settings.
    pub fn to_settings(&self) -> ConnectionSettings {
        let settings = ConnectionSettings::new(&self.uri, &self.user, &self.password);
        match &self.database {
            Some(db) => settings.with_database(db),
            None => settings,
        }
    }
}

/// Arguments for `fhirgraph load`.
#[derive(Args, Clone)]
pub struct LoadArgs {
    /// Directory holding the FHIR bundle files
    #[arg(long, value_name = "DIR")]
    pub fhir_folder: PathBuf,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub statement: StatementArgs,

    /// Give up on a bundle after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Exit with failure if any bundle fails to load
    #[arg(long)]
    pub strict: bool,
}

impl LoadArgs {
    /// Build the loader configuration, including the timeout.
    ///
    /// # Errors
    ///
    /// Returns `Err` for a zero timeout.
    pub fn to_config(&self) -> Result<LoaderConfig, CliError> {
        let config = self.statement.to_config();
        match self.timeout {
            Some(0) => Err(CliError::invalid_input("--timeout must be at least 1 second")),
            Some(secs) => Ok(config.with_timeout(Duration::from_secs(secs))),
            None => Ok(config),
        }
    }
}

/// Arguments for `fhirgraph render`.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Bundle file to render
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub statement: StatementArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement_args() -> StatementArgs {
        StatementArgs {
            mode: ModeArg::Literal,
            no_validation: true,
            profile_version: "r4".to_string(),
            placeholder: "gone".to_string(),
        }
    }

    #[test]
    fn test_statement_args_to_config() {
        let config = statement_args().to_config();
        assert_eq!(config.query_mode, QueryMode::Literal);
        assert!(!config.validation);
        assert_eq!(config.narrative_placeholder, "gone");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = LoadArgs {
            fhir_folder: PathBuf::from("fhir"),
            connection: ConnectionArgs {
                uri: "bolt://localhost:7687".to_string(),
                user: "neo4j".to_string(),
                password: "pw".to_string(),
                database: None,
            },
            statement: statement_args(),
            timeout: Some(0),
            strict: false,
        };
        assert!(matches!(args.to_config(), Err(CliError::InvalidInput(_))));

        let args = LoadArgs {
            timeout: Some(30),
            ..args
        };
        assert_eq!(args.to_config().unwrap().timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_connection_settings() {
        let args = ConnectionArgs {
            uri: "neo4j://db:7687".to_string(),
            user: "loader".to_string(),
            password: "pw".to_string(),
            database: Some("fhir".to_string()),
        };
        let settings = args.to_settings();
        assert_eq!(settings.uri, "neo4j://db:7687");
        assert_eq!(settings.database.as_deref(), Some("fhir"));
    }
}
