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

//! Query execution against Neo4j.
//!
//! [`Neo4jExecutor`] opens a fresh [`neo4rs::Graph`] for every call and drops
//! it before returning, whatever the outcome. Calls block the current thread
//! on a private single-threaded tokio runtime.

use crate::cypher::{CypherStatement, CypherValue};
use crate::error::{LoadError, Result};
use neo4rs::{BoltMap, BoltString, BoltType, ConfigBuilder, Graph, Query};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tokio::runtime::Runtime;

/// One result row: column name to value.
pub type Row = BTreeMap<String, serde_json::Value>;

/// Executes a single Cypher statement and returns every result row in order.
pub trait QueryExecutor {
    /// Run the statement.
    ///
    /// # Errors
    ///
    /// Returns the failure with its cause attached; nothing is retried.
    fn execute(&self, statement: &CypherStatement) -> Result<Vec<Row>>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    fn execute(&self, statement: &CypherStatement) -> Result<Vec<Row>> {
        (**self).execute(statement)
    }
}

/// Address and credentials for a Neo4j server.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Bolt URI, e.g. `bolt://localhost:7687`.
    pub uri: String,
    /// Username.
    pub user: String,
    /// Password.
    pub password: String,
    /// Target database (default: the server's default database).
    pub database: Option<String>,
}

impl ConnectionSettings {
    /// Create settings for the server's default database.
    pub fn new(uri: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: None,
        }
    }

    /// Target a specific database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Executes statements against a Neo4j server, one connection per call.
pub struct Neo4jExecutor {
    settings: ConnectionSettings,
    timeout: Option<Duration>,
    runtime: Runtime,
}

impl fmt::Debug for Neo4jExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jExecutor")
            .field("settings", &self.settings)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Neo4jExecutor {
    /// Create an executor. No connection is opened until the first call.
    pub fn new(settings: ConnectionSettings) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LoadError::Connection(format!("failed to start runtime: {}", e)))?;
        Ok(Self {
            settings,
            timeout: None,
            runtime,
        })
    }

    /// Abort calls that run longer than `timeout`. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The connection settings.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    async fn run(&self, statement: &CypherStatement) -> Result<Vec<Row>> {
        let mut builder = ConfigBuilder::default()
            .uri(self.settings.uri.as_str())
            .user(self.settings.user.as_str())
            .password(self.settings.password.as_str());
        if let Some(database) = &self.settings.database {
            builder = builder.db(database.as_str());
        }
        let config = builder
            .build()
            .map_err(|e| LoadError::Connection(e.to_string()))?;
        let graph = Graph::connect(config).map_err(|e| LoadError::Connection(e.to_string()))?;

        let mut stream = graph
            .execute(to_query(statement))
            .await
            .map_err(|e| LoadError::Query(e.to_string()))?;

        let mut rows = Vec::new();
        loop {
            match stream.next().await {
                Ok(Some(row)) => {
                    let decoded = row
                        .to::<Row>()
                        .map_err(|e| LoadError::RowDecode(e.to_string()))?;
                    rows.push(decoded);
                }
                Ok(None) => break,
                Err(e) if rows.is_empty() => return Err(LoadError::Query(e.to_string())),
                Err(e) => {
                    return Err(LoadError::Interrupted {
                        message: e.to_string(),
                        rows,
                    })
                }
            }
        }
        Ok(rows)
    }
}

impl QueryExecutor for Neo4jExecutor {
    fn execute(&self, statement: &CypherStatement) -> Result<Vec<Row>> {
        let result = self.runtime.block_on(async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, self.run(statement))
                    .await
                    .unwrap_or_else(|_| {
                        Err(LoadError::Timeout {
                            seconds: limit.as_secs_f64(),
                        })
                    }),
                None => self.run(statement).await,
            }
        });

        if let Err(error) = &result {
            tracing::error!(uri = %self.settings.uri, %error, "Error executing cypher");
        }
        result
    }
}

fn to_query(statement: &CypherStatement) -> Query {
    statement
        .parameters
        .iter()
        .fold(Query::new(statement.query.clone()), |query, (name, value)| {
            query.param(name.as_str(), to_bolt(value))
        })
}

fn to_bolt(value: &CypherValue) -> BoltType {
    match value {
        CypherValue::Bool(b) => BoltType::from(*b),
        CypherValue::String(s) => BoltType::from(s.as_str()),
        CypherValue::Map(map) => {
            let mut bolt = BoltMap::new();
            for (key, value) in map {
                bolt.put(BoltString::from(key.as_str()), to_bolt(value));
            }
            BoltType::Map(bolt)
        }
    }
}
