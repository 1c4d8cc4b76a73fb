//! Driver configuration
//!
//! Loaded from JSON by the host application and handed to
//! [`Driver::open`](crate::Driver::open).

use super::connection::ConnectionParams;
use super::database_types::DatabaseType;
use super::error::{DatabaseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the driver does when the native client returns no session handle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectFailurePolicy {
    /// Return [`DatabaseError::ConnectionFailed`] to the caller
    #[default]
    ReturnError,
    /// Print a fixed message and terminate the process
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    pub db_type: DatabaseType,
    pub master: ConnectionParams,
    #[serde(default)]
    pub slaves: Vec<ConnectionParams>,
    /// Overrides the dialect's default table prefix
    #[serde(default)]
    pub table_prefix: Option<String>,
    #[serde(default)]
    pub on_connect_failure: ConnectFailurePolicy,
    /// Undo legacy backslash double-escaping in [`quote`](crate::Driver::quote)
    #[serde(default)]
    pub legacy_quotes: bool,
}

impl DriverConfig {
    pub fn new(db_type: DatabaseType, master: ConnectionParams) -> Self {
        Self {
            db_type,
            master,
            slaves: Vec::new(),
            table_prefix: None,
            on_connect_failure: ConnectFailurePolicy::default(),
            legacy_quotes: false,
        }
    }

    pub fn with_slave(mut self, params: ConnectionParams) -> Self {
        self.slaves.push(params);
        self
    }

    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = Some(prefix.into());
        self
    }

    pub fn with_connect_failure_policy(mut self, policy: ConnectFailurePolicy) -> Self {
        self.on_connect_failure = policy;
        self
    }

    pub fn with_legacy_quotes(mut self, legacy: bool) -> Self {
        self.legacy_quotes = legacy;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Every role needs a hostname to connect to
    pub fn validate(&self) -> Result<()> {
        if self.master.hostname.is_empty() {
            return Err(DatabaseError::config("master hostname is empty"));
        }
        if let Some(index) = self.slaves.iter().position(|s| s.hostname.is_empty()) {
            return Err(DatabaseError::config(format!(
                "slave #{} hostname is empty",
                index
            )));
        }
        Ok(())
    }
}
