//! In-memory native client that records every command it receives.
//!
//! Useful for exercising a driver without a live backend, e.g. for the Oracle
//! dialect in tests. Clones share the same log and failure script, so a test
//! can keep one handle while the driver owns another.

use crate::core::connection::{ConnectFailure, ConnectionParams, NativeClient, NativeConnection};
use crate::core::error::BackendError;
use parking_lot::Mutex;
use std::sync::Arc;

/// A command received by a recording connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect(String),
    Execute(String),
    Commit,
    Rollback,
    Close,
}

#[derive(Debug, Default)]
struct Script {
    refuse: Option<String>,
    reject: Option<BackendError>,
    failures: Vec<(String, BackendError)>,
    commit_failure: Option<BackendError>,
}

#[derive(Debug, Default)]
struct Shared {
    commands: Mutex<Vec<Command>>,
    script: Mutex<Script>,
}

/// Recording client; see the module docs
#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    shared: Arc<Shared>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect attempts return no handle
    pub fn refuse_connections(self, message: impl Into<String>) -> Self {
        self.shared.script.lock().refuse = Some(message.into());
        self
    }

    /// Connect attempts reach a session that reports `error`
    pub fn reject_connections(self, error: BackendError) -> Self {
        self.shared.script.lock().reject = Some(error);
        self
    }

    /// Statements containing `pattern` fail with `error`
    pub fn fail_on(self, pattern: impl Into<String>, error: BackendError) -> Self {
        self.shared.script.lock().failures.push((pattern.into(), error));
        self
    }

    /// Native commits fail with `error`
    pub fn fail_commits(self, error: BackendError) -> Self {
        self.shared.script.lock().commit_failure = Some(error);
        self
    }

    /// Every command received so far, across all connections
    pub fn commands(&self) -> Vec<Command> {
        self.shared.commands.lock().clone()
    }

    /// Only the statement texts
    pub fn statements(&self) -> Vec<String> {
        self.shared
            .commands
            .lock()
            .iter()
            .filter_map(|c| match c {
                Command::Execute(sql) => Some(sql.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.shared.commands.lock().clear();
    }

    fn record(&self, command: Command) {
        self.shared.commands.lock().push(command);
    }
}

impl NativeClient for RecordingClient {
    fn connect(
        &mut self,
        address: &str,
        _params: &ConnectionParams,
    ) -> Result<Box<dyn NativeConnection>, ConnectFailure> {
        self.record(Command::Connect(address.to_string()));
        let script = self.shared.script.lock();
        if let Some(message) = &script.refuse {
            return Err(ConnectFailure::NoHandle(message.clone()));
        }
        if let Some(error) = &script.reject {
            return Err(ConnectFailure::Backend(error.clone()));
        }
        Ok(Box::new(RecordingConnection {
            client: self.clone(),
        }))
    }
}

struct RecordingConnection {
    client: RecordingClient,
}

impl NativeConnection for RecordingConnection {
    fn execute(&mut self, sql: &str) -> Result<(), BackendError> {
        self.client.record(Command::Execute(sql.to_string()));
        let script = self.client.shared.script.lock();
        match script.failures.iter().find(|(pattern, _)| sql.contains(pattern.as_str())) {
            Some((_, error)) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn commit(&mut self) -> Result<(), BackendError> {
        self.client.record(Command::Commit);
        match &self.client.shared.script.lock().commit_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn rollback(&mut self) -> Result<(), BackendError> {
        self.client.record(Command::Rollback);
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<(), BackendError> {
        self.client.record(Command::Close);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_across_clones() {
        let client = RecordingClient::new();
        let mut owned = client.clone();
        let mut conn = owned.connect("db.local:1521", &ConnectionParams::default()).unwrap();
        conn.execute("SELECT 1 FROM dual").unwrap();
        conn.commit().unwrap();
        conn.close().unwrap();

        assert_eq!(
            client.commands(),
            vec![
                Command::Connect("db.local:1521".to_string()),
                Command::Execute("SELECT 1 FROM dual".to_string()),
                Command::Commit,
                Command::Close,
            ]
        );
        assert_eq!(client.statements(), vec!["SELECT 1 FROM dual".to_string()]);
    }

    #[test]
    fn test_scripted_failures() {
        let mut client = RecordingClient::new()
            .fail_on("xe_missing", BackendError::new(942, "table or view does not exist"))
            .fail_commits(BackendError::new(2091, "transaction rolled back"));
        let mut conn = client.connect("db", &ConnectionParams::default()).unwrap();

        assert_eq!(conn.execute("SELECT * FROM xe_missing").unwrap_err().code, 942);
        assert!(conn.execute("SELECT * FROM xe_modules").is_ok());
        assert_eq!(conn.commit().unwrap_err().code, 2091);
    }

    #[test]
    fn test_connect_failures() {
        let mut refused = RecordingClient::new().refuse_connections("down");
        assert!(matches!(
            refused.connect("db", &ConnectionParams::default()),
            Err(ConnectFailure::NoHandle(_))
        ));

        let mut rejected = RecordingClient::new().reject_connections(BackendError::new(1017, "denied"));
        assert!(matches!(
            rejected.connect("db", &ConnectionParams::default()),
            Err(ConnectFailure::Backend(_))
        ));
    }
}
