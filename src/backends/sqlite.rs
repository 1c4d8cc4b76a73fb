//! SQLite native client
//!
//! Wraps a blocking `rusqlite` connection. The effective address is used as the
//! database path, so `:memory:` or a file path go in `hostname`.

use crate::core::{
    connection::{ConnectFailure, ConnectionParams, NativeClient, NativeConnection},
    error::BackendError,
};
use rusqlite::{Connection, OpenFlags};
use std::time::Duration;

/// How long a statement waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Code used when rusqlite fails without a SQLite result code
const GENERIC_ERROR_CODE: i32 = 1;

/// SQLite client implementation
#[derive(Debug, Clone)]
pub struct SqliteClient {
    flags: OpenFlags,
}

impl SqliteClient {
    pub fn new() -> Self {
        Self {
            flags: OpenFlags::default(),
        }
    }
}

impl Default for SqliteClient {
    fn default() -> Self {
        Self::new()
    }
}

fn backend_error(error: rusqlite::Error) -> BackendError {
    match &error {
        rusqlite::Error::SqliteFailure(failure, message) => BackendError::new(
            failure.extended_code,
            message.clone().unwrap_or_else(|| failure.to_string()),
        ),
        _ => BackendError::new(GENERIC_ERROR_CODE, error.to_string()),
    }
}

impl NativeClient for SqliteClient {
    fn connect(
        &mut self,
        address: &str,
        _params: &ConnectionParams,
    ) -> Result<Box<dyn NativeConnection>, ConnectFailure> {
        let conn = Connection::open_with_flags(address, self.flags)
            .map_err(|e| ConnectFailure::NoHandle(e.to_string()))?;

        // Session exists from here on; failures are backend errors
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| ConnectFailure::Backend(backend_error(e)))?;
        conn.execute_batch("PRAGMA foreign_keys = ON")
            .map_err(|e| ConnectFailure::Backend(backend_error(e)))?;

        Ok(Box::new(SqliteConnection { conn }))
    }
}

struct SqliteConnection {
    conn: Connection,
}

impl NativeConnection for SqliteConnection {
    fn execute(&mut self, sql: &str) -> Result<(), BackendError> {
        self.conn.execute_batch(sql).map_err(backend_error)
    }

    fn commit(&mut self) -> Result<(), BackendError> {
        self.conn.execute_batch("COMMIT").map_err(backend_error)
    }

    fn rollback(&mut self) -> Result<(), BackendError> {
        self.conn.execute_batch("ROLLBACK").map_err(backend_error)
    }

    fn close(self: Box<Self>) -> Result<(), BackendError> {
        self.conn.close().map_err(|(_, e)| backend_error(e))
    }
}
