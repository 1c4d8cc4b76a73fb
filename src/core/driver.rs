//! The driver contract
//!
//! A [`Driver`] owns one native session per connection role, the last-error
//! slot, and the nesting depth of the master connection's transaction. Every
//! call is blocking and runs on the caller's thread.
//!
//! Backend failures are never returned as `Err`. They overwrite the last-error
//! slot and the operation returns `false`; callers decide whether that is
//! fatal. `Err` is reserved for a connect that produced no session and for
//! misuse of the depth-owning transaction calls.

use super::config::{ConnectFailurePolicy, DriverConfig};
use super::connection::{
    ConnectFailure, ConnectionParams, ConnectionRole, NativeClient, NativeConnection,
};
use super::database_types::DatabaseType;
use super::dialect::Dialect;
use super::error::{BackendError, DatabaseError, Result};
use super::quote;
use super::transaction::{TransactionDepth, TxCommand};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Instant;

/// Error code captured when an operation needs a role that has no session
pub const NOT_CONNECTED_CODE: i32 = -1;

/// Message printed before exiting under [`ConnectFailurePolicy::Exit`]
pub const CONNECT_FAILURE_MESSAGE: &str = "cannot connect to DB.";

pub struct Driver {
    dialect: &'static Dialect,
    config: DriverConfig,
    client: Box<dyn NativeClient>,
    connections: BTreeMap<ConnectionRole, Box<dyn NativeConnection>>,
    last_error: Option<BackendError>,
    depth: TransactionDepth,
    closed: bool,
}

impl Driver {
    /// Open a driver with the native client bundled for `config.db_type`.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` when no client is bundled for the backend (use
    /// [`open_with`](Self::open_with)), otherwise as for `open_with`.
    pub fn open(config: DriverConfig) -> Result<Self> {
        match config.db_type {
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => {
                Self::open_with(config, Box::new(crate::backends::SqliteClient::new()))
            }
            other => Err(DatabaseError::unsupported(format!(
                "no bundled native client for {}",
                other
            ))),
        }
    }

    /// Open a driver over a caller-supplied native client and connect every
    /// configured role immediately.
    ///
    /// # Errors
    ///
    /// `ConnectionFailed` when the client returns no session for a role and the
    /// policy is [`ConnectFailurePolicy::ReturnError`]. A session that answers
    /// with an error is not an `Err`: the error is captured and the role is
    /// left without a connection.
    pub fn open_with(config: DriverConfig, client: Box<dyn NativeClient>) -> Result<Self> {
        config.validate()?;
        let mut driver = Self {
            dialect: config.db_type.dialect(),
            config,
            client,
            connections: BTreeMap::new(),
            last_error: None,
            depth: TransactionDepth::default(),
            closed: false,
        };

        let roles = std::iter::once((ConnectionRole::Master, driver.config.master.clone())).chain(
            driver
                .config
                .slaves
                .clone()
                .into_iter()
                .enumerate()
                .map(|(index, params)| (ConnectionRole::Slave(index), params)),
        );
        for (role, params) in roles {
            driver.connect_role(role, &params)?;
        }
        Ok(driver)
    }

    fn connect_role(&mut self, role: ConnectionRole, params: &ConnectionParams) -> Result<()> {
        let address = params.effective_address();
        match self.client.connect(&address, params) {
            Ok(connection) => {
                log::info!("connected {} to {} ({})", role, address, self.dialect.db_type);
                self.connections.insert(role, connection);
                Ok(())
            }
            Err(ConnectFailure::Backend(error)) => {
                log::warn!("{} session at {} reported {}", role, address, error);
                self.capture(error);
                Ok(())
            }
            Err(ConnectFailure::NoHandle(message)) => {
                log::error!("cannot connect {} to {}: {}", role, address, message);
                match self.config.on_connect_failure {
                    ConnectFailurePolicy::ReturnError => {
                        Err(DatabaseError::connection_failed(address, message))
                    }
                    ConnectFailurePolicy::Exit => {
                        eprintln!("{}", CONNECT_FAILURE_MESSAGE);
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    pub fn database_type(&self) -> DatabaseType {
        self.dialect.db_type
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The live session for `role`, if any
    pub fn connection(&mut self, role: ConnectionRole) -> Option<&mut Box<dyn NativeConnection>> {
        self.connections.get_mut(&role)
    }

    pub fn is_connected(&self, role: ConnectionRole) -> bool {
        self.connections.contains_key(&role)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Commit on master, then release every session exactly once.
    ///
    /// Calling `close` again is a no-op. Dropping an open driver closes it.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if self.connections.contains_key(&ConnectionRole::Master) {
            self.commit();
        }
        self.depth = TransactionDepth::default();

        for (role, connection) in std::mem::take(&mut self.connections) {
            match connection.close() {
                Ok(()) => log::info!("closed {} connection", role),
                Err(error) => {
                    log::warn!("closing {} connection reported {}", role, error);
                    self.capture(error);
                }
            }
        }
    }

    // ---------- error surface ----------

    /// Overwrite the last error slot
    pub fn capture_error(&mut self, code: i32, message: impl Into<String>) {
        self.capture(BackendError::new(code, message));
    }

    fn capture(&mut self, error: BackendError) {
        self.last_error = Some(error);
    }

    /// The most recently captured error. Successful calls do not clear it.
    pub fn last_error(&self) -> Option<&BackendError> {
        self.last_error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ---------- statements ----------

    /// Run caller SQL on the master connection
    pub fn execute(&mut self, sql: &str) -> bool {
        self.execute_on(ConnectionRole::Master, sql)
    }

    /// Run caller SQL on the connection for `role`
    pub fn execute_on(&mut self, role: ConnectionRole, sql: &str) -> bool {
        self.with_connection(role, sql, |connection| connection.execute(sql))
    }

    fn with_connection<F>(&mut self, role: ConnectionRole, label: &str, call: F) -> bool
    where
        F: FnOnce(&mut dyn NativeConnection) -> std::result::Result<(), BackendError>,
    {
        let Some(connection) = self.connections.get_mut(&role) else {
            log::warn!("{} is not connected, skipped: {}", role, label);
            self.capture_error(NOT_CONNECTED_CODE, format!("{} connection is not open", role));
            return false;
        };

        let start = Instant::now();
        let result = call(&mut **connection);
        let elapsed = start.elapsed().as_millis();

        match result {
            Ok(()) => {
                log::debug!("{}: sql={}, elapsed={}ms", role, label, elapsed);
                true
            }
            Err(error) => {
                log::debug!("{}: sql={}, elapsed={}ms, error={}", role, label, elapsed, error);
                log::warn!("{} failed on {}: {}", label, role, error);
                self.capture(error);
                false
            }
        }
    }

    /// Prepare a literal for interpolation into generated SQL
    pub fn quote<'a>(&self, value: &'a str) -> Cow<'a, str> {
        quote::quote(value, self.config.legacy_quotes)
    }

    /// Native column type for a portable type name
    pub fn map_type(&self, portable: &str) -> Option<&'static str> {
        self.dialect.column_types.map_type(portable)
    }

    pub fn table_prefix(&self) -> &str {
        self.config
            .table_prefix
            .as_deref()
            .unwrap_or(self.dialect.table_prefix)
    }

    pub fn comment(&self, text: &str) -> String {
        self.dialect.comment(text)
    }

    // ---------- transaction primitives (caller-supplied level) ----------

    /// Begin while `level` transactions are open: a flat begin at level 0,
    /// `SAVEPOINT SP<level>` otherwise.
    pub fn begin(&mut self, level: u32) -> bool {
        self.run(TxCommand::for_begin(level))
    }

    /// Roll back the innermost of `level` open transactions. Level 1 rolls the
    /// whole transaction back; deeper levels roll back to `SP<level - 1>`.
    /// Level 0 issues nothing and returns `false` without touching the last
    /// error.
    pub fn rollback(&mut self, level: u32) -> bool {
        match TxCommand::for_rollback(level) {
            Some(command) => self.run(command),
            None => {
                log::warn!("rollback requested with no open transaction");
                false
            }
        }
    }

    /// One full commit on master, whatever the nesting level.
    ///
    /// This ends everything, including work done since inner savepoints. Call
    /// it only for the outermost level, or use
    /// [`commit_transaction`](Self::commit_transaction).
    pub fn commit(&mut self) -> bool {
        self.run(TxCommand::Commit)
    }

    fn run(&mut self, command: TxCommand) -> bool {
        let master = ConnectionRole::Master;
        match command {
            TxCommand::Commit => self.with_connection(master, "COMMIT", |c| c.commit()),
            TxCommand::Rollback => self.with_connection(master, "ROLLBACK", |c| c.rollback()),
            _ => match command.sql(self.dialect) {
                Some(sql) => self.execute_on(master, &sql),
                None => true,
            },
        }
    }

    // ---------- nested transactions (driver-owned level) ----------

    pub fn transaction_level(&self) -> u32 {
        self.depth.level()
    }

    /// Open one more nesting level. The level is only entered when the
    /// backend accepted the command.
    pub fn begin_transaction(&mut self) -> bool {
        let ok = self.run(self.depth.begin_command());
        if ok {
            self.depth.push();
        }
        ok
    }

    /// End the innermost level keeping its work. Only the outermost level
    /// issues a backend commit; inner levels release their savepoint.
    ///
    /// The level is only left when the backend accepted the command. After a
    /// failed commit the level stays open so it can be rolled back.
    ///
    /// # Errors
    ///
    /// `TransactionError` when no transaction is open
    pub fn commit_transaction(&mut self) -> Result<bool> {
        let command = self.depth.commit_command()?;
        Ok(self.end_level(command))
    }

    /// End the innermost level discarding its work. Only work done since that
    /// level began is undone. A failed rollback leaves the level open.
    ///
    /// # Errors
    ///
    /// `TransactionError` when no transaction is open
    pub fn rollback_transaction(&mut self) -> Result<bool> {
        let command = self.depth.rollback_command()?;
        Ok(self.end_level(command))
    }

    fn end_level(&mut self, command: TxCommand) -> bool {
        let ok = self.run(command);
        if ok {
            self.depth.pop();
        } else {
            log::warn!(
                "{:?} failed, transaction level {} stays open",
                command,
                self.depth.level()
            );
        }
        ok
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("db_type", &self.dialect.db_type)
            .field("roles", &self.connections.keys().collect::<Vec<_>>())
            .field("transaction_level", &self.depth.level())
            .field("last_error", &self.last_error)
            .field("closed", &self.closed)
            .finish()
    }
}
