//! Connection parameters, roles, and the native client seam
//!
//! A backend's client library is reached only through [`NativeClient`] and
//! [`NativeConnection`]. The driver never speaks a wire protocol itself: it
//! hands the client an address and plain SQL text.

use super::error::BackendError;
use serde::{Deserialize, Serialize};

/// Separator that marks a hostname as already carrying a port
const PORT_SEPARATOR: char = ':';

/// Parameters for one backend session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    pub hostname: String,
    pub port: Option<u16>,
    pub database: String,
    pub userid: String,
    pub password: String,
}

impl ConnectionParams {
    /// The address handed to the native client.
    ///
    /// `port` is appended only when `hostname` does not already embed one, so
    /// exactly one address form reaches the connect call. Port 0 counts as
    /// unset.
    pub fn effective_address(&self) -> String {
        match self.port {
            Some(port) if port != 0 && !self.hostname.contains(PORT_SEPARATOR) => {
                format!("{}{}{}", self.hostname, PORT_SEPARATOR, port)
            }
            _ => self.hostname.clone(),
        }
    }
}

/// Fluent builder for [`ConnectionParams`]
#[derive(Debug, Default)]
pub struct ConnectionBuilder {
    params: ConnectionParams,
}

impl ConnectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.params.hostname = host.into();
        self
    }

    /// Set the database port
    pub fn port(mut self, port: u16) -> Self {
        self.params.port = Some(port);
        self
    }

    /// Set the database name
    pub fn database<S: Into<String>>(mut self, database: S) -> Self {
        self.params.database = database.into();
        self
    }

    /// Set the username
    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.params.userid = username.into();
        self
    }

    /// Set the password
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.params.password = password.into();
        self
    }

    pub fn build(self) -> ConnectionParams {
        self.params
    }
}

/// Logical role of a connection. Transaction control only uses `Master`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConnectionRole {
    Master,
    Slave(usize),
}

impl std::fmt::Display for ConnectionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionRole::Master => write!(f, "master"),
            ConnectionRole::Slave(index) => write!(f, "slave#{}", index),
        }
    }
}

/// Why a native connect attempt produced no usable session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectFailure {
    /// The client returned no handle at all
    NoHandle(String),
    /// A session was reached but reported an error state
    Backend(BackendError),
}

/// A backend client library able to open sessions
pub trait NativeClient: Send {
    fn connect(
        &mut self,
        address: &str,
        params: &ConnectionParams,
    ) -> std::result::Result<Box<dyn NativeConnection>, ConnectFailure>;
}

/// One live backend session, owned exclusively by a driver
pub trait NativeConnection: Send {
    /// Run caller-supplied SQL text
    fn execute(&mut self, sql: &str) -> std::result::Result<(), BackendError>;

    /// Commit the open transaction, if any
    fn commit(&mut self) -> std::result::Result<(), BackendError>;

    /// Roll back the whole open transaction
    fn rollback(&mut self) -> std::result::Result<(), BackendError>;

    /// Release the session. Called exactly once.
    fn close(self: Box<Self>) -> std::result::Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_appends_port() {
        let params = ConnectionBuilder::new().host("db.local").port(1521).build();
        assert_eq!(params.effective_address(), "db.local:1521");
    }

    #[test]
    fn test_address_keeps_embedded_port() {
        let params = ConnectionBuilder::new()
            .host("db.local:1521")
            .port(1521)
            .build();
        assert_eq!(params.effective_address(), "db.local:1521");

        let params = ConnectionBuilder::new().host("db.local:1600").port(1521).build();
        assert_eq!(params.effective_address(), "db.local:1600");
    }

    #[test]
    fn test_address_without_port() {
        let params = ConnectionBuilder::new().host("db.local").build();
        assert_eq!(params.effective_address(), "db.local");

        let params = ConnectionBuilder::new().host("db.local").port(0).build();
        assert_eq!(params.effective_address(), "db.local");
    }

    #[test]
    fn test_builder_fields() {
        let params = ConnectionBuilder::new()
            .host("localhost")
            .database("XE")
            .username("scott")
            .password("tiger")
            .build();
        assert_eq!(params.database, "XE");
        assert_eq!(params.userid, "scott");
        assert_eq!(params.password, "tiger");
        assert_eq!(params.port, None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(ConnectionRole::Master.to_string(), "master");
        assert_eq!(ConnectionRole::Slave(0).to_string(), "slave#0");
    }
}
