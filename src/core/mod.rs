//! Core driver types and traits
//!
//! This module provides the driver contract and everything it is built from:
//! connection parameters, the native client seam, dialects and type tables,
//! transaction control, quoting, configuration, and errors.

pub mod config;
pub mod connection;
pub mod database_types;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod quote;
pub mod transaction;
pub mod type_map;

// Re-export commonly used types
pub use config::{ConnectFailurePolicy, DriverConfig};
pub use connection::{
    ConnectFailure, ConnectionBuilder, ConnectionParams, ConnectionRole, NativeClient,
    NativeConnection,
};
pub use database_types::DatabaseType;
pub use dialect::Dialect;
pub use driver::Driver;
pub use error::{BackendError, DatabaseError, Result};
pub use transaction::{TransactionDepth, TransactionScope, TxCommand};
pub use type_map::ColumnTypeMap;
