//! # XE DB Driver
//!
//! One backend-specific implementation of a common database driver contract,
//! so an application can run against several DBMS products without changing
//! call sites. The contract covers three things:
//!
//! - **Connection lifecycle**: one native session per role (`master`, slaves),
//!   host:port normalisation, and a close that always commits first.
//! - **Column type mapping**: a fixed table from portable type names
//!   (`varchar`, `bigtext`, ...) to the backend's native names.
//! - **Nested transactions** on a backend with a single flat transaction plus
//!   savepoints.
//!
//! Backend failures are captured into a last-error slot rather than returned
//! as errors; see [`Driver`].
//!
//! ## Supported Databases
//!
//! | Database | Native client | Notes |
//! |----------|---------------|-------|
//! | Oracle | supplied by the host application | `SP<n>` savepoints, no release |
//! | SQLite | bundled (`sqlite` feature) | savepoints with `RELEASE` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xe_db_driver::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = DriverConfig::new(
//!         DatabaseType::Sqlite,
//!         ConnectionBuilder::new().host("app.db").build(),
//!     );
//!     let mut db = Driver::open(config)?;
//!
//!     let table = format!("{}documents", db.table_prefix());
//!     let ty = db.map_type("varchar").unwrap_or("TEXT");
//!     db.execute(&format!("CREATE TABLE {} (title {})", table, ty));
//!
//!     db.begin_transaction();
//!     let insert = format!("INSERT INTO {} VALUES ('{}')", table, db.quote("hello"));
//!     db.execute(&insert);
//!     db.commit_transaction()?;
//!
//!     if let Some(error) = db.last_error() {
//!         eprintln!("backend reported {}", error);
//!     }
//!     db.close();
//!     Ok(())
//! }
//! ```
//!
//! ### Nested Transactions
//!
//! ```rust,no_run
//! use xe_db_driver::prelude::*;
//!
//! fn transfer(db: &mut Driver) -> Result<()> {
//!     let mut outer = TransactionScope::begin(db)?;
//!     outer.execute("UPDATE xe_point SET point = point - 10 WHERE member_srl = 1");
//!     {
//!         let mut inner = outer.nested()?;
//!         inner.execute("INSERT INTO xe_point_log VALUES (1, -10)");
//!         // dropped without commit: rolled back to its savepoint only
//!     }
//!     outer.commit()?;
//!     Ok(())
//! }
//! ```

/// Core driver types and traits
pub mod core;

/// Native client implementations
pub mod backends;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        BackendError, ConnectFailurePolicy, ConnectionBuilder, ConnectionParams, ConnectionRole,
        DatabaseError, DatabaseType, Driver, DriverConfig, Result, TransactionScope,
    };

    #[cfg(feature = "sqlite")]
    pub use crate::backends::SqliteClient;
}

// Re-export at root level for convenience
pub use core::{
    BackendError, ConnectFailurePolicy, ConnectionBuilder, ConnectionParams, ConnectionRole,
    DatabaseError, DatabaseType, Driver, DriverConfig, Result, TransactionScope,
};

#[cfg(feature = "sqlite")]
pub use backends::SqliteClient;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let db_type: DatabaseType = "oracle".parse().unwrap();
        assert_eq!(db_type.dialect().column_types.map_type("text"), Some("long"));
        assert_eq!(ConnectionRole::Master.to_string(), "master");
    }
}
