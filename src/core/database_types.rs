//! Database type definitions
//!
//! The closed set of backends a driver can be built for. Selected once, from
//! configuration, when the driver is opened.

use super::dialect::{Dialect, ORACLE, SQLITE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// Oracle database
    Oracle,
    /// SQLite database
    Sqlite,
}

impl DatabaseType {
    /// Convert database type to string representation
    pub fn to_str(&self) -> &'static str {
        match self {
            DatabaseType::Oracle => "oracle",
            DatabaseType::Sqlite => "sqlite",
        }
    }

    /// The static dialect description for this backend
    pub fn dialect(&self) -> &'static Dialect {
        match self {
            DatabaseType::Oracle => &ORACLE,
            DatabaseType::Sqlite => &SQLITE,
        }
    }

    /// Whether this crate bundles a native client for the backend.
    ///
    /// Oracle sessions need a client supplied by the host application through
    /// [`Driver::open_with`](crate::Driver::open_with).
    pub fn is_supported(&self) -> bool {
        match self {
            DatabaseType::Oracle => false,
            DatabaseType::Sqlite => cfg!(feature = "sqlite"),
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oracle" | "oci" => Ok(DatabaseType::Oracle),
            "sqlite" | "sqlite3" => Ok(DatabaseType::Sqlite),
            _ => Err(format!("Invalid database type: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_type_to_str() {
        assert_eq!(DatabaseType::Oracle.to_str(), "oracle");
        assert_eq!(DatabaseType::Sqlite.to_str(), "sqlite");
        assert_eq!(DatabaseType::Oracle.to_string(), "oracle");
    }

    #[test]
    fn test_database_type_from_str() {
        assert_eq!(
            "oracle".parse::<DatabaseType>().ok(),
            Some(DatabaseType::Oracle)
        );
        assert_eq!("OCI".parse::<DatabaseType>().ok(), Some(DatabaseType::Oracle));
        assert_eq!(
            "sqlite3".parse::<DatabaseType>().ok(),
            Some(DatabaseType::Sqlite)
        );
        assert_eq!("mysql".parse::<DatabaseType>().ok(), None);
    }

    #[test]
    fn test_database_type_dialect() {
        assert_eq!(DatabaseType::Oracle.dialect().db_type, DatabaseType::Oracle);
        assert_eq!(DatabaseType::Sqlite.dialect().db_type, DatabaseType::Sqlite);
    }

    #[test]
    fn test_database_type_is_supported() {
        assert!(!DatabaseType::Oracle.is_supported());
        assert_eq!(DatabaseType::Sqlite.is_supported(), cfg!(feature = "sqlite"));
    }

    #[test]
    fn test_database_type_serde() {
        let json = serde_json::to_string(&DatabaseType::Oracle).unwrap();
        assert_eq!(json, "\"oracle\"");
        let parsed: DatabaseType = serde_json::from_str("\"sqlite\"").unwrap();
        assert_eq!(parsed, DatabaseType::Sqlite);
    }
}
