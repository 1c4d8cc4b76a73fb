//! Per-backend dialect descriptions
//!
//! A [`Dialect`] is the static, read-only part of a driver: the column type
//! table and the exact command text used for transaction control. Nothing in
//! here touches a connection.

use super::database_types::DatabaseType;
use super::type_map::{ColumnTypeMap, ORACLE_COLUMN_TYPES, SQLITE_COLUMN_TYPES};

#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    pub db_type: DatabaseType,
    pub column_types: ColumnTypeMap,
    /// Statement that opens the single flat transaction
    pub begin: &'static str,
    /// Prefix of the savepoint created at each nesting level
    pub savepoint_prefix: &'static str,
    /// Whether `RELEASE SAVEPOINT` is understood by the backend
    pub supports_release: bool,
    pub table_prefix: &'static str,
    /// Comment template; `%s` is replaced by the comment text
    pub comment_syntax: &'static str,
}

pub static ORACLE: Dialect = Dialect {
    db_type: DatabaseType::Oracle,
    column_types: ORACLE_COLUMN_TYPES,
    begin: "begin",
    savepoint_prefix: "SP",
    supports_release: false,
    table_prefix: "xe_",
    comment_syntax: "/* %s */",
};

pub static SQLITE: Dialect = Dialect {
    db_type: DatabaseType::Sqlite,
    column_types: SQLITE_COLUMN_TYPES,
    begin: "BEGIN",
    savepoint_prefix: "SP",
    supports_release: true,
    table_prefix: "xe_",
    comment_syntax: "/* %s */",
};

impl Dialect {
    pub fn savepoint_name(&self, level: u32) -> String {
        format!("{}{}", self.savepoint_prefix, level)
    }

    pub fn savepoint(&self, level: u32) -> String {
        format!("SAVEPOINT {}", self.savepoint_name(level))
    }

    pub fn rollback_to_savepoint(&self, level: u32) -> String {
        format!("ROLLBACK TO SAVEPOINT {}", self.savepoint_name(level))
    }

    pub fn release_savepoint(&self, level: u32) -> Option<String> {
        self.supports_release
            .then(|| format!("RELEASE SAVEPOINT {}", self.savepoint_name(level)))
    }

    /// Render `text` as a SQL comment. `*/` inside the text is broken up so the
    /// comment cannot terminate early.
    pub fn comment(&self, text: &str) -> String {
        self.comment_syntax.replace("%s", &text.replace("*/", "* /"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_commands() {
        assert_eq!(ORACLE.begin, "begin");
        assert_eq!(ORACLE.savepoint(1), "SAVEPOINT SP1");
        assert_eq!(ORACLE.rollback_to_savepoint(3), "ROLLBACK TO SAVEPOINT SP3");
        assert_eq!(ORACLE.release_savepoint(1), None);
    }

    #[test]
    fn test_sqlite_release() {
        assert_eq!(
            SQLITE.release_savepoint(2),
            Some("RELEASE SAVEPOINT SP2".to_string())
        );
    }

    #[test]
    fn test_comment() {
        assert_eq!(ORACLE.comment("document.getDocument"), "/* document.getDocument */");
        assert_eq!(ORACLE.comment("a */ drop"), "/* a * / drop */");
    }
}
