//! Portable column type mapping
//!
//! Schema and query definitions name column types in a DBMS-neutral way
//! (`varchar`, `bigtext`, ...). Each backend owns one fixed table translating
//! those names into native type names. Tables are compile-time constants, so
//! every driver of the same backend sees the same mapping.

use super::error::{DatabaseError, Result};

/// Static table from portable type name to native type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeMap {
    entries: &'static [(&'static str, &'static str)],
}

/// Portable types that take a length argument, e.g. `varchar(n)`
const SIZED_TYPES: &[&str] = &["varchar", "char"];

pub const ORACLE_COLUMN_TYPES: ColumnTypeMap = ColumnTypeMap::new(&[
    ("bignumber", "number"),
    ("number", "number"),
    ("varchar", "nvarchar2"),
    ("char", "nchar"),
    ("text", "long"),
    ("bigtext", "lob"),
    ("date", "nvarchar2(14)"),
    ("float", "binary_float"),
]);

pub const SQLITE_COLUMN_TYPES: ColumnTypeMap = ColumnTypeMap::new(&[
    ("bignumber", "INTEGER"),
    ("number", "INTEGER"),
    ("varchar", "VARCHAR"),
    ("char", "CHAR"),
    ("text", "TEXT"),
    ("bigtext", "TEXT"),
    ("date", "VARCHAR(14)"),
    ("float", "REAL"),
]);

impl ColumnTypeMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Look up the native type for a portable name; `None` when unmapped
    pub fn map_type(&self, portable: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == portable)
            .map(|(_, native)| *native)
    }

    /// Like [`map_type`](Self::map_type) but reports an unmapped name as an error
    pub fn require_type(&self, portable: &str) -> Result<&'static str> {
        self.map_type(portable)
            .ok_or_else(|| DatabaseError::UnmappedType(portable.to_string()))
    }

    /// Render a column type, appending `(size)` for length-taking types
    pub fn column_definition(&self, portable: &str, size: Option<u32>) -> Option<String> {
        let native = self.map_type(portable)?;
        match size {
            Some(size) if SIZED_TYPES.contains(&portable) => Some(format!("{}({})", native, size)),
            _ => Some(native.to_string()),
        }
    }

    /// Portable names known to this table
    pub fn portable_names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_mapping() {
        assert_eq!(ORACLE_COLUMN_TYPES.map_type("text"), Some("long"));
        assert_eq!(ORACLE_COLUMN_TYPES.map_type("varchar"), Some("nvarchar2"));
        assert_eq!(ORACLE_COLUMN_TYPES.map_type("bigtext"), Some("lob"));
        assert_eq!(ORACLE_COLUMN_TYPES.map_type("date"), Some("nvarchar2(14)"));
        assert_eq!(ORACLE_COLUMN_TYPES.map_type("float"), Some("binary_float"));
    }

    #[test]
    fn test_unmapped_type() {
        assert_eq!(ORACLE_COLUMN_TYPES.map_type("jsonb"), None);
        assert_eq!(ORACLE_COLUMN_TYPES.map_type("TEXT"), None);

        let err = ORACLE_COLUMN_TYPES.require_type("jsonb").unwrap_err();
        assert!(matches!(err, DatabaseError::UnmappedType(ref name) if name == "jsonb"));
    }

    #[test]
    fn test_column_definition() {
        assert_eq!(
            ORACLE_COLUMN_TYPES.column_definition("varchar", Some(250)),
            Some("nvarchar2(250)".to_string())
        );
        assert_eq!(
            ORACLE_COLUMN_TYPES.column_definition("number", Some(11)),
            Some("number".to_string())
        );
        assert_eq!(
            SQLITE_COLUMN_TYPES.column_definition("char", Some(1)),
            Some("CHAR(1)".to_string())
        );
        assert_eq!(ORACLE_COLUMN_TYPES.column_definition("blob", None), None);
    }

    #[test]
    fn test_tables_cover_same_names() {
        let oracle: Vec<_> = ORACLE_COLUMN_TYPES.portable_names().collect();
        let sqlite: Vec<_> = SQLITE_COLUMN_TYPES.portable_names().collect();
        assert_eq!(oracle, sqlite);
    }
}
