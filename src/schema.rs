//! Static table schemas and the SQL they generate.
//!
//! Each dataset declares its columns as `const` data: name, SQL type, and
//! nullability, in the exact order the table is created and the copy buffer
//! is serialized. Both the CREATE TABLE statement and the COPY column list
//! are rendered from the same slice, so the column order used for creation
//! can never drift from the order used for loading.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use csv::StringRecord;

use crate::error::LoadErrorKind;

/// SQL column types used by the loaded tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    VarChar(u32),
    Integer,
}

impl SqlType {
    /// Whether a raw CSV field is admissible for this column type.
    ///
    /// INTEGER must parse as a 32-bit integer (the range of Postgres
    /// `INTEGER`); VARCHAR(n) is measured in characters, matching the
    /// server's `character varying(n)` semantics.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            SqlType::Text => true,
            SqlType::VarChar(limit) => value.chars().count() <= *limit as usize,
            SqlType::Integer => value.trim().parse::<i32>().is_ok(),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Text => f.write_str("TEXT"),
            SqlType::VarChar(limit) => write!(f, "VARCHAR({limit})"),
            SqlType::Integer => f.write_str("INTEGER"),
        }
    }
}

/// One column of a dataset schema.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
}

impl ColumnDef {
    fn ddl(&self) -> String {
        let constraint = if self.nullable { "" } else { " NOT NULL" };
        format!("{} {}{}", self.name, self.sql_type, constraint)
    }
}

/// The fixed pairing of a table name, column schema, and source file for one
/// loaded dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetSpec {
    pub table: &'static str,
    pub file_name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl DatasetSpec {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|column| column.name)
    }

    /// Resolves the source file against the configured data directory.
    pub fn source_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name)
    }

    /// CREATE TABLE IF NOT EXISTS statement; safe to issue on every run and
    /// never alters a pre-existing table's structure.
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(ColumnDef::ddl)
            .collect::<Vec<_>>()
            .join(",\n    ");
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.table, columns
        )
    }

    /// COPY statement targeting the declared columns, positionally matched
    /// to the copy buffer's column order.
    pub fn copy_sql(&self) -> String {
        format!(
            "COPY {} ({}) FROM STDIN WITH (FORMAT csv)",
            self.table,
            self.column_names().collect::<Vec<_>>().join(", ")
        )
    }

    /// The source header row must equal the declared column names, in order.
    /// Name-based reconciliation never happens downstream, so a reordered or
    /// renamed header fails here instead of silently shifting data between
    /// columns.
    pub fn validate_headers(&self, headers: &StringRecord) -> Result<(), LoadErrorKind> {
        let found: Vec<String> = headers.iter().map(str::to_string).collect();
        let expected: Vec<String> = self.column_names().map(str::to_string).collect();
        if found != expected {
            return Err(LoadErrorKind::HeaderMismatch { expected, found });
        }
        Ok(())
    }
}
