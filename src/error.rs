//! Error taxonomy for the load pipeline.
//!
//! Three failure categories exist, and all of them are fatal for the run:
//! connection establishment (including missing credentials), table creation,
//! and dataset loading. Nothing is retried; errors propagate to the process
//! boundary, and the connection is released by drop on every path.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SqlType;

#[derive(Debug, Error)]
pub enum Error {
    /// The password variable is required before any connection attempt.
    #[error("environment variable {0} must be set to the database password")]
    MissingPassword(&'static str),

    #[error("connecting to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: tokio_postgres::Error,
    },

    /// The server rejected a CREATE TABLE statement.
    #[error("creating table '{table}': {source}")]
    Schema {
        table: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },

    /// The source file could not be turned into committed rows.
    #[error("loading table '{table}' from {path:?}: {source}")]
    Load {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: LoadErrorKind,
    },
}

impl Error {
    pub fn load(table: &'static str, path: &std::path::Path, source: LoadErrorKind) -> Self {
        Error::Load {
            table,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What went wrong inside a single `bulk_load` call.
///
/// Row numbers are 1-based and count the header row, so the first data row
/// is row 2, the line number an editor shows for the offending record.
#[derive(Debug, Error)]
pub enum LoadErrorKind {
    #[error("reading source file: {0}")]
    Read(csv::Error),

    #[error("header mismatch: expected columns {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("row {row}: expected {expected} field(s), found {found}")]
    FieldCount {
        row: u64,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column '{column}': {value:?} does not fit {sql_type}")]
    TypeMismatch {
        row: u64,
        column: &'static str,
        value: String,
        sql_type: SqlType,
    },

    #[error("serializing copy buffer: {0}")]
    Encode(csv::Error),

    #[error("bulk copy rejected by server: {0}")]
    Copy(tokio_postgres::Error),
}
