//! Table creation and bulk COPY loading.
//!
//! `bulk_load` is a single round trip: the whole source file is read into
//! memory, validated against the declared schema, serialized to one CSV
//! buffer, and handed to the server through `COPY ... FROM STDIN`. The
//! server parses the buffer in one pass and applies it atomically; either
//! every row commits or none do.

use std::path::Path;

use bytes::Bytes;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use futures::SinkExt;
use log::debug;
use tokio_postgres::Client;

use crate::{
    error::{Error, LoadErrorKind},
    schema::DatasetSpec,
};

/// Loader context for one run: the connection, the directory the source
/// files live in, and the delimiter they use.
pub struct TableLoader<'a> {
    client: &'a Client,
    data_dir: &'a Path,
    delimiter: u8,
}

impl<'a> TableLoader<'a> {
    pub fn new(client: &'a Client, data_dir: &'a Path, delimiter: u8) -> Self {
        Self {
            client,
            data_dir,
            delimiter,
        }
    }

    /// Creates the dataset's table if it does not already exist.
    ///
    /// Idempotent: issuing it against a pre-existing table is a no-op and
    /// never alters the table's structure.
    pub async fn ensure_table(&self, spec: &DatasetSpec) -> Result<(), Error> {
        let sql = spec.create_sql();
        debug!("{sql}");
        self.client
            .batch_execute(&sql)
            .await
            .map_err(|source| Error::Schema {
                table: spec.table,
                source,
            })?;
        Ok(())
    }

    /// Appends every row of the dataset's source file to its table and
    /// returns the server-reported row count.
    ///
    /// Append semantics only: a second run against the same table loads the
    /// file again, nothing is deduplicated.
    pub async fn bulk_load(&self, spec: &DatasetSpec) -> Result<u64, Error> {
        let path = spec.source_path(self.data_dir);
        let rows = read_source(spec, &path, self.delimiter)?;
        debug!("Read {} row(s) from {:?}", rows.len(), path);
        let buffer =
            encode_copy_buffer(&rows).map_err(|kind| Error::load(spec.table, &path, kind))?;

        let copy = spec.copy_sql();
        debug!("{copy}");
        let sink = self
            .client
            .copy_in(copy.as_str())
            .await
            .map_err(|err| Error::load(spec.table, &path, LoadErrorKind::Copy(err)))?;
        futures::pin_mut!(sink);
        sink.send(Bytes::from(buffer))
            .await
            .map_err(|err| Error::load(spec.table, &path, LoadErrorKind::Copy(err)))?;
        sink.finish()
            .await
            .map_err(|err| Error::load(spec.table, &path, LoadErrorKind::Copy(err)))
    }
}

/// Reads the entire source file into memory, checking the header row and
/// every field against the declared schema before anything is sent to the
/// server. A mismatch anywhere rejects the whole file.
pub fn read_source(
    spec: &DatasetSpec,
    path: &Path,
    delimiter: u8,
) -> Result<Vec<StringRecord>, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| Error::load(spec.table, path, LoadErrorKind::Read(err)))?;

    let headers = reader
        .headers()
        .map_err(|err| Error::load(spec.table, path, LoadErrorKind::Read(err)))?
        .clone();
    spec.validate_headers(&headers)
        .map_err(|kind| Error::load(spec.table, path, kind))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // 1-based line numbers counting the header row.
        let row = idx as u64 + 2;
        let record =
            record.map_err(|err| Error::load(spec.table, path, LoadErrorKind::Read(err)))?;
        validate_record(spec, row, &record)
            .map_err(|kind| Error::load(spec.table, path, kind))?;
        rows.push(record);
    }
    Ok(rows)
}

fn validate_record(
    spec: &DatasetSpec,
    row: u64,
    record: &StringRecord,
) -> Result<(), LoadErrorKind> {
    if record.len() != spec.columns.len() {
        return Err(LoadErrorKind::FieldCount {
            row,
            expected: spec.columns.len(),
            found: record.len(),
        });
    }
    for (column, value) in spec.columns.iter().zip(record.iter()) {
        if !column.sql_type.accepts(value) {
            return Err(LoadErrorKind::TypeMismatch {
                row,
                column: column.name,
                value: value.to_string(),
                sql_type: column.sql_type,
            });
        }
    }
    Ok(())
}

/// Serializes validated rows to the in-memory buffer sent through COPY.
///
/// Every field is quoted: under the server's CSV rules an unquoted empty
/// field is NULL, and the tables declare every column NOT NULL, so a quoted
/// empty string is the only representation that keeps empty values loadable.
pub fn encode_copy_buffer(rows: &[StringRecord]) -> Result<Vec<u8>, LoadErrorKind> {
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .double_quote(true)
            .from_writer(&mut buffer);
        for row in rows {
            writer.write_record(row).map_err(LoadErrorKind::Encode)?;
        }
        writer
            .flush()
            .map_err(|err| LoadErrorKind::Encode(err.into()))?;
    }
    Ok(buffer)
}
