//! CSV table reading and writing.
//!
//! Tables are UTF-8 with a leading byte-order mark so spreadsheet tools pick
//! the right encoding. Writes go to a temporary sibling file that replaces
//! the target only once complete.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tempfile::NamedTempFile;

use crate::config::{CSV_COLUMNS, TABLE_EXTENSION};
use crate::error::{ExtractorError, Result};
use crate::types::Record;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A header row plus string rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Output table path for a document: its basename with a `csv` extension, in `csv_dir`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use transkribus_extractor::table::table_path;
///
/// let out = table_path(Path::new("out"), Path::new("in/sub/0001_QTN_1952.xml"));
/// assert_eq!(out, Path::new("out/0001_QTN_1952.csv"));
/// ```
pub fn table_path(csv_dir: &Path, document: &Path) -> PathBuf {
    let name = document
        .file_name()
        .map(Path::new)
        .unwrap_or(document)
        .with_extension(TABLE_EXTENSION);
    csv_dir.join(name)
}

fn create_writer(path: &Path) -> Result<csv::Writer<NamedTempFile>> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ExtractorError::io(path, e))?;
    file.write_all(UTF8_BOM)
        .map_err(|e| ExtractorError::io(path, e))?;
    Ok(WriterBuilder::new().has_headers(false).from_writer(file))
}

/// Flush and move the temporary file onto `path`.
fn finish(writer: csv::Writer<NamedTempFile>, path: &Path) -> Result<()> {
    let file = writer
        .into_inner()
        .map_err(|e| ExtractorError::io(path, io::Error::new(e.error().kind(), e.to_string())))?;
    file.persist(path)
        .map_err(|e| ExtractorError::io(path, e.error))?;
    Ok(())
}

/// Write records with the fixed column header, even when `records` is empty.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| ExtractorError::csv(path, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| ExtractorError::csv(path, e))?;
    }
    finish(writer, path)
}

/// Write a table.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(&table.headers)
        .map_err(|e| ExtractorError::csv(path, e))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| ExtractorError::csv(path, e))?;
    }
    finish(writer, path)
}

/// Read a table. A leading byte-order mark is ignored.
///
/// Ragged rows are accepted; rows are padded or truncated to the header width.
pub fn read_table(path: &Path) -> Result<Table> {
    let bytes = fs::read(path).map_err(|e| ExtractorError::io(path, e))?;
    let data = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ExtractorError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(ExtractorError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ExtractorError::csv(path, e))?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(Table { headers, rows })
}
