//! Consolidation of per-document tables into one table.
//!
//! Columns are the union of all input headers, in order of first
//! appearance; cells missing from an input are left empty.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TABLE_EXTENSION;
use crate::error::{ExtractorError, Result};
use crate::table::{read_table, write_table, Table};

/// What a merge read and wrote.
#[derive(Debug, Default)]
pub struct MergeSummary {
    /// Inputs whose rows were merged.
    pub merged: Vec<PathBuf>,
    /// Inputs that could not be read.
    pub skipped: Vec<(PathBuf, ExtractorError)>,
    /// Rows in the consolidated table.
    pub rows: usize,
    /// Written table, `None` when there was nothing to merge.
    pub output: Option<PathBuf>,
}

/// Canonical form of `output_file`, which need not exist yet.
fn canonical_output(output_file: &Path) -> Option<PathBuf> {
    let name = output_file.file_name()?;
    let parent = output_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    parent.canonicalize().ok().map(|p| p.join(name))
}

/// Tables directly inside `input_dir`, sorted by path.
fn list_tables(input_dir: &Path, output_file: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir).map_err(|e| ExtractorError::io(input_dir, e))?;
    let own_output = canonical_output(output_file);

    let mut tables = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ExtractorError::io(input_dir, e))?.path();
        let is_table = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(TABLE_EXTENSION));
        let is_output = path == output_file
            || own_output
                .as_deref()
                .is_some_and(|out| fs::canonicalize(&path).is_ok_and(|p| p == out));
        if is_table && !is_output {
            tables.push(path);
        }
    }
    tables.sort();
    Ok(tables)
}

/// Concatenate tables by column union.
pub fn concat_tables(tables: &[Table]) -> Table {
    let mut headers: Vec<String> = Vec::new();
    for table in tables {
        for header in &table.headers {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(tables.iter().map(|t| t.rows.len()).sum());
    for table in tables {
        let positions: Vec<usize> = table
            .headers
            .iter()
            .filter_map(|h| headers.iter().position(|u| u == h))
            .collect();
        for row in &table.rows {
            let mut merged = vec![String::new(); headers.len()];
            for (cell, &position) in row.iter().zip(&positions) {
                merged[position] = cell.clone();
            }
            rows.push(merged);
        }
    }

    Table { headers, rows }
}

/// Merge every table in `input_dir` into `output_file`.
///
/// Unreadable inputs are skipped with a warning. Nothing is written when no
/// input could be read.
pub fn merge_tables(input_dir: &Path, output_file: &Path) -> Result<MergeSummary> {
    if !input_dir.is_dir() {
        return Err(ExtractorError::io(
            input_dir,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "input folder does not exist",
            ),
        ));
    }

    let mut summary = MergeSummary::default();
    let mut tables = Vec::new();

    for path in list_tables(input_dir, output_file)? {
        match read_table(&path) {
            Ok(table) => {
                tracing::debug!(file = %path.display(), rows = table.rows.len(), "Read table");
                tables.push(table);
                summary.merged.push(path);
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable table");
                summary.skipped.push((path, e));
            }
        }
    }

    if tables.is_empty() {
        tracing::warn!(dir = %input_dir.display(), "No valid CSV files to merge");
        return Ok(summary);
    }

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExtractorError::io(parent, e))?;
    }

    let merged = concat_tables(&tables);
    write_table(output_file, &merged)?;

    tracing::info!(
        files = summary.merged.len(),
        rows = merged.rows.len(),
        output = %output_file.display(),
        "Merged tables"
    );

    summary.rows = merged.rows.len();
    summary.output = Some(output_file.to_path_buf());
    Ok(summary)
}
