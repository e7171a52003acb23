//! Batch conversion of a document tree into per-document tables.
//!
//! Each document is processed independently: its outcome is collected and a
//! failure never stops the batch. The only fatal condition is an output
//! directory that cannot be created.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ExtractorConfig;
use crate::error::{ExtractorError, Result};
use crate::extractor::DocumentExtractor;
use crate::table::{table_path, write_records};

/// A table written for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub path: PathBuf,
    pub rows: usize,
}

/// Result of processing one document.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub result: std::result::Result<WrittenTable, ExtractorError>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-document outcomes of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchSummary {
    /// Number of documents whose table was written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Failed documents with their errors.
    pub fn failed(&self) -> Vec<(&Path, &ExtractorError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
            .collect()
    }

    /// Rows written across all tables.
    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|t| t.rows)
            .sum()
    }

    /// Whether no eligible document was found.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Drives [`DocumentExtractor`] over every eligible document under the input root.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: ExtractorConfig,
    extractor: DocumentExtractor,
}

impl BatchRunner {
    pub fn new(config: ExtractorConfig) -> Self {
        let extractor = DocumentExtractor::new(&config);
        Self { config, extractor }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Eligible documents under the input root, sorted by path.
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut documents: Vec<PathBuf> = WalkDir::new(&self.config.xml_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| self.config.is_eligible(path))
            .collect();
        documents.sort();
        documents
    }

    /// Run the batch.
    pub fn run(&self) -> Result<BatchSummary> {
        self.run_with(|_| {})
    }

    /// Run the batch, calling `observer` after each document.
    pub fn run_with<F>(&self, observer: F) -> Result<BatchSummary>
    where
        F: FnMut(&DocumentOutcome),
    {
        self.run_documents(self.discover(), observer)
    }

    /// Process already discovered `documents` in the given order, calling
    /// `observer` after each one.
    pub fn run_documents<F>(&self, documents: Vec<PathBuf>, mut observer: F) -> Result<BatchSummary>
    where
        F: FnMut(&DocumentOutcome),
    {
        self.config.validate()?;

        if documents.is_empty() {
            tracing::warn!(
                dir = %self.config.xml_dir.display(),
                "No XML documents found"
            );
            return Ok(BatchSummary::default());
        }

        let csv_dir = &self.config.csv_dir;
        fs::create_dir_all(csv_dir).map_err(|e| ExtractorError::OutputDirectory {
            path: csv_dir.clone(),
            source: e,
        })?;

        warn_on_collisions(csv_dir, &documents);

        let mut summary = BatchSummary::default();
        for path in documents {
            let result = self.process(&path);
            match &result {
                Ok(table) => tracing::info!(
                    document = %path.display(),
                    table = %table.path.display(),
                    rows = table.rows,
                    "Processed and saved"
                ),
                Err(e) => tracing::warn!(
                    document = %path.display(),
                    error = %e,
                    "Error processing document"
                ),
            }

            let outcome = DocumentOutcome { path, result };
            observer(&outcome);
            summary.outcomes.push(outcome);
        }

        Ok(summary)
    }

    /// Extract one document and write its table.
    fn process(&self, path: &Path) -> Result<WrittenTable> {
        let records = self.extractor.extract(path)?;
        let output = table_path(&self.config.csv_dir, path);
        write_records(&output, &records)?;
        Ok(WrittenTable {
            path: output,
            rows: records.len(),
        })
    }
}

/// Warn about documents in different directories that share an output table.
fn warn_on_collisions(csv_dir: &Path, documents: &[PathBuf]) {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    for document in documents {
        let output = table_path(csv_dir, document);
        if let Some(previous) = seen.insert(output.clone(), document) {
            tracing::warn!(
                table = %output.display(),
                first = %previous.display(),
                second = %document.display(),
                "Documents share an output table; the later one overwrites the earlier"
            );
        }
    }
}
