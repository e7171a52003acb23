//! Configuration constants and the explicit configuration value passed to
//! the extractor and batch runner.

use std::path::{Path, PathBuf};

use crate::error::{ExtractorError, Result};

/// PRImA PAGE schema namespace, 2013-07-15 revision.
pub const DEFAULT_NAMESPACE: &str =
    "http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15";

/// Default directory scanned for PAGE-XML documents.
pub const DEFAULT_XML_DIR: &str = "./data/to_process_xml";

/// Default directory receiving one table per document.
pub const DEFAULT_CSV_DIR: &str = "./data/processed_csv";

/// Default directory read by the merge step.
pub const DEFAULT_MERGE_INPUT_DIR: &str = "./data/processed_csv";

/// Default consolidated table written by the merge step.
pub const DEFAULT_MERGE_OUTPUT: &str = "./data/merged_csv/merged_pages.csv";

/// Reserved names that accompany an export but carry no page content.
pub const EXCLUDED_FILES: [&str; 2] = ["mets.xml", "metadata.xml"];

/// Extension of input documents.
pub const DOCUMENT_EXTENSION: &str = "xml";

/// Extension of output tables.
pub const TABLE_EXTENSION: &str = "csv";

/// Minimum number of `_`-separated segments in an image filename.
pub const MIN_FILENAME_SEGMENTS: usize = 6;

/// Output columns, in order.
pub const CSV_COLUMNS: [&str; 10] = [
    "paragraph",
    "paragraph_idx",
    "readingorder_idx",
    "region_type",
    "filename",
    "newspaper",
    "year",
    "month",
    "date",
    "page_num",
];

/// Settings shared by the extractor and the batch runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Namespace URI of PAGE elements.
    pub namespace: String,
    /// Root of the document tree.
    pub xml_dir: PathBuf,
    /// Directory receiving output tables.
    pub csv_dir: PathBuf,
    /// File names skipped during discovery.
    pub excluded_files: Vec<String>,
    /// Extension (without dot) of eligible documents.
    pub document_extension: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            xml_dir: PathBuf::from(DEFAULT_XML_DIR),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
            excluded_files: EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
            document_extension: DOCUMENT_EXTENSION.to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn new(xml_dir: impl Into<PathBuf>, csv_dir: impl Into<PathBuf>) -> Self {
        Self {
            xml_dir: xml_dir.into(),
            csv_dir: csv_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_xml_dir(mut self, xml_dir: impl Into<PathBuf>) -> Self {
        self.xml_dir = xml_dir.into();
        self
    }

    pub fn with_csv_dir(mut self, csv_dir: impl Into<PathBuf>) -> Self {
        self.csv_dir = csv_dir.into();
        self
    }

    pub fn with_excluded_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_files = names.into_iter().map(Into::into).collect();
        self
    }

    /// Check the configuration before use.
    pub fn validate(&self) -> Result<()> {
        validate_namespace(&self.namespace)?;
        if self.document_extension.is_empty() {
            return Err(ExtractorError::InvalidConfig(
                "document extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `path` names an eligible document (extension match, not excluded).
    pub fn is_eligible(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let extension_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.document_extension));

        extension_matches && !self.excluded_files.iter().any(|excluded| excluded == name)
    }
}

/// Validate a namespace URI.
///
/// # Examples
/// ```
/// use transkribus_extractor::config::{validate_namespace, DEFAULT_NAMESPACE};
///
/// assert!(validate_namespace(DEFAULT_NAMESPACE).is_ok());
/// assert!(validate_namespace("  ").is_err());
/// ```
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.trim().is_empty() {
        Err(ExtractorError::InvalidConfig(
            "namespace URI must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}
