//! Extraction of one PAGE-XML document into region records.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::ExtractorConfig;
use crate::custom::tokenize;
use crate::error::{ExtractorError, Result};
use crate::filename::parse_filename;
use crate::types::{ParsedRegionAttributes, PublicationMetadata, Record, TextRegion};
use crate::xml::{
    find_descendant, find_descendants, get_attribute, normalize_region_text, text_equiv_unicode,
};

/// Turns PAGE-XML documents into records, one per TextRegion.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    namespace: String,
}

impl DocumentExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_namespace(config.namespace.clone())
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read and extract the document at `path`.
    pub fn extract(&self, path: &Path) -> Result<Vec<Record>> {
        let content = fs::read_to_string(path).map_err(|e| ExtractorError::io(path, e))?;
        self.extract_str(&content, path)
    }

    /// Extract an in-memory document. `source` is only used in errors and logs.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use transkribus_extractor::extractor::DocumentExtractor;
    ///
    /// let xml = r#"<PcGts xmlns="urn:page">
    ///   <Page imageFilename="0001_QTN_1952_07_05_001_SB.jpg">
    ///     <TextRegion id="r1" custom="readingOrder {index:0;}">
    ///       <TextEquiv><Unicode>Hello</Unicode></TextEquiv>
    ///     </TextRegion>
    ///   </Page>
    /// </PcGts>"#;
    ///
    /// let records = DocumentExtractor::with_namespace("urn:page")
    ///     .extract_str(xml, Path::new("page.xml"))
    ///     .unwrap();
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].paragraph, "Hello");
    /// assert_eq!(records[0].newspaper, "QTN");
    /// ```
    pub fn extract_str(&self, content: &str, source: &Path) -> Result<Vec<Record>> {
        let doc = Document::parse(content).map_err(|e| ExtractorError::XmlParse {
            path: source.to_path_buf(),
            source: e,
        })?;
        let root = doc.root();

        let page = find_descendant(root, &self.namespace, "Page").ok_or_else(|| {
            ExtractorError::MissingMetadata {
                path: source.to_path_buf(),
                reason: "no Page element".to_string(),
            }
        })?;
        let image_filename = get_attribute(page, "imageFilename").ok_or_else(|| {
            ExtractorError::MissingMetadata {
                path: source.to_path_buf(),
                reason: "Page element has no imageFilename".to_string(),
            }
        })?;
        let metadata = parse_filename(image_filename)?;

        let records: Vec<Record> = find_descendants(root, &self.namespace, "TextRegion")
            .map(|node| self.read_region(node))
            .map(|region| build_record(region, image_filename, &metadata, source))
            .collect();

        tracing::debug!(
            path = %source.display(),
            image = image_filename,
            regions = records.len(),
            "Extracted document"
        );

        Ok(records)
    }

    /// Read the raw fields of a TextRegion element.
    fn read_region(&self, node: Node<'_, '_>) -> TextRegion {
        TextRegion {
            id: get_attribute(node, "id").unwrap_or_default().to_string(),
            custom: get_attribute(node, "custom").map(str::to_string),
            text_lines: text_equiv_unicode(node, &self.namespace)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Build the record for one region.
fn build_record(
    region: TextRegion,
    image_filename: &str,
    metadata: &PublicationMetadata,
    source: &Path,
) -> Record {
    let attributes = match region.custom.as_deref() {
        Some(custom) => {
            let parsed = tokenize(custom);
            for problem in &parsed.problems {
                tracing::warn!(
                    path = %source.display(),
                    region = %region.id,
                    custom,
                    "Malformed custom attribute: {problem}"
                );
            }
            parsed.region_attributes()
        }
        None => ParsedRegionAttributes::default(),
    };

    let paragraph = normalize_region_text(&region.text_lines.concat());

    Record::new(paragraph, region.id, attributes, image_filename, metadata)
}
