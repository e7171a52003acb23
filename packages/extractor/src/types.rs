//! Core data types for the extractor.

use serde::{Deserialize, Serialize};

/// Publication identifiers decoded from an image filename.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicationMetadata {
    /// Newspaper name or code (e.g., "QTN").
    pub newspaper: String,

    pub year: String,

    pub month: String,

    /// Day of the month.
    pub date: String,

    pub page_num: String,
}

/// Typed fields decoded from a region's `custom` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRegionAttributes {
    /// Structure type (e.g., "heading", "paragraph").
    pub region_type: Option<String>,

    /// Index from the `readingOrder` group.
    pub reading_order: Option<u64>,
}

/// A TextRegion element as read from a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRegion {
    /// Value of the `id` attribute (empty when absent).
    pub id: String,

    /// Raw `custom` attribute.
    pub custom: Option<String>,

    /// `TextEquiv/Unicode` texts in document order, not yet normalized.
    pub text_lines: Vec<String>,
}

/// One output row: a text region plus its page's publication metadata.
///
/// Field order matches the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub paragraph: String,
    pub paragraph_idx: String,
    pub readingorder_idx: Option<u64>,
    pub region_type: Option<String>,
    pub filename: String,
    pub newspaper: String,
    pub year: String,
    pub month: String,
    pub date: String,
    pub page_num: String,
}

impl Record {
    /// Merge a region's fields with its document's metadata.
    pub fn new(
        paragraph: String,
        paragraph_idx: String,
        attributes: ParsedRegionAttributes,
        filename: &str,
        metadata: &PublicationMetadata,
    ) -> Self {
        Self {
            paragraph,
            paragraph_idx,
            readingorder_idx: attributes.reading_order,
            region_type: attributes.region_type,
            filename: filename.to_string(),
            newspaper: metadata.newspaper.clone(),
            year: metadata.year.clone(),
            month: metadata.month.clone(),
            date: metadata.date.clone(),
            page_num: metadata.page_num.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new_merges_metadata() {
        let metadata = PublicationMetadata {
            newspaper: "QTN".to_string(),
            year: "1952".to_string(),
            month: "07".to_string(),
            date: "05".to_string(),
            page_num: "001".to_string(),
        };
        let attributes = ParsedRegionAttributes {
            region_type: Some("heading".to_string()),
            reading_order: Some(2),
        };

        let record = Record::new(
            "Text".to_string(),
            "r1".to_string(),
            attributes,
            "0001_QTN_1952_07_05_001_SB.jpg",
            &metadata,
        );

        assert_eq!(record.paragraph_idx, "r1");
        assert_eq!(record.readingorder_idx, Some(2));
        assert_eq!(record.region_type.as_deref(), Some("heading"));
        assert_eq!(record.filename, "0001_QTN_1952_07_05_001_SB.jpg");
        assert_eq!(record.newspaper, "QTN");
        assert_eq!(record.page_num, "001");
    }
}
