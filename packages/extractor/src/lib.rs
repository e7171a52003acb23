//! Transkribus extractor - Turn PAGE-XML newspaper pages into CSV tables.
//!
//! Each PAGE-XML document describes one scanned newspaper page. Every
//! `TextRegion` on the page becomes one row carrying the region's text, its
//! structure type and reading order, and publication metadata decoded from the
//! page's image filename.
//!
//! # Example
//!
//! ```
//! use transkribus_extractor::filename::parse_filename;
//!
//! let meta = parse_filename("0001_QTN_1952_07_05_001_SB_Zsn128163MR.jpg").unwrap();
//! assert_eq!(meta.newspaper, "QTN");
//! assert_eq!(meta.date, "05");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and the explicit config value
//! - [`types`]: Core data types (Record, PublicationMetadata, ...)
//! - [`error`]: Error types and Result alias
//! - [`filename`]: Publication metadata from image filenames
//! - [`custom`]: Tokenizer for the region `custom` attribute
//! - [`xml`]: Namespace-aware XML helpers
//! - [`extractor`]: One document to a sequence of records
//! - [`table`]: CSV reading and writing
//! - [`batch`]: Directory-wide conversion with per-document outcomes
//! - [`merge`]: Consolidation of per-document tables
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod cli;
pub mod config;
pub mod custom;
pub mod error;
pub mod extractor;
pub mod filename;
pub mod merge;
pub mod table;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use batch::{BatchRunner, BatchSummary, DocumentOutcome};
pub use config::ExtractorConfig;
pub use custom::parse_region_attributes;
pub use error::{ErrorKind, ExtractorError, Result};
pub use extractor::DocumentExtractor;
pub use filename::parse_filename;
pub use merge::merge_tables;
pub use types::{ParsedRegionAttributes, PublicationMetadata, Record, TextRegion};
