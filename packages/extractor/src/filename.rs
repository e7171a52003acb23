//! Publication metadata encoded in page image filenames.
//!
//! Filenames follow `<id>_<newspaper>_<year>_<month>_<day>_<page>_<rest...>`,
//! e.g. `0001_QTN_1952_07_05_001_SB_Zsn128163MR.jpg`. Segments are read by
//! position only; their content is not validated.

use crate::config::MIN_FILENAME_SEGMENTS;
use crate::error::{ExtractorError, Result};
use crate::types::PublicationMetadata;

/// Strip any directory prefix, accepting both `/` and `\` separators.
///
/// `imageFilename` values written on Windows keep backslashes, so
/// `Path::file_name` alone is not enough.
fn basename(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
}

/// Decode publication metadata from a filename or path.
///
/// # Examples
/// ```
/// use transkribus_extractor::filename::parse_filename;
///
/// let meta = parse_filename("scans/0001_QTN_1952_07_05_001_SB_Zsn128163MR.jpg").unwrap();
/// assert_eq!(meta.newspaper, "QTN");
/// assert_eq!(meta.year, "1952");
/// assert_eq!(meta.page_num, "001");
///
/// assert!(parse_filename("0001_QTN_1952.jpg").is_err());
/// ```
pub fn parse_filename(filename: &str) -> Result<PublicationMetadata> {
    let name = basename(filename);
    let segments: Vec<&str> = name.split('_').collect();

    if segments.len() < MIN_FILENAME_SEGMENTS {
        return Err(ExtractorError::Format {
            filename: name.to_string(),
        });
    }

    Ok(PublicationMetadata {
        newspaper: segments[1].to_string(),
        year: segments[2].to_string(),
        month: segments[3].to_string(),
        date: segments[4].to_string(),
        page_num: segments[5].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_full_filename() {
        let meta = parse_filename("0001_QTN_1952_07_05_001_SB_Zsn128163MR.jpg").unwrap();
        assert_eq!(
            meta,
            PublicationMetadata {
                newspaper: "QTN".to_string(),
                year: "1952".to_string(),
                month: "07".to_string(),
                date: "05".to_string(),
                page_num: "001".to_string(),
            }
        );
    }

    #[test]
    fn test_trailing_segments_do_not_matter() {
        let short = parse_filename("7_ABC_1900_01_02_003").unwrap();
        let long = parse_filename("7_ABC_1900_01_02_003_x_y_z_w.tif").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.page_num, "003");
    }

    #[test]
    fn test_exactly_six_segments_keeps_extension_in_page() {
        let meta = parse_filename("7_ABC_1900_01_02_003.jpg").unwrap();
        assert_eq!(meta.page_num, "003.jpg");
    }

    #[test]
    fn test_directory_prefix_discarded() {
        let unix = parse_filename("/data/my_dir_with_many_parts/0001_QTN_1952_07_05_001_SB.jpg")
            .unwrap();
        let windows = parse_filename(r"C:\scans\0001_QTN_1952_07_05_001_SB.jpg").unwrap();
        assert_eq!(unix.newspaper, "QTN");
        assert_eq!(unix, windows);
    }

    #[test]
    fn test_too_few_segments() {
        let err = parse_filename("dir_a_b_c/0001_QTN_1952_07_05.jpg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("0001_QTN_1952_07_05.jpg"));
    }

    #[test]
    fn test_empty_filename() {
        assert!(parse_filename("").is_err());
    }
}
