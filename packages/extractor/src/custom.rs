//! Tokenizer for the `custom` attribute on PAGE regions.
//!
//! Transkribus stores auxiliary region data as a small key/value language:
//!
//! ```text
//! readingOrder {index:3;} structure {type:heading;}
//! ```
//!
//! An entry is either a group `name {key:value; key:value;}` or a bare pair
//! `key:value;`. Values run to the next `;`, `}` or the end of the input.
//! A value missing its `;` also ends where the next group `name {` starts.
//! Tokenizing never fails: malformed pieces are reported as
//! [`CustomSyntaxError`]s next to whatever entries could still be read.

use thiserror::Error;

use crate::types::ParsedRegionAttributes;

/// Group holding the reading order index.
pub const READING_ORDER_GROUP: &str = "readingOrder";

/// Key of the reading order index.
pub const INDEX_KEY: &str = "index";

/// Key of the structure type, bare or inside a group.
pub const TYPE_KEY: &str = "type";

/// One `key:value` pair, with the group it appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEntry {
    pub group: Option<String>,
    pub key: String,
    pub value: String,
}

/// A malformed piece of a custom attribute. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomSyntaxError {
    #[error("group '{group}' opened at offset {offset} is never closed")]
    UnclosedGroup { group: String, offset: usize },

    #[error("unexpected '}}' at offset {offset}")]
    UnexpectedClose { offset: usize },

    #[error("'{text}' at offset {offset} is not followed by ':' or '{{'")]
    MissingSeparator { text: String, offset: usize },

    #[error("empty key at offset {offset}")]
    EmptyKey { offset: usize },

    #[error("value of '{key}' at offset {offset} runs into the next group without ';'")]
    UnterminatedValue { key: String, offset: usize },
}

/// Tokenized custom attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomAttribute {
    pub entries: Vec<CustomEntry>,
    pub problems: Vec<CustomSyntaxError>,
}

impl CustomAttribute {
    /// Whether tokenizing reported no problems.
    pub fn is_well_formed(&self) -> bool {
        self.problems.is_empty()
    }

    /// Entries of the named group.
    pub fn group<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CustomEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.group.as_deref() == Some(name))
    }

    /// First non-empty value of `key` inside `group`.
    pub fn value(&self, group: &str, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.group.as_deref() == Some(group) && e.key == key && !e.value.is_empty())
            .map(|e| e.value.as_str())
    }

    /// First non-empty value of `key`, bare or in any group.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key && !e.value.is_empty())
            .map(|e| e.value.as_str())
    }

    /// Region type and reading order carried by this attribute.
    pub fn region_attributes(&self) -> ParsedRegionAttributes {
        let reading_order = self
            .value(READING_ORDER_GROUP, INDEX_KEY)
            .filter(|v| v.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|v| v.parse::<u64>().ok());

        ParsedRegionAttributes {
            region_type: self.first(TYPE_KEY).map(str::to_string),
            reading_order,
        }
    }
}

/// Decode region type and reading order from an optional custom attribute.
///
/// Absent input, absent tokens and malformed content all yield `None` fields.
///
/// # Examples
/// ```
/// use transkribus_extractor::custom::parse_region_attributes;
///
/// let attrs = parse_region_attributes(Some("readingOrder {index:3;} type:heading;"));
/// assert_eq!(attrs.region_type.as_deref(), Some("heading"));
/// assert_eq!(attrs.reading_order, Some(3));
///
/// let attrs = parse_region_attributes(None);
/// assert_eq!(attrs.region_type, None);
/// assert_eq!(attrs.reading_order, None);
/// ```
pub fn parse_region_attributes(custom: Option<&str>) -> ParsedRegionAttributes {
    custom
        .map(|c| tokenize(c).region_attributes())
        .unwrap_or_default()
}

/// Whether whitespace at `i` is followed by `name {`.
fn opens_group(bytes: &[u8], mut i: usize) -> bool {
    let len = bytes.len();
    while i < len && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let name_start = i;
    while i < len
        && !matches!(bytes[i], b':' | b'{' | b';' | b'}')
        && !bytes[i].is_ascii_whitespace()
    {
        i += 1;
    }
    if i == name_start {
        return false;
    }
    while i < len && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    bytes.get(i) == Some(&b'{')
}

/// Split a custom attribute into entries.
pub fn tokenize(input: &str) -> CustomAttribute {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out = CustomAttribute::default();
    // (name, offset) of the currently open group
    let mut open: Option<(String, usize)> = None;
    let mut i = 0;

    let is_space = |b: u8| b.is_ascii_whitespace();

    loop {
        while i < len && is_space(bytes[i]) {
            i += 1;
        }
        if i >= len {
            break;
        }

        match bytes[i] {
            b'}' => {
                if open.take().is_none() {
                    out.problems.push(CustomSyntaxError::UnexpectedClose { offset: i });
                }
                i += 1;
            }
            b';' => i += 1,
            _ => {
                let start = i;
                while i < len && !matches!(bytes[i], b':' | b'{' | b';' | b'}') && !is_space(bytes[i])
                {
                    i += 1;
                }
                let name = &input[start..i];

                while i < len && is_space(bytes[i]) {
                    i += 1;
                }

                match bytes.get(i) {
                    Some(b'{') => {
                        if let Some((group, offset)) = open.take() {
                            out.problems
                                .push(CustomSyntaxError::UnclosedGroup { group, offset });
                        }
                        if name.is_empty() {
                            out.problems.push(CustomSyntaxError::EmptyKey { offset: start });
                        }
                        open = Some((name.to_string(), start));
                        i += 1;
                    }
                    Some(b':') => {
                        i += 1;
                        let value_start = i;
                        let mut unterminated = false;
                        while i < len && !matches!(bytes[i], b';' | b'}') {
                            if is_space(bytes[i]) && opens_group(bytes, i) {
                                unterminated = true;
                                break;
                            }
                            i += 1;
                        }
                        if unterminated && !name.is_empty() {
                            out.problems.push(CustomSyntaxError::UnterminatedValue {
                                key: name.to_string(),
                                offset: value_start,
                            });
                        }
                        if name.is_empty() {
                            out.problems.push(CustomSyntaxError::EmptyKey { offset: start });
                        } else {
                            out.entries.push(CustomEntry {
                                group: open.as_ref().map(|(g, _)| g.clone()),
                                key: name.to_string(),
                                value: input[value_start..i].trim().to_string(),
                            });
                        }
                        if i < len && bytes[i] == b';' {
                            i += 1;
                        }
                    }
                    _ => {
                        out.problems.push(CustomSyntaxError::MissingSeparator {
                            text: name.to_string(),
                            offset: start,
                        });
                    }
                }
            }
        }
    }

    if let Some((group, offset)) = open {
        out.problems
            .push(CustomSyntaxError::UnclosedGroup { group, offset });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(group: Option<&str>, key: &str, value: &str) -> CustomEntry {
        CustomEntry {
            group: group.map(str::to_string),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_tokenize_transkribus_attribute() {
        let attr = tokenize("readingOrder {index:0;} structure {type:heading;}");
        assert!(attr.is_well_formed());
        assert_eq!(
            attr.entries,
            vec![
                entry(Some("readingOrder"), "index", "0"),
                entry(Some("structure"), "type", "heading"),
            ]
        );
    }

    #[test]
    fn test_tokenize_bare_pair_and_multi_key_group() {
        let attr = tokenize("textStyle {offset:0; length:12;fontSize:9.5;} type:caption;");
        assert!(attr.is_well_formed());
        assert_eq!(attr.group("textStyle").count(), 3);
        assert_eq!(attr.value("textStyle", "fontSize"), Some("9.5"));
        assert_eq!(attr.first("type"), Some("caption"));
    }

    #[test]
    fn test_region_attributes_from_mixed_input() {
        let attrs = parse_region_attributes(Some("readingOrder {index:3;} type:heading;"));
        assert_eq!(attrs.region_type.as_deref(), Some("heading"));
        assert_eq!(attrs.reading_order, Some(3));
    }

    #[test]
    fn test_missing_type_is_none() {
        let attrs = parse_region_attributes(Some("readingOrder {index:7;}"));
        assert_eq!(attrs.region_type, None);
        assert_eq!(attrs.reading_order, Some(7));
    }

    #[test]
    fn test_missing_reading_order_is_none() {
        let attrs = parse_region_attributes(Some("structure {type:paragraph;}"));
        assert_eq!(attrs.region_type.as_deref(), Some("paragraph"));
        assert_eq!(attrs.reading_order, None);
    }

    #[test]
    fn test_absent_attribute() {
        assert_eq!(parse_region_attributes(None), ParsedRegionAttributes::default());
    }

    #[test]
    fn test_empty_attribute() {
        let attr = tokenize("");
        assert!(attr.is_well_formed());
        assert!(attr.entries.is_empty());
        assert_eq!(parse_region_attributes(Some("")), ParsedRegionAttributes::default());
    }

    #[test]
    fn test_non_numeric_index_ignored() {
        let attrs = parse_region_attributes(Some("readingOrder {index:-1;}"));
        assert_eq!(attrs.reading_order, None);

        let attrs = parse_region_attributes(Some("readingOrder {index:abc;}"));
        assert_eq!(attrs.reading_order, None);
    }

    #[test]
    fn test_index_outside_reading_order_group_ignored() {
        let attrs = parse_region_attributes(Some("other {index:4;}"));
        assert_eq!(attrs.reading_order, None);
    }

    #[test]
    fn test_value_terminated_by_end_of_input() {
        let attrs = parse_region_attributes(Some("type:heading"));
        assert_eq!(attrs.region_type.as_deref(), Some("heading"));
    }

    #[test]
    fn test_empty_type_value_skipped() {
        let attrs = parse_region_attributes(Some("type:; structure {type:footnote;}"));
        assert_eq!(attrs.region_type.as_deref(), Some("footnote"));
    }

    #[test]
    fn test_unclosed_group_is_reported_but_read() {
        let attr = tokenize("readingOrder {index:2;");
        assert_eq!(
            attr.problems,
            vec![CustomSyntaxError::UnclosedGroup {
                group: "readingOrder".to_string(),
                offset: 0,
            }]
        );
        assert_eq!(attr.region_attributes().reading_order, Some(2));
    }

    #[test]
    fn test_stray_close_and_bare_word() {
        let attr = tokenize("} garbage type:heading;");
        assert_eq!(
            attr.problems,
            vec![
                CustomSyntaxError::UnexpectedClose { offset: 0 },
                CustomSyntaxError::MissingSeparator {
                    text: "garbage".to_string(),
                    offset: 2,
                },
            ]
        );
        assert_eq!(attr.first("type"), Some("heading"));
    }

    #[test]
    fn test_unterminated_value_stops_at_next_group() {
        let attr = tokenize("type:heading readingOrder {index:2;}");
        assert_eq!(
            attr.problems,
            vec![CustomSyntaxError::UnterminatedValue {
                key: "type".to_string(),
                offset: 5,
            }]
        );
        let attrs = attr.region_attributes();
        assert_eq!(attrs.region_type.as_deref(), Some("heading"));
        assert_eq!(attrs.reading_order, Some(2));
    }

    #[test]
    fn test_value_with_spaces_kept_whole() {
        let attr = tokenize("structure {type:letter to the editor;}");
        assert!(attr.is_well_formed());
        assert_eq!(attr.first("type"), Some("letter to the editor"));
    }

    #[test]
    fn test_large_reading_order_index() {
        let attrs = parse_region_attributes(Some("readingOrder {index:99999999999;}"));
        assert_eq!(attrs.reading_order, Some(99_999_999_999));
    }

    #[test]
    fn test_value_lookup_by_group() {
        let attr = tokenize("a {index:1;} readingOrder {index:5;}");
        assert_eq!(attr.value("readingOrder", "index"), Some("5"));
        assert_eq!(attr.value("a", "index"), Some("1"));
        assert_eq!(attr.value("missing", "index"), None);
    }

    #[test]
    fn test_empty_key_reported() {
        let attr = tokenize(":value;");
        assert_eq!(attr.problems, vec![CustomSyntaxError::EmptyKey { offset: 0 }]);
        assert!(attr.entries.is_empty());
    }

    #[test]
    fn test_non_ascii_values() {
        let attr = tokenize("structure {type:überschrift;}");
        assert_eq!(attr.first("type"), Some("überschrift"));
    }
}
