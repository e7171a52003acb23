//! Namespace-aware helpers for navigating PAGE-XML trees.
//!
//! All lookups match on the expanded name (namespace URI + local name), so
//! elements from another namespace or PAGE revision are ignored.

use roxmltree::Node;

/// Check if a node is an element with the given namespace and local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use transkribus_extractor::xml::has_tag;
///
/// let xml = r#"<p:Page xmlns:p="urn:page"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert!(has_tag(doc.root_element(), "urn:page", "Page"));
/// assert!(!has_tag(doc.root_element(), "urn:other", "Page"));
/// ```
pub fn has_tag(node: Node<'_, '_>, namespace: &str, tag: &str) -> bool {
    node.is_element() && node.has_tag_name((namespace, tag))
}

/// Find the first descendant element (excluding `node` itself) with the given name.
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| has_tag(*n, namespace, tag))
}

/// Find all descendant elements (excluding `node` itself) with the given name,
/// in document order.
pub fn find_descendants<'a, 'input, 'q>(
    node: Node<'a, 'input>,
    namespace: &'q str,
    tag: &'q str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'q
where
    'a: 'q,
    'input: 'q,
{
    node.descendants()
        .skip(1)
        .filter(move |n| has_tag(*n, namespace, tag))
}

/// Find all child elements with the given name.
pub fn find_children<'a, 'input, 'q>(
    node: Node<'a, 'input>,
    namespace: &'q str,
    tag: &'q str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'q
where
    'a: 'q,
    'input: 'q,
{
    node.children()
        .filter(move |n| has_tag(*n, namespace, tag))
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Raw texts of every `TextEquiv/Unicode` below `region`, in document order.
///
/// Matches `Unicode` elements that are direct children of any `TextEquiv`
/// descendant, so region-, line- and word-level transcriptions are all
/// included. Empty `Unicode` elements are skipped.
pub fn text_equiv_unicode<'a>(region: Node<'a, '_>, namespace: &str) -> Vec<&'a str> {
    find_descendants(region, namespace, "TextEquiv")
        .flat_map(|equiv| find_children(equiv, namespace, "Unicode"))
        .filter_map(|unicode| unicode.text())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Remove newlines and turn tabs into single spaces.
///
/// # Examples
/// ```
/// use transkribus_extractor::xml::normalize_region_text;
///
/// assert_eq!(normalize_region_text("Hello\nWorld\t!"), "HelloWorld !");
/// ```
pub fn normalize_region_text(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\n')
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}
