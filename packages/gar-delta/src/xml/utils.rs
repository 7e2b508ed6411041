//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::{Document, Node};

use crate::error::XmlFileError;

/// Strip a leading UTF-8 byte order mark.
///
/// Registry files and service responses may carry one; the XML parser
/// rejects it.
///
/// # Examples
/// ```
/// use gar_delta_report::xml::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}<root/>"), "<root/>");
/// assert_eq!(strip_bom("<root/>"), "<root/>");
/// ```
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Get the tag name without namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use gar_delta_report::xml::get_tag_name;
///
/// let xml = r#"<ns:root xmlns:ns="http://example.com"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "root");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// All descendant elements with the given local name, in document order.
pub fn elements_named<'a, 'input>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.descendants()
        .filter(move |n| n.is_element() && get_tag_name(*n) == tag)
}

/// Find the first descendant element named `tag` in the root element's
/// default namespace.
///
/// When the root declares no default namespace only un-namespaced elements
/// match.
pub fn find_in_default_namespace<'a, 'input>(
    doc: &'a Document<'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    let default_ns = doc.root_element().lookup_namespace_uri(None);
    doc.descendants().find(|n| {
        n.is_element() && get_tag_name(*n) == tag && n.tag_name().namespace() == default_ns
    })
}

/// Concatenated text of all descendant text nodes, trimmed.
pub fn collect_text(node: Node<'_, '_>) -> String {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    text.trim().to_string()
}

/// Value of an optional string attribute, or an empty string when absent.
pub fn text_attribute(node: Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

/// Parse a required integer attribute.
///
/// Surrounding whitespace is ignored.
pub fn required_int_attribute(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<i32, XmlFileError> {
    let raw = node
        .attribute(attribute)
        .ok_or(XmlFileError::MissingAttribute { element, attribute })?;
    raw.trim()
        .parse()
        .map_err(|_| XmlFileError::InvalidInteger {
            element,
            attribute,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_named_ignores_other_tags() {
        let xml = r#"<ITEMS><OBJECT/><OTHER/><OBJECT/></ITEMS>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(elements_named(&doc, "OBJECT").count(), 2);
    }

    #[test]
    fn test_find_in_default_namespace() {
        let xml = r#"<Info xmlns="urn:service"><GarXMLDeltaURL>http://x/delta.zip</GarXMLDeltaURL></Info>"#;
        let doc = Document::parse(xml).unwrap();
        let node = find_in_default_namespace(&doc, "GarXMLDeltaURL").unwrap();
        assert_eq!(collect_text(node), "http://x/delta.zip");
    }

    #[test]
    fn test_find_in_default_namespace_skips_foreign_namespace() {
        let xml = r#"<Info xmlns="urn:service" xmlns:o="urn:other"><o:GarXMLDeltaURL>wrong</o:GarXMLDeltaURL><GarXMLDeltaURL>right</GarXMLDeltaURL></Info>"#;
        let doc = Document::parse(xml).unwrap();
        let node = find_in_default_namespace(&doc, "GarXMLDeltaURL").unwrap();
        assert_eq!(collect_text(node), "right");
    }

    #[test]
    fn test_find_in_default_namespace_without_namespace() {
        let xml = r#"<Info><GarXMLDeltaURL>plain</GarXMLDeltaURL></Info>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_in_default_namespace(&doc, "GarXMLDeltaURL").is_some());
        assert!(find_in_default_namespace(&doc, "Missing").is_none());
    }

    #[test]
    fn test_collect_text_nested() {
        let xml = r#"<a>  one <b>two</b> three  </a>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(collect_text(doc.root_element()), "one two three");
    }

    #[test]
    fn test_text_attribute_missing_is_empty() {
        let doc = Document::parse(r#"<OBJECT NAME="Ленина"/>"#).unwrap();
        let node = doc.root_element();
        assert_eq!(text_attribute(node, "NAME"), "Ленина");
        assert_eq!(text_attribute(node, "TYPENAME"), "");
    }

    #[test]
    fn test_required_int_attribute() {
        let doc = Document::parse(r#"<OBJECT LEVEL=" 7 " ISACTIVE="yes"/>"#).unwrap();
        let node = doc.root_element();

        assert_eq!(required_int_attribute(node, "OBJECT", "LEVEL").unwrap(), 7);
        assert!(matches!(
            required_int_attribute(node, "OBJECT", "ISACTIVE"),
            Err(XmlFileError::InvalidInteger { attribute: "ISACTIVE", .. })
        ));
        assert!(matches!(
            required_int_attribute(node, "OBJECT", "OPERTYPEID"),
            Err(XmlFileError::MissingAttribute { attribute: "OPERTYPEID", .. })
        ));
    }
}
