//! Element type - structural nodes of the document tree
//!
//! Paragraphs, headings, quotes, the root, and childless structural leaves
//! such as line breaks are all elements distinguished by `kind`.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt};

use super::{Children, Node, Text};

/// Kind of the document root element
pub const ROOT_KIND: &str = "root";

/// Kind of a paragraph element
pub const PARAGRAPH_KIND: &str = "paragraph";

/// Kind of a heading element
pub const HEADING_KIND: &str = "heading";

// =============================================================================
// Element
// =============================================================================

/// Structural element with ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Node type name (`paragraph`, `heading`, ...)
    pub kind: CompactString,
    /// Element-specific attributes
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes and no children
    pub fn new(kind: impl Into<CompactString>) -> Self {
        Self {
            kind: kind.into(),
            attrs: Attrs::new(),
            children: SmallVec::new(),
        }
    }

    /// Create the document root
    pub fn root() -> Self {
        Self::new(ROOT_KIND)
    }

    /// Create an empty paragraph
    pub fn paragraph() -> Self {
        Self::new(PARAGRAPH_KIND)
    }

    /// Create a heading (`tag` = `h1`..`h6`)
    pub fn heading(level: u8) -> Self {
        let mut elem = Self::new(HEADING_KIND);
        elem.attrs.set_attr("tag", format!("h{}", level.clamp(1, 6)));
        elem
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder API
    // ─────────────────────────────────────────────────────────────────────────

    /// Builder: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Builder: append any node
    pub fn node(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Builder: append a child element
    pub fn child(self, elem: Element) -> Self {
        self.node(elem)
    }

    /// Builder: append a plain text leaf
    pub fn text(self, content: impl Into<String>) -> Self {
        self.node(Text::new(content))
    }

    /// Append any node
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Check the element kind
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Heading level parsed from the `tag` attribute
    pub fn heading_level(&self) -> Option<u8> {
        if !self.is_kind(HEADING_KIND) {
            return None;
        }
        self.attrs
            .get_str("tag")?
            .strip_prefix('h')?
            .parse()
            .ok()
    }

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// First child, if any
    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Concatenated text of all descendant leaves
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        super::collect_text(&self.children, &mut result);
        result
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::paragraph();
        assert!(elem.is_kind("paragraph"));
        assert!(elem.is_empty());
        assert_eq!(elem.len(), 0);
    }

    #[test]
    fn test_element_builder() {
        let elem = Element::paragraph()
            .attr("direction", "ltr")
            .text("Hello ")
            .child(Element::new("linebreak"))
            .text("world");

        assert_eq!(elem.attrs.get_str("direction"), Some("ltr"));
        assert_eq!(elem.len(), 3);
        assert_eq!(elem.text_content(), "Hello world");
        assert!(elem.first_child().unwrap().is_text());
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(Element::heading(2).heading_level(), Some(2));
        assert_eq!(Element::heading(9).heading_level(), Some(6));
        assert_eq!(Element::paragraph().heading_level(), None);
    }
}
