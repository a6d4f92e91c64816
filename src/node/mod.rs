//! Node types for document trees.
//!
//! This module provides `Element`, `CommentWrapper`, `Text`, the `Node`
//! sum type over them, and the phase-typed `Document` root.
//!
//! # Key Features
//!
//! - Exactly three node kinds, matched exhaustively by every pass
//! - Children stored inline (`SmallVec`) for the common short sibling run
//! - `Document<P>` tracks in its type whether wrappers may still be present

mod comment;
mod document;
mod element;
mod text;

pub use comment::{ANNOTATION_ID_ATTR, COMMENT_KIND, CommentWrapper};
pub use document::{Document, Stats};
pub use element::{Element, HEADING_KIND, PARAGRAPH_KIND, ROOT_KIND};
pub use text::{Text, TextFormat, TextMode};

use smallvec::SmallVec;

/// Node in a document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Box<Element>),
    Comment(Box<CommentWrapper>),
    Text(Text),
}

impl Node {
    // Generates for each variant:
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    crate::impl_enum_accessors!(
        element => Element: Element,
        comment => Comment: CommentWrapper,
        text => Text: Text,
    );

    /// Children of a non-leaf node
    pub fn children(&self) -> Option<&Children> {
        match self {
            Node::Element(e) => Some(&e.children),
            Node::Comment(c) => Some(&c.children),
            Node::Text(_) => None,
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 8]>;

/// Append the text of every leaf under `nodes`, in document order
pub(crate) fn collect_text(nodes: &[Node], buf: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => buf.push_str(&t.text),
            Node::Element(e) => collect_text(&e.children, buf),
            Node::Comment(c) => collect_text(&c.children, buf),
        }
    }
}

/// Collect references to every text leaf under `nodes`, in document order
pub fn leaves(nodes: &[Node]) -> Vec<&Text> {
    fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Text>) {
        for node in nodes {
            match node {
                Node::Text(t) => out.push(t),
                Node::Element(e) => walk(&e.children, out),
                Node::Comment(c) => walk(&c.children, out),
            }
        }
    }

    let mut out = Vec::new();
    walk(nodes, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let mut node: Node = Element::paragraph().text("a").into();
        assert!(node.is_element());
        assert!(!node.is_comment());
        assert_eq!(node.as_element().unwrap().len(), 1);
        node.as_element_mut().unwrap().push(Text::new("b"));
        assert_eq!(node.children().unwrap().len(), 2);

        let leaf: Node = Text::new("x").into();
        assert!(leaf.is_text());
        assert!(leaf.children().is_none());

        let wrapper: Node = CommentWrapper::new().node(Text::new("c")).into();
        assert!(wrapper.is_comment());
        assert_eq!(wrapper.as_comment().unwrap().children.len(), 1);
    }

    #[test]
    fn test_leaves_in_document_order() {
        let nodes: Children = smallvec::smallvec![
            Text::new("a").into(),
            CommentWrapper::new()
                .node(Text::new("b"))
                .node(Element::new("link").text("c"))
                .into(),
            Text::new("d").into(),
        ];
        let texts: Vec<_> = leaves(&nodes).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }
}
