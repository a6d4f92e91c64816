//! Comment wrapper type
//!
//! Marks a contiguous range of content as commented. The wrapper has no
//! content of its own and never reaches storage.

use crate::attr::{Attrs, AttrsExt};

use super::{Children, Node};

/// Wire name of the comment wrapper node type
pub const COMMENT_KIND: &str = "comment";

/// Attribute linking a wrapper to its overlay annotation
pub const ANNOTATION_ID_ATTR: &str = "annotationId";

/// Wrapper around commented content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentWrapper {
    /// Wrapper attributes (overlay link, version, ...)
    pub attrs: Attrs,
    /// The commented content
    pub children: Children,
}

impl CommentWrapper {
    /// Create an empty wrapper
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a wrapper linked to an annotation
    pub fn for_annotation(annotation_id: impl Into<String>) -> Self {
        let mut wrapper = Self::new();
        wrapper.attrs.set_attr(ANNOTATION_ID_ATTR, annotation_id.into());
        wrapper
    }

    /// Builder: append any node
    pub fn node(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Annotation this wrapper belongs to
    pub fn annotation_id(&self) -> Option<&str> {
        self.attrs.get_str(ANNOTATION_ID_ATTR)
    }

    /// Check if wrapper has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl From<CommentWrapper> for Node {
    fn from(wrapper: CommentWrapper) -> Self {
        Node::Comment(Box::new(wrapper))
    }
}
