//! Strip Transform: Live → Stripped
//!
//! Removes every comment wrapper from a tree and splices the wrapper's
//! children into the parent's child sequence at the wrapper's position.
//!
//! # Sibling sequences, not nodes
//!
//! A wrapper expands into zero, one or many siblings, so the pass maps a
//! node to a sequence and flat-concatenates those sequences across the
//! sibling list:
//!
//! ```text
//! [a, Comment[b, Comment[c]], d]  →  [a, b, c, d]
//! [a, Comment[], d]               →  [a, d]
//! ```

use smallvec::SmallVec;

use crate::node::{Children, Document, Element, Node};
use crate::phase::{Live, Stripped};

use super::Transform;

/// Strip comment wrappers from a sibling sequence.
///
/// Pure: the input is only read, and the returned children share nothing
/// with it. Relative order of all leaves is preserved.
pub fn strip_comments(nodes: &[Node]) -> Children {
    let mut out = SmallVec::with_capacity(nodes.len());
    strip_into(nodes, &mut out);
    out
}

/// Depth-first, left-to-right: wrappers push their stripped children
/// straight into the parent's output.
fn strip_into(nodes: &[Node], out: &mut Children) {
    for node in nodes {
        match node {
            Node::Comment(wrapper) => strip_into(&wrapper.children, out),
            Node::Element(elem) => out.push(Node::Element(Box::new(strip_element(elem)))),
            Node::Text(text) => out.push(Node::Text(text.clone())),
        }
    }
}

fn strip_element(elem: &Element) -> Element {
    Element {
        kind: elem.kind.clone(),
        attrs: elem.attrs.clone(),
        children: strip_comments(&elem.children),
    }
}

// =============================================================================
// StripComments transform
// =============================================================================

/// Removes comment wrappers: Live → Stripped
#[derive(Debug, Clone, Copy, Default)]
pub struct StripComments;

impl Transform<Live> for StripComments {
    type To = Stripped;

    fn transform(self, doc: Document<Live>) -> Document<Stripped> {
        Document::new(strip_element(&doc.root))
    }
}
