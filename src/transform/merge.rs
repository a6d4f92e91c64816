//! Merge Transform: Stripped → Canonical
//!
//! Merges maximal runs of adjacent format-equal text leaves within every
//! sibling sequence. Merging never crosses an element boundary: each
//! sibling sequence is normalized on its own, nested sequences first.
//!
//! ```text
//! [A("foo", bold), B("bar", bold), C("baz", italic)]
//!   → [("foobar", bold), ("baz", italic)]
//! ```

use smallvec::SmallVec;

use crate::node::{Children, CommentWrapper, Document, Element, Node, Text};
use crate::phase::{Canonical, Live, Stripped};

use super::Transform;

/// Merge adjacent format-equal text leaves in a sibling sequence.
///
/// Pure and idempotent. The merged leaf keeps the attributes of the first
/// leaf in its run; payloads are concatenated in encounter order.
pub fn merge_text_runs(nodes: &[Node]) -> Children {
    if nodes.len() <= 1 {
        return nodes.iter().map(normalize_node).collect();
    }

    let mut out: Children = SmallVec::with_capacity(nodes.len());
    let mut run: Option<Text> = None;

    for node in nodes {
        match node {
            Node::Text(text) => {
                if let Some(acc) = run.as_mut().filter(|acc| acc.format_eq(text)) {
                    acc.text.push_str(&text.text);
                    continue;
                }
                if let Some(done) = run.replace(text.clone()) {
                    out.push(Node::Text(done));
                }
            }
            Node::Element(_) | Node::Comment(_) => {
                if let Some(done) = run.take() {
                    out.push(Node::Text(done));
                }
                out.push(normalize_node(node));
            }
        }
    }

    if let Some(done) = run {
        out.push(Node::Text(done));
    }
    out
}

/// Copy a node, normalizing the sibling sequences beneath it.
fn normalize_node(node: &Node) -> Node {
    match node {
        Node::Element(elem) => Node::Element(Box::new(merge_element(elem))),
        Node::Comment(wrapper) => Node::Comment(Box::new(CommentWrapper {
            attrs: wrapper.attrs.clone(),
            children: merge_text_runs(&wrapper.children),
        })),
        Node::Text(text) => Node::Text(text.clone()),
    }
}

fn merge_element(elem: &Element) -> Element {
    Element {
        kind: elem.kind.clone(),
        attrs: elem.attrs.clone(),
        children: merge_text_runs(&elem.children),
    }
}

// =============================================================================
// MergeTextRuns transform
// =============================================================================

/// Merges adjacent format-equal text leaves.
///
/// Completes the pipeline as Stripped → Canonical. It can also run on its
/// own over a live tree (wrappers stay, and act as run boundaries) or over
/// an already canonical tree (no-op).
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeTextRuns;

impl Transform<Stripped> for MergeTextRuns {
    type To = Canonical;

    fn transform(self, doc: Document<Stripped>) -> Document<Canonical> {
        Document::new(merge_element(&doc.root))
    }
}

impl Transform<Live> for MergeTextRuns {
    type To = Live;

    fn transform(self, doc: Document<Live>) -> Document<Live> {
        Document::new(merge_element(&doc.root))
    }
}

impl Transform<Canonical> for MergeTextRuns {
    type To = Canonical;

    fn transform(self, doc: Document<Canonical>) -> Document<Canonical> {
        Document::new(merge_element(&doc.root))
    }
}
