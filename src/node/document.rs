//! Document type and related utilities
//!
//! The root container for document trees, with query and traversal APIs.

use std::marker::PhantomData;

use crate::phase::{Canonical, Live, Phase};

use super::{Element, Node, Text};

// =============================================================================
// Document<P>
// =============================================================================

/// Root document container, typed by phase
#[derive(Debug, Clone, PartialEq)]
pub struct Document<P: Phase> {
    /// Root element (kind `root`)
    pub root: Element,
    phase: PhantomData<P>,
}

impl<P: Phase> Document<P> {
    /// Create a new document with a root element
    pub fn new(root: Element) -> Self {
        Self {
            root,
            phase: PhantomData,
        }
    }

    /// Get the phase name for debugging
    pub fn phase_name(&self) -> &'static str {
        P::NAME
    }

    /// Re-tag the document with another phase.
    ///
    /// Only transforms and the deserializer may do this; they are the ones
    /// that establish the target phase's invariants.
    pub(crate) fn retag<Q: Phase>(self) -> Document<Q> {
        Document::new(self.root)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Find first element matching predicate (depth-first search)
    pub fn find_element<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        Self::find_in_element(&self.root, &predicate)
    }

    fn find_in_element<'a, F>(elem: &'a Element, predicate: &F) -> Option<&'a Element>
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(elem) {
            return Some(elem);
        }
        Self::find_in_children(&elem.children, predicate)
    }

    fn find_in_children<'a, F>(children: &'a [Node], predicate: &F) -> Option<&'a Element>
    where
        F: Fn(&Element) -> bool,
    {
        for child in children {
            let found = match child {
                Node::Element(e) => Self::find_in_element(e, predicate),
                Node::Comment(c) => Self::find_in_children(&c.children, predicate),
                Node::Text(_) => None,
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Text leaves in document order
    pub fn leaves(&self) -> Vec<&Text> {
        super::leaves(&self.root.children)
    }

    /// Concatenated text of the whole document
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    /// Number of comment wrappers at any depth
    pub fn comment_count(&self) -> usize {
        self.collect_stats().comment_count
    }

    /// Collect statistics about the document
    pub fn collect_stats(&self) -> Stats {
        let mut stats = Stats::default();
        stats.element_count += 1;
        Self::collect_stats_recursive(&self.root.children, &mut stats);
        stats
    }

    fn collect_stats_recursive(children: &[Node], stats: &mut Stats) {
        for child in children {
            match child {
                Node::Element(e) => {
                    stats.element_count += 1;
                    Self::collect_stats_recursive(&e.children, stats);
                }
                Node::Comment(c) => {
                    stats.comment_count += 1;
                    Self::collect_stats_recursive(&c.children, stats);
                }
                Node::Text(_) => stats.text_count += 1,
            }
        }
    }
}

impl Document<Live> {
    /// Root holding a single empty paragraph, the fallback content
    pub fn empty_paragraph() -> Self {
        Self::new(Element::root().child(Element::paragraph()))
    }
}

impl Document<Canonical> {
    /// A canonical tree is a valid live tree
    pub fn into_live(self) -> Document<Live> {
        self.retag()
    }
}

// =============================================================================
// Stats - document statistics
// =============================================================================

/// Document statistics collected from traversal
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub element_count: usize,
    pub comment_count: usize,
    pub text_count: usize,
}

impl Stats {
    /// Total node count (root included)
    pub fn node_count(&self) -> usize {
        self.element_count + self.comment_count + self.text_count
    }
}
