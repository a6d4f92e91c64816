//! The transform trait.
//!
//! Every rewrite of a tree is a [`Transform`] from one phase to another.
//! The canonical chain is `Live → Stripped → Canonical`; transforms that
//! keep the phase (`To = From`) can also be switched on or off inside a
//! [`Pipeline`](super::Pipeline).

use crate::node::Document;
use crate::phase::Phase;

/// Rewrite a document, moving it from phase `From` to [`Self::To`].
///
/// Implementations must not fail: anything a tree of phase `From` can hold
/// has a representation in `To`.
pub trait Transform<From: Phase>: Sized {
    /// Phase of the output tree.
    type To: Phase;

    /// Consume the document and return the rewritten one.
    fn transform(self, doc: Document<From>) -> Document<Self::To>;
}

// =============================================================================
// IdentityTransform
// =============================================================================

/// Returns the document untouched, in any phase.
///
/// This is the branch [`Pipeline::pipe_if`](super::Pipeline::pipe_if) takes
/// when its condition is false, e.g. merging runs of a live tree only when
/// the host asks for it:
///
/// ```
/// use canon_vdom::{Document, Element, Live, MergeTextRuns, Pipeline};
///
/// let doc: Document<Live> = Document::new(Element::root().child(Element::paragraph().text("Hello, ").text("world")));
///
/// let kept = Pipeline::new(doc.clone()).pipe_if(false, MergeTextRuns).into_inner();
/// assert_eq!(kept.leaves().len(), 2);
///
/// let merged = Pipeline::new(doc).pipe_if(true, MergeTextRuns).into_inner();
/// assert_eq!(merged.leaves().len(), 1);
/// assert_eq!(merged.text_content(), "Hello, world");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl<P: Phase> Transform<P> for IdentityTransform {
    type To = P;

    #[inline]
    fn transform(self, doc: Document<P>) -> Document<P> {
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CommentWrapper, Element, Text};
    use crate::phase::{Canonical, Live};

    #[test]
    fn test_identity_keeps_comment_wrappers() {
        let wrapper = CommentWrapper::for_annotation("ann-1").node(Text::new("b"));
        let doc: Document<Live> = Document::new(Element::root().child(Element::paragraph().text("a").node(wrapper)));

        let out = IdentityTransform.transform(doc);
        assert_eq!(out.comment_count(), 1);
        assert_eq!(out.leaves().len(), 2);
        assert_eq!(out.phase_name(), Live::NAME);
    }

    #[test]
    fn test_identity_in_canonical_phase() {
        let doc: Document<Canonical> = Document::new(Element::root().child(Element::paragraph().text("x")));
        let out = IdentityTransform.transform(doc);
        assert_eq!(out.phase_name(), Canonical::NAME);
        assert_eq!(out.text_content(), "x");
    }
}
