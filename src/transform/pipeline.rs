//! Document processing pipeline and the canonicalization entry point.

use crate::node::Document;
use crate::phase::{Canonical, Live, Phase};

use super::{IdentityTransform, MergeTextRuns, StripComments, Transform};

// =============================================================================
// canonicalize
// =============================================================================

/// Produce the canonical form of a live tree.
///
/// `canonicalize(t) = merge(strip(t))`. The order is fixed: removing a
/// wrapper can make two previously separated text leaves adjacent, and only
/// a merge pass that runs afterwards can join them.
///
/// The live tree is only read; the result is an independent copy.
pub fn canonicalize(doc: &Document<Live>) -> Document<Canonical> {
    Pipeline::new(doc.clone())
        .pipe(StripComments)
        .pipe(MergeTextRuns)
        .into_inner()
}

// =============================================================================
// Pipeline
// =============================================================================

/// Synchronous pipeline for document processing.
///
/// Wraps a `Document` and provides fluent API for transformations and data collection.
///
/// # Example
///
/// ```
/// use canon_vdom::node::{Document, Element};
/// use canon_vdom::phase::Live;
/// use canon_vdom::transform::{MergeTextRuns, Pipeline, StripComments};
///
/// let doc: Document<Live> = Document::new(Element::root());
/// let canonical = Pipeline::new(doc)
///     .pipe(StripComments)
///     .pipe(MergeTextRuns)
///     .into_inner();
/// assert_eq!(canonical.phase_name(), "Canonical");
/// ```
pub struct Pipeline<P: Phase> {
    doc: Document<P>,
}

impl<P: Phase> Pipeline<P> {
    /// Create a new pipeline from a document.
    #[inline]
    pub fn new(doc: Document<P>) -> Self {
        Self { doc }
    }

    /// Apply a synchronous transform to the document.
    #[inline]
    pub fn pipe<T>(self, transform: T) -> Pipeline<T::To>
    where
        T: Transform<P>,
    {
        Pipeline {
            doc: transform.transform(self.doc),
        }
    }

    /// Conditionally apply a phase-preserving transform.
    #[inline]
    pub fn pipe_if<T>(self, condition: bool, transform: T) -> Pipeline<P>
    where
        T: Transform<P, To = P>,
    {
        if condition {
            self.pipe(transform)
        } else {
            self.pipe(IdentityTransform)
        }
    }

    /// Inspect the document without consuming the pipeline.
    ///
    /// Useful for logging or capturing intermediate state.
    #[inline]
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&Document<P>),
    {
        f(&self.doc);
        self
    }

    /// Tap into the pipeline to extract data while continuing the chain.
    #[inline]
    pub fn tap<F, R>(self, f: F) -> (Self, R)
    where
        F: FnOnce(&Document<P>) -> R,
    {
        let result = f(&self.doc);
        (self, result)
    }

    /// Get a reference to the underlying document.
    #[inline]
    pub fn document(&self) -> &Document<P> {
        &self.doc
    }

    /// Consume the pipeline and return the document.
    #[inline]
    pub fn into_inner(self) -> Document<P> {
        self.doc
    }
}

impl<P: Phase> From<Document<P>> for Pipeline<P> {
    #[inline]
    fn from(doc: Document<P>) -> Self {
        Self::new(doc)
    }
}

impl<P: Phase> From<Pipeline<P>> for Document<P> {
    #[inline]
    fn from(pipeline: Pipeline<P>) -> Self {
        pipeline.into_inner()
    }
}
