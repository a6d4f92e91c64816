//! canon-vdom - Canonical persistence for annotated rich-text trees
//!
//! ## Core Concepts
//!
//! **Phase-typed documents**: a `Document<Live>` may carry comment wrappers
//! around annotated ranges; `Document<Stripped>` and `Document<Canonical>`
//! cannot. The type changes with each pass, so a tree that still holds
//! wrappers can never be written as canonical state.
//!
//! **Canonical form**: `canonicalize = merge ∘ strip`. Stripping splices
//! wrapper children into their parents; merging then joins adjacent text
//! leaves with equal formatting. Only the canonical form is persisted, so
//! annotation edits never change what is stored.
//!
//! ## Modules
//! - `node`: Document/Element/CommentWrapper/Text types
//! - `transform`: strip and merge passes, `Pipeline`, `canonicalize`
//! - `serialize`: editor-state JSON
//! - `store`: key-value snapshot stores (memory, directory)
//! - `persist`: debounced load/save controller
//! - `overlay`: annotation pub/sub for the comment UI
//! - `session`: editor bootstrap wiring
//! - `autosave`: tokio background saver (feature `async`)
//!
//! ## Usage
//!
//! ```
//! use canon_vdom::node::{CommentWrapper, Document, Element, Text, TextFormat};
//! use canon_vdom::phase::Live;
//! use canon_vdom::transform::canonicalize;
//!
//! let bold = |s: &str| Text::new(s).with_format(TextFormat::BOLD);
//! let live: Document<Live> = Document::new(
//!     Element::root().child(
//!         Element::paragraph()
//!             .node(bold("a"))
//!             .node(CommentWrapper::for_annotation("c1").node(bold("b")))
//!             .node(bold("c")),
//!     ),
//! );
//!
//! let canonical = canonicalize(&live);
//! assert_eq!(canonical.comment_count(), 0);
//! assert_eq!(canonical.leaves().len(), 1);
//! assert_eq!(canonical.text_content(), "abc");
//! ```

// =============================================================================
// Core modules
// =============================================================================

#[macro_use]
mod macros;

/// Phase markers: Live, Stripped, Canonical
pub mod phase;

/// Node types: Document, Element, CommentWrapper, Node, Text
pub mod node;

/// Attribute types
pub mod attr;

/// Tree passes: StripComments, MergeTextRuns, Pipeline
pub mod transform;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

/// Editor-state JSON
pub mod serialize;

/// Deterministic fingerprints
pub mod hash;

// =============================================================================
// Persistence and overlay
// =============================================================================

/// Snapshot stores
pub mod store;

/// Trailing-edge debounce
pub mod debounce;

/// Debounced persistence controller
pub mod persist;

/// Annotation overlay channel
pub mod overlay;

/// Editor bootstrap
pub mod session;

/// Background autosave
#[cfg(feature = "async")]
pub mod autosave;

// =============================================================================
// Re-exports
// =============================================================================

// Phases
pub use phase::{Canonical, Live, Phase, Stripped};

// Node types
pub use node::{Children, CommentWrapper, Document, Element, Node, Text, TextFormat, TextMode};

// Transform
pub use transform::{MergeTextRuns, Pipeline, StripComments, Transform, canonicalize};

// Attribute types
pub use attr::{Attrs, AttrsExt};

// Hashing
pub use hash::StableHasher;

// Error types
pub use error::{CanonError, CanonResult, StoreError, SubscriberError};

// Persistence
pub use persist::{LoadOutcome, PersistConfig, PersistController, SaveOutcome, SlotState};
pub use store::{FileStore, MemoryStore, SnapshotStore};

// Overlay
pub use overlay::{AnnotationFeed, CommentAnnotation, OverlayChannel, OverlayInbox, PublishReport};

#[cfg(feature = "async")]
pub use autosave::{Autosave, AutosaveHandle};

// =============================================================================
// Tests
// =============================================================================
