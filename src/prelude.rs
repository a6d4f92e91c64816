//! Prelude module for common imports.
//!
//! ```ignore
//! use canon_vdom::prelude::*;
//! ```

// Phases
pub use crate::phase::{Canonical, Live, Phase, Stripped};

// Node types
pub use crate::node::{
    Children, CommentWrapper, Document, Element, Node, Stats, Text, TextFormat, TextMode,
};

// Transform
pub use crate::transform::{
    IdentityTransform, MergeTextRuns, Pipeline, StripComments, Transform, canonicalize,
    merge_text_runs, strip_comments,
};

// Attributes
pub use crate::attr::{Attrs, AttrsExt};

// Serialization and hashing
pub use crate::hash::{StableHasher, fingerprint};
pub use crate::serialize::{from_json, to_json, to_json_pretty};

// Error
pub use crate::error::{CanonError, CanonResult, StoreError, StoreOp, SubscriberError};

// Persistence
pub use crate::debounce::Debouncer;
pub use crate::persist::{
    LoadOutcome, PersistConfig, PersistController, SaveOutcome, SlotState,
};
pub use crate::store::{FileStore, MemoryStore, SnapshotStore};

// Overlay
pub use crate::overlay::{
    AnnotationFeed, Author, Comment, CommentAnnotation, OverlayChannel, OverlayInbox,
    PublishReport,
};

// Session
pub use crate::session::{
    EditingSurface, EditorSession, EmptyParagraph, InitialContent, OverlayRenderer,
    PrepopulatedText, RenderRequest, UpdateTag,
};

#[cfg(feature = "async")]
pub use crate::autosave::{Autosave, AutosaveHandle};
