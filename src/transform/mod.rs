//! Tree rewriting passes.
//!
//! # Module Structure
//!
//! - `Transform` - Core trait for phase transformations
//! - `StripComments` - Live → Stripped, removes comment wrappers
//! - `MergeTextRuns` - Stripped → Canonical, merges format-equal text runs
//! - `Pipeline` / `canonicalize` - the two passes composed in their fixed order
//!
//! # Example
//!
//! ```ignore
//! use canon_vdom::transform::canonicalize;
//!
//! let canonical = canonicalize(&live_doc);
//! assert_eq!(canonical.comment_count(), 0);
//! ```

mod core;
mod merge;
mod pipeline;
mod strip;

pub use self::core::{IdentityTransform, Transform};
pub use self::merge::{MergeTextRuns, merge_text_runs};
pub use self::pipeline::{Pipeline, canonicalize};
pub use self::strip::{StripComments, strip_comments};
