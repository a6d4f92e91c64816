//! Phase markers for document trees
//!
//! A document moves through three phases on its way to storage:
//! - Live: straight from the editing surface, comment wrappers included
//! - Stripped: comment wrappers removed, children spliced in place
//! - Canonical: stripped and with adjacent format-equal text runs merged

use std::fmt::Debug;

// =============================================================================
// Phase trait
// =============================================================================

/// Marker trait for document phases
///
/// The phase is carried in the type of `Document<P>`, so a
/// `Document<Canonical>` can only be obtained by running the pipeline or by
/// deserializing a payload that passed the canonical schema checks.
pub trait Phase: 'static + Send + Sync + Debug + Clone + Copy + PartialEq + Eq + Default {
    /// Phase name for debugging
    const NAME: &'static str;

    /// Whether `comment` nodes are valid in this phase
    const ALLOWS_COMMENTS: bool;
}

// =============================================================================
// Phase definitions
// =============================================================================

/// Tree as produced by the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Live;

/// Tree with every comment wrapper removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stripped;

/// Tree ready for storage: no wrappers, maximally merged text runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Canonical;

impl Phase for Live {
    const NAME: &'static str = "Live";
    const ALLOWS_COMMENTS: bool = true;
}

impl Phase for Stripped {
    const NAME: &'static str = "Stripped";
    const ALLOWS_COMMENTS: bool = false;
}

impl Phase for Canonical {
    const NAME: &'static str = "Canonical";
    const ALLOWS_COMMENTS: bool = false;
}
