//! Editor bootstrap and wiring.
//!
//! An [`EditorSession`] connects an editing surface to the persistence
//! controller and the annotation overlay:
//!
//! 1. Load the stored state, or build initial content when there is none.
//! 2. Apply it to the surface without creating an undo entry.
//! 3. Forward every change to the debounced save.
//! 4. Hand annotation deliveries to an overlay renderer.

use std::time::Instant;

use crate::error::CanonResult;
use crate::node::{Document, Element, Text, TextFormat};
use crate::overlay::{CommentAnnotation, OverlayChannel, OverlayInbox};
use crate::persist::{LoadOutcome, PersistController, SaveOutcome};
use crate::phase::Live;
use crate::serialize;
use crate::store::SnapshotStore;

/// Subscription key the session registers its overlay inbox under.
pub const COMMENT_ANNOTATIONS_KEY: &str = "commentAnnotations";

/// Message returned by [`EditorSession::clear_storage`].
pub const STORAGE_CLEARED: &str = "Storage cleared!";

/// Message returned when removing the stored state failed.
pub const STORAGE_CLEAR_FAILED: &str = "Failed to clear storage";

// =============================================================================
// Host traits
// =============================================================================

/// How an update is recorded in the surface's undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateTag {
    /// Regular update, undoable.
    #[default]
    History,
    /// Merged into the previous history entry; used for initialization.
    HistoryMerge,
}

/// The editor holding the live tree.
pub trait EditingSurface {
    /// Current live tree.
    fn snapshot(&self) -> Document<Live>;

    /// Replace the whole tree.
    fn replace(&mut self, doc: Document<Live>, tag: UpdateTag);
}

/// Content for a first start with nothing stored.
pub trait InitialContent {
    fn populate(&self, doc: &mut Document<Live>);
}

/// Root-only document the initial content is built on.
fn blank() -> Document<Live> {
    Document::new(Element::root())
}

/// A single empty paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyParagraph;

impl InitialContent for EmptyParagraph {
    fn populate(&self, doc: &mut Document<Live>) {
        if doc.root.is_empty() {
            doc.root.push(Element::paragraph());
        }
    }
}

/// Demo paragraph of three text runs, the middle one bold.
///
/// Leaves a non-empty root untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrepopulatedText;

impl PrepopulatedText {
    pub const RUNS: [&'static str; 3] = [
        "Lexical is comprised of editor instances that each attach to a single content editable element. ",
        "A set of editor states represent the current and pending states of the editor at any given time. ",
        "Lexical is comprised of editor instances that each attach to a single content editable element. \
         A set of editor states represent the current and pending states of the editor at any given time.",
    ];
}

impl InitialContent for PrepopulatedText {
    fn populate(&self, doc: &mut Document<Live>) {
        if doc.root.first_child().is_some() {
            return;
        }
        let [lead, middle, tail] = Self::RUNS;
        doc.root.push(
            Element::paragraph()
                .text(lead)
                .node(Text::new(middle).toggle_format(TextFormat::BOLD))
                .text(tail),
        );
    }
}

/// What the overlay renderer receives.
#[derive(Debug)]
pub struct RenderRequest<'a, A = CommentAnnotation> {
    pub tree: &'a Document<Live>,
    pub annotations: Vec<A>,
}

/// Draws annotations over the live tree.
pub trait OverlayRenderer<A = CommentAnnotation> {
    fn render(&mut self, request: RenderRequest<'_, A>);
}

// =============================================================================
// EditorSession
// =============================================================================

/// Where the session's first tree came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Stored state was loaded.
    Restored,
    /// Nothing was stored; initial content was built.
    Initialized,
    /// Stored state was unreadable; the fallback was applied.
    Recovered,
}

/// A running editor: surface, persistence and overlay inbox.
pub struct EditorSession<S, E> {
    controller: PersistController<S>,
    surface: E,
    inbox: OverlayInbox<CommentAnnotation>,
    origin: SessionOrigin,
}

impl<S, E> EditorSession<S, E>
where
    S: SnapshotStore,
    E: EditingSurface,
{
    /// Load stored state into `surface`, or populate it with `initial`.
    ///
    /// The first tree is applied with [`UpdateTag::HistoryMerge`]. An
    /// unreadable payload gets the empty-paragraph fallback, without
    /// initial content.
    pub fn start(mut controller: PersistController<S>, mut surface: E, initial: &dyn InitialContent) -> Self {
        let (doc, origin) = match controller.load() {
            LoadOutcome::Loaded(doc) => (doc, SessionOrigin::Restored),
            LoadOutcome::Recovered { doc, .. } => (doc, SessionOrigin::Recovered),
            LoadOutcome::Nothing => {
                let mut doc = blank();
                initial.populate(&mut doc);
                (doc, SessionOrigin::Initialized)
            }
        };
        tracing::info!(?origin, "editor session started");
        surface.replace(doc, UpdateTag::HistoryMerge);

        Self {
            controller,
            surface,
            inbox: OverlayInbox::new(),
            origin,
        }
    }

    /// Record an editor change.
    pub fn on_change(&mut self, snapshot: Document<Live>) {
        self.controller.on_change(snapshot);
    }

    /// Record the surface's current tree as a change.
    pub fn sync_from_surface(&mut self) {
        let snapshot = self.surface.snapshot();
        self.on_change(snapshot);
    }

    /// Run a due save, if any.
    pub fn tick(&mut self) -> Option<SaveOutcome> {
        self.controller.poll()
    }

    /// Run a save due by `now`, if any.
    pub fn tick_at(&mut self, now: Instant) -> Option<SaveOutcome> {
        self.controller.poll_at(now)
    }

    /// Subscribe the session's inbox to `channel`.
    pub fn attach_overlay(&self, channel: &OverlayChannel<CommentAnnotation>) {
        self.inbox.attach(channel, COMMENT_ANNOTATIONS_KEY);
    }

    /// Hand the latest delivery, if any, to `renderer` along with the
    /// current tree. Returns whether the renderer was called.
    pub fn render_overlay<R>(&mut self, renderer: &mut R) -> bool
    where
        R: OverlayRenderer<CommentAnnotation> + ?Sized,
    {
        let Some(annotations) = self.inbox.take() else {
            return false;
        };
        tracing::debug!(count = annotations.len(), "rendering annotation overlay");
        let tree = self.surface.snapshot();
        renderer.render(RenderRequest {
            tree: &tree,
            annotations,
        });
        true
    }

    /// Remove the stored state and drop any pending save.
    pub fn clear_storage(&mut self) -> &'static str {
        match self.controller.clear() {
            Ok(()) => STORAGE_CLEARED,
            Err(_) => STORAGE_CLEAR_FAILED,
        }
    }

    /// Indented JSON of the live tree.
    pub fn state_json(&self) -> CanonResult<String> {
        serialize::to_json_pretty(&self.surface.snapshot())
    }

    #[inline]
    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    #[inline]
    pub fn controller(&self) -> &PersistController<S> {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut PersistController<S> {
        &mut self.controller
    }

    #[inline]
    pub fn surface(&self) -> &E {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut E {
        &mut self.surface
    }

    /// Split the session into its controller and surface.
    pub fn into_parts(self) -> (PersistController<S>, E) {
        (self.controller, self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::CommentWrapper;
    use crate::persist::{DEFAULT_STORAGE_KEY, PersistConfig};
    use crate::store::MemoryStore;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeSurface {
        doc: Option<Document<Live>>,
        tags: Vec<UpdateTag>,
    }

    impl EditingSurface for FakeSurface {
        fn snapshot(&self) -> Document<Live> {
            self.doc.clone().unwrap_or_else(blank)
        }

        fn replace(&mut self, doc: Document<Live>, tag: UpdateTag) {
            self.doc = Some(doc);
            self.tags.push(tag);
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        calls: Vec<(String, usize)>,
    }

    impl OverlayRenderer for CountingRenderer {
        fn render(&mut self, request: RenderRequest<'_>) {
            self.calls.push((request.tree.text_content(), request.annotations.len()));
        }
    }

    fn start(store: &MemoryStore, initial: &dyn InitialContent) -> EditorSession<MemoryStore, FakeSurface> {
        let controller = PersistController::new(store.clone(), PersistConfig::DEFAULT);
        EditorSession::start(controller, FakeSurface::default(), initial)
    }

    fn applied(session: &EditorSession<MemoryStore, FakeSurface>) -> Document<Live> {
        session.surface().snapshot()
    }

    #[test]
    fn test_first_start_prepopulates() {
        let store = MemoryStore::new();
        let session = start(&store, &PrepopulatedText);
        assert_eq!(session.origin(), SessionOrigin::Initialized);
        assert_eq!(session.surface().tags, vec![UpdateTag::HistoryMerge]);

        let doc = applied(&session);
        let leaves = doc.leaves();
        assert_eq!(leaves.len(), 3);
        assert!(!leaves[0].has_format(TextFormat::BOLD));
        assert!(leaves[1].has_format(TextFormat::BOLD));
        assert!(!leaves[2].has_format(TextFormat::BOLD));
        assert!(leaves[1].text.starts_with("A set of editor states"));
    }

    #[test]
    fn test_prepopulate_leaves_content_alone() {
        let mut doc: Document<Live> = Document::new(Element::root().child(Element::paragraph().text("mine")));
        PrepopulatedText.populate(&mut doc);
        assert_eq!(doc.text_content(), "mine");
    }

    #[test]
    fn test_restart_restores_saved_state() {
        let store = MemoryStore::new();
        let mut session = start(&store, &PrepopulatedText);
        let edited: Document<Live> = Document::new(
            Element::root().child(
                Element::paragraph()
                    .text("kept ")
                    .node(CommentWrapper::for_annotation("c1").node(Text::new("text"))),
            ),
        );
        let t0 = Instant::now();
        session.controller_mut().on_change_at(edited, t0);
        assert!(session.tick_at(t0 + Duration::from_millis(999)).is_none());
        assert!(session.tick_at(t0 + Duration::from_secs(1)).unwrap().is_written());

        let restarted = start(&store, &PrepopulatedText);
        assert_eq!(restarted.origin(), SessionOrigin::Restored);
        let doc = applied(&restarted);
        assert_eq!(doc.comment_count(), 0);
        assert_eq!(doc.leaves().len(), 1);
        assert_eq!(doc.text_content(), "kept text");
    }

    #[test]
    fn test_corrupt_state_matches_nothing_stored() {
        let clean = MemoryStore::new();
        let fresh = applied(&start(&clean, &EmptyParagraph));

        let corrupt = MemoryStore::new();
        corrupt.write(DEFAULT_STORAGE_KEY, "{{{").unwrap();
        let recovered = start(&corrupt, &PrepopulatedText);
        assert_eq!(recovered.origin(), SessionOrigin::Recovered);
        assert_eq!(applied(&recovered), fresh);
        assert_eq!(fresh, Document::empty_paragraph());
    }

    #[test]
    fn test_overlay_delivery_reaches_renderer() {
        let store = MemoryStore::new();
        let mut session = start(&store, &PrepopulatedText);
        let channel = OverlayChannel::new();
        session.attach_overlay(&channel);
        assert_eq!(channel.keys(), vec![COMMENT_ANNOTATIONS_KEY]);

        let mut renderer = CountingRenderer::default();
        assert!(!session.render_overlay(&mut renderer));

        channel.publish(&[CommentAnnotation::new("a1"), CommentAnnotation::new("a2")]);
        assert!(session.render_overlay(&mut renderer));
        assert!(!session.render_overlay(&mut renderer));
        assert_eq!(renderer.calls.len(), 1);
        assert_eq!(renderer.calls[0].1, 2);
        assert!(renderer.calls[0].0.starts_with("Lexical is comprised"));
    }

    #[test]
    fn test_clear_storage() {
        let store = MemoryStore::new();
        let mut session = start(&store, &EmptyParagraph);
        session.sync_from_surface();
        session.controller_mut().flush();
        assert!(!store.is_empty());

        assert_eq!(session.clear_storage(), "Storage cleared!");
        assert!(store.is_empty());
        assert_eq!(session.clear_storage(), STORAGE_CLEARED);
    }

    #[test]
    fn test_state_json_shows_live_tree() {
        let store = MemoryStore::new();
        let session = start(&store, &EmptyParagraph);
        let json = session.state_json().unwrap();
        assert!(json.contains("\"paragraph\""));
        assert!(json.contains('\n'));
    }
}
