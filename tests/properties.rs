//! Property-based invariant tests for the canonicalization passes.
//!
//! Verifies:
//! 1. strip is idempotent and leaves no wrappers
//! 2. strip preserves leaf order and formatting
//! 3. merge is idempotent
//! 4. canonical trees have no wrappers and no adjacent format-equal leaves
//! 5. canonicalize preserves text content and is idempotent
//! 6. wrapping content in an annotation never changes the canonical form
//! 7. JSON roundtrip for live and canonical trees

use canon_vdom::node::{CommentWrapper, Document, Element, Node, Text, TextFormat, TextMode, leaves};
use canon_vdom::phase::{Canonical, Live};
use canon_vdom::serialize::{from_json, to_json};
use canon_vdom::transform::{canonicalize, merge_text_runs, strip_comments};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_format() -> impl Strategy<Value = TextFormat> {
    prop_oneof![
        Just(TextFormat::empty()),
        Just(TextFormat::BOLD),
        Just(TextFormat::ITALIC),
        Just(TextFormat::BOLD | TextFormat::ITALIC),
    ]
}

fn arb_text() -> impl Strategy<Value = Text> {
    (
        "[a-c]{0,3}",
        arb_format(),
        prop_oneof![Just(TextMode::Normal), Just(TextMode::Token)],
    )
        .prop_map(|(s, format, mode)| Text::new(s).with_format(format).with_mode(mode))
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = arb_text().prop_map(Node::Text);
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|children| {
                Node::from(
                    children
                        .into_iter()
                        .fold(CommentWrapper::for_annotation("a"), |w, n| w.node(n)),
                )
            }),
            (prop_oneof![Just("paragraph"), Just("link")], prop::collection::vec(inner, 0..4)).prop_map(
                |(kind, children)| Node::from(children.into_iter().fold(Element::new(kind), |e, n| e.node(n)))
            ),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Document<Live>> {
    prop::collection::vec(arb_node(), 0..5)
        .prop_map(|nodes| Document::new(nodes.into_iter().fold(Element::root(), |e, n| e.node(n))))
}

fn leaf_signature(nodes: &[Node]) -> Vec<(String, TextFormat)> {
    leaves(nodes).into_iter().map(|t| (t.text.clone(), t.format)).collect()
}

fn has_wrappers(nodes: &[Node]) -> bool {
    nodes.iter().any(|n| match n {
        Node::Comment(_) => true,
        Node::Element(e) => has_wrappers(&e.children),
        Node::Text(_) => false,
    })
}

fn has_mergeable_siblings(nodes: &[Node]) -> bool {
    let adjacent = nodes.windows(2).any(|pair| match (&pair[0], &pair[1]) {
        (Node::Text(a), Node::Text(b)) => a.format_eq(b),
        _ => false,
    });
    adjacent || nodes.iter().filter_map(Node::children).any(|c| has_mergeable_siblings(c))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Strip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn strip_is_idempotent(doc in arb_document()) {
        let once = strip_comments(&doc.root.children);
        let twice = strip_comments(&once);
        prop_assert!(!has_wrappers(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn strip_preserves_leaf_order(doc in arb_document()) {
        let stripped = strip_comments(&doc.root.children);
        prop_assert_eq!(leaf_signature(&doc.root.children), leaf_signature(&stripped));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. Merge and canonicalize
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_is_idempotent(doc in arb_document()) {
        let once = merge_text_runs(&doc.root.children);
        let twice = merge_text_runs(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_form_is_fully_normalized(doc in arb_document()) {
        let canonical = canonicalize(&doc);
        prop_assert!(!has_wrappers(&canonical.root.children));
        prop_assert!(!has_mergeable_siblings(&canonical.root.children));
        prop_assert_eq!(canonical.text_content(), doc.text_content());
    }

    #[test]
    fn canonicalize_is_idempotent(doc in arb_document()) {
        let canonical = canonicalize(&doc);
        let again = canonicalize(&canonical.clone().into_live());
        prop_assert_eq!(canonical, again);
    }

    #[test]
    fn annotations_do_not_change_canonical_form(doc in arb_document()) {
        let wrapped_children = doc
            .root
            .children
            .iter()
            .cloned()
            .fold(CommentWrapper::for_annotation("outer"), |w, n| w.node(n));
        let annotated: Document<Live> = Document::new(Element::root().node(wrapped_children));
        prop_assert_eq!(canonicalize(&annotated), canonicalize(&doc));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. JSON roundtrip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn live_json_roundtrip(doc in arb_document()) {
        let json = to_json(&doc).expect("serialize");
        let back: Document<Live> = from_json(&json).expect("deserialize");
        prop_assert_eq!(doc, back, "roundtrip failed for JSON: {}", json);
    }

    #[test]
    fn canonical_json_roundtrip(doc in arb_document()) {
        let canonical = canonicalize(&doc);
        let json = to_json(&canonical).expect("serialize");
        let back: Document<Canonical> = from_json(&json).expect("deserialize");
        prop_assert_eq!(canonical, back);
    }
}
