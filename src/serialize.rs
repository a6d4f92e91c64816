//! Serialization support for documents.
//!
//! The wire format is the editor's serialized state: a `{"root": ...}`
//! object where every node carries a `type` field. Elements add their
//! attributes and a `children` array; text leaves add `text`, `format`,
//! `style`, `mode` and `detail`. Fields this crate has no model for are kept
//! in the node's attributes and written back unchanged.
//!
//! ```text
//! {"root":{"children":[{"children":[{"detail":0,"format":1,"mode":"normal",
//!   "style":"","text":"Hello","type":"text"}],"type":"paragraph"}],"type":"root"}}
//! ```
//!
//! Objects are written with sorted keys, so equal trees always produce
//! identical strings.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attr::Attrs;
use crate::error::{CanonError, CanonResult};
use crate::node::{COMMENT_KIND, Children, CommentWrapper, Document, Element, Node, ROOT_KIND, Text, TextFormat, TextMode};
use crate::phase::Phase;

const TYPE_FIELD: &str = "type";
const CHILDREN_FIELD: &str = "children";
const ROOT_FIELD: &str = "root";
const TEXT_KIND: &str = "text";

// =============================================================================
// Wire types
// =============================================================================

/// Text leaf as it appears on the wire.
#[derive(Serialize, Deserialize)]
struct SerText {
    text: String,
    #[serde(default)]
    format: u32,
    #[serde(default)]
    style: CompactString,
    #[serde(default)]
    mode: TextMode,
    #[serde(default)]
    detail: u32,
    #[serde(flatten)]
    attrs: Attrs,
}

// =============================================================================
// Public API
// =============================================================================

/// Serialize a document to its compact JSON form.
pub fn to_json<P: Phase>(doc: &Document<P>) -> CanonResult<String> {
    serde_json::to_string(&to_value(doc)).map_err(|e| CanonError::Serialize(e.to_string()))
}

/// Serialize a document to indented JSON (for state display).
pub fn to_json_pretty<P: Phase>(doc: &Document<P>) -> CanonResult<String> {
    serde_json::to_string_pretty(&to_value(doc)).map_err(|e| CanonError::Serialize(e.to_string()))
}

/// Deserialize a document.
///
/// # Errors
///
/// Returns an error if:
/// - The input is not JSON (`Deserialize`)
/// - There is no `root` object, or it is not of type `root` (`Schema`)
/// - A node lacks `type`, an element lacks `children`, or a text leaf lacks `text` (`Schema`)
/// - A `comment` node appears in a phase that does not allow wrappers (`Schema`)
pub fn from_json<P: Phase>(json: &str) -> CanonResult<Document<P>> {
    let value: Value = serde_json::from_str(json).map_err(|e| CanonError::Deserialize(e.to_string()))?;
    from_value(value)
}

/// Convert a document into a JSON value.
pub fn to_value<P: Phase>(doc: &Document<P>) -> Value {
    let mut state = Map::new();
    state.insert(ROOT_FIELD.into(), element_to_value(&doc.root));
    Value::Object(state)
}

/// Rebuild a document from a JSON value.
pub fn from_value<P: Phase>(value: Value) -> CanonResult<Document<P>> {
    let Value::Object(mut state) = value else {
        return Err(CanonError::schema("$", "editor state must be an object"));
    };
    let root = state
        .remove(ROOT_FIELD)
        .ok_or_else(|| CanonError::schema("$", "missing `root`"))?;

    let node = node_from_value::<P>(root, ROOT_FIELD)?;
    match node {
        Node::Element(elem) if elem.is_kind(ROOT_KIND) => Ok(Document::new(*elem)),
        _ => Err(CanonError::schema(ROOT_FIELD, "root node must be of type `root`")),
    }
}

// =============================================================================
// Conversion functions
// =============================================================================

fn node_to_value(node: &Node) -> Value {
    match node {
        Node::Element(elem) => element_to_value(elem),
        Node::Comment(wrapper) => container_to_value(COMMENT_KIND, &wrapper.attrs, &wrapper.children),
        Node::Text(text) => text_to_value(text),
    }
}

fn element_to_value(elem: &Element) -> Value {
    container_to_value(&elem.kind, &elem.attrs, &elem.children)
}

fn container_to_value(kind: &str, attrs: &Attrs, children: &[Node]) -> Value {
    let mut map = attrs.clone();
    map.insert(TYPE_FIELD.into(), Value::from(kind));
    map.insert(
        CHILDREN_FIELD.into(),
        Value::Array(children.iter().map(node_to_value).collect()),
    );
    Value::Object(map)
}

fn text_to_value(text: &Text) -> Value {
    let ser = SerText {
        text: text.text.clone(),
        format: text.format.bits(),
        style: text.style.clone(),
        mode: text.mode,
        detail: text.detail,
        attrs: text.attrs.clone(),
    };
    let mut value = serde_json::to_value(ser).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert(TYPE_FIELD.into(), Value::from(TEXT_KIND));
    }
    value
}

fn node_from_value<P: Phase>(value: Value, path: &str) -> CanonResult<Node> {
    let Value::Object(mut map) = value else {
        return Err(CanonError::schema(path, "node must be an object"));
    };
    let kind = match map.remove(TYPE_FIELD) {
        Some(Value::String(kind)) => kind,
        _ => return Err(CanonError::schema(path, "missing string field `type`")),
    };

    match kind.as_str() {
        TEXT_KIND => {
            let ser: SerText = serde_json::from_value(Value::Object(map))
                .map_err(|e| CanonError::schema(path, e.to_string()))?;
            Ok(Node::Text(Text {
                text: ser.text,
                format: TextFormat::from_bits_retain(ser.format),
                style: ser.style,
                mode: ser.mode,
                detail: ser.detail,
                attrs: ser.attrs,
            }))
        }
        COMMENT_KIND => {
            if !P::ALLOWS_COMMENTS {
                return Err(CanonError::schema(
                    path,
                    format!("comment wrapper not allowed in a {} document", P::NAME),
                ));
            }
            let children = children_from_map::<P>(&mut map, path)?;
            Ok(Node::Comment(Box::new(CommentWrapper { attrs: map, children })))
        }
        _ => {
            let children = children_from_map::<P>(&mut map, path)?;
            Ok(Node::Element(Box::new(Element {
                kind: CompactString::from(kind),
                attrs: map,
                children,
            })))
        }
    }
}

fn children_from_map<P: Phase>(map: &mut Attrs, path: &str) -> CanonResult<Children> {
    let Some(Value::Array(items)) = map.remove(CHILDREN_FIELD) else {
        return Err(CanonError::schema(path, "missing array field `children`"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| node_from_value::<P>(item, &format!("{path}.children[{i}]")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{Canonical, Live};
    use crate::transform::canonicalize;

    const EDITOR_STATE: &str = r#"{
        "root": {
            "children": [{
                "children": [
                    {"detail": 0, "format": 0, "mode": "normal", "style": "", "text": "Plain ", "type": "text", "version": 1},
                    {"children": [
                        {"detail": 0, "format": 1, "mode": "normal", "style": "", "text": "bold", "type": "text", "version": 1}
                    ], "annotationId": "ann-7", "type": "comment", "version": 1},
                    {"detail": 0, "format": 0, "mode": "normal", "style": "", "text": " tail", "type": "text", "version": 1}
                ],
                "direction": "ltr", "format": "", "indent": 0, "type": "paragraph", "version": 1, "textFormat": 0
            }],
            "direction": "ltr", "format": "", "indent": 0, "type": "root", "version": 1
        }
    }"#;

    #[test]
    fn test_parse_editor_state() {
        let doc: Document<Live> = from_json(EDITOR_STATE).unwrap();
        assert_eq!(doc.comment_count(), 1);
        let para = doc.root.children[0].as_element().unwrap();
        assert!(para.is_kind("paragraph"));
        assert_eq!(para.attrs.get("textFormat"), Some(&Value::from(0)));

        let wrapper = para.children[1].as_comment().unwrap();
        assert_eq!(wrapper.annotation_id(), Some("ann-7"));
        let bold = wrapper.children[0].as_text().unwrap();
        assert!(bold.has_format(TextFormat::BOLD));
        assert_eq!(bold.attrs.get("version"), Some(&Value::from(1)));
    }

    #[test]
    fn test_round_trip_canonical() {
        let live: Document<Live> = from_json(EDITOR_STATE).unwrap();
        let canonical = canonicalize(&live);
        let json = to_json(&canonical).unwrap();
        assert!(!json.contains("\"comment\""));
        let restored: Document<Canonical> = from_json(&json).unwrap();
        assert_eq!(restored, canonical);
    }

    #[test]
    fn test_output_is_stable() {
        let doc: Document<Live> = from_json(EDITOR_STATE).unwrap();
        let a = to_json(&doc).unwrap();
        let b = to_json(&from_json::<Live>(&a).unwrap()).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("{\"root\":{\"children\":"));
    }

    #[test]
    fn test_canonical_rejects_comment_nodes() {
        let err = from_json::<Canonical>(EDITOR_STATE).unwrap_err();
        match err {
            CanonError::Schema { path, message } => {
                assert_eq!(path, "root.children[0].children[1]");
                assert!(message.contains("Canonical"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(from_json::<Live>("not json"), Err(CanonError::Deserialize(_))));
        assert!(matches!(from_json::<Live>("[]"), Err(CanonError::Schema { .. })));
        assert!(matches!(from_json::<Live>("{}"), Err(CanonError::Schema { .. })));

        let wrong_root = r#"{"root":{"type":"paragraph","children":[]}}"#;
        assert!(from_json::<Live>(wrong_root).unwrap_err().is_corruption());

        let no_text = r#"{"root":{"type":"root","children":[{"type":"text","format":0}]}}"#;
        let err = from_json::<Live>(no_text).unwrap_err();
        assert!(err.to_string().contains("root.children[0]"));

        let no_children = r#"{"root":{"type":"root","children":[{"type":"paragraph"}]}}"#;
        assert!(from_json::<Live>(no_children).is_err());
    }

    #[test]
    fn test_text_defaults_and_unknown_bits() {
        let json = r#"{"root":{"type":"root","children":[{"type":"text","text":"x","format":4096}]}}"#;
        let doc: Document<Live> = from_json(json).unwrap();
        let text = doc.root.children[0].as_text().unwrap();
        assert_eq!(text.format.bits(), 4096);
        assert_eq!(text.mode, TextMode::Normal);
        assert_eq!(text.style, "");
    }
}
