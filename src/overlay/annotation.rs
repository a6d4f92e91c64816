//! Annotation payload models.
//!
//! Only the fields the overlay logic looks at are typed; everything else the
//! collaboration service sends rides along in `extra` and is written back
//! unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A comment thread anchored to a range of the document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAnnotation {
    pub annotation_id: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Author>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentAnnotation {
    pub fn new(annotation_id: impl Into<String>) -> Self {
        Self {
            annotation_id: annotation_id.into(),
            ..Self::default()
        }
    }

    /// Builder: append a comment
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }
}

/// One message in a thread.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u64>,
    #[serde(default)]
    pub comment_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Author>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            comment_text: text.into(),
            ..Self::default()
        }
    }
}

/// Who wrote a comment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_payload() {
        let json = r##"[{
            "annotationId": "a1",
            "status": {"id": "OPEN"},
            "from": {"userId": "1", "name": "Test User", "color": "#8b4bef"},
            "comments": [{"commentId": 42, "commentText": "nit", "type": "text"}]
        }]"##;
        let parsed: Vec<CommentAnnotation> = serde_json::from_str(json).unwrap();
        let ann = &parsed[0];
        assert_eq!(ann.annotation_id, "a1");
        assert!(ann.extra.contains_key("status"));
        let from = ann.from.as_ref().unwrap();
        assert_eq!(from.name.as_deref(), Some("Test User"));
        assert_eq!(from.extra.get("color"), Some(&Value::from("#8b4bef")));
        assert_eq!(ann.comments[0].comment_id, Some(42));
        assert_eq!(ann.comments[0].comment_text, "nit");
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let json = r#"{"annotationId":"a2","comments":[],"pageId":"p"}"#;
        let ann: CommentAnnotation = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&ann).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
    }
}
