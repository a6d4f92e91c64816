//! Attribute system for tree nodes
//!
//! Element and text attributes are kept as an ordered JSON object so that
//! fields the editing surface attaches (`direction`, `indent`, `tag`,
//! `version`, ...) survive canonicalization untouched, even when this crate
//! has no typed model for them.

use serde_json::{Map, Value};

/// Node attributes as a JSON object
///
/// Keys are kept sorted, which makes the serialized form stable for storage
/// and diffing.
pub type Attrs = Map<String, Value>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute as a string slice
    fn get_str(&self, name: &str) -> Option<&str>;

    /// Get an attribute as an unsigned integer
    fn get_u64(&self, name: &str) -> Option<u64>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<Value>;
}

impl AttrsExt for Attrs {
    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_u64)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.insert(name.into(), value.into());
    }

    fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.remove(name)
    }
}

/// Build attributes from key/value pairs
pub fn attrs_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Attrs
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_operations() {
        let mut attrs = Attrs::new();

        // Set
        attrs.set_attr("tag", "h2");
        attrs.set_attr("indent", 1);
        assert_eq!(attrs.len(), 2);

        // Get
        assert_eq!(attrs.get_str("tag"), Some("h2"));
        assert_eq!(attrs.get_u64("indent"), Some(1));
        assert_eq!(attrs.get_str("indent"), None);
        assert_eq!(attrs.get_str("direction"), None);

        // Has
        assert!(attrs.has_attr("tag"));
        assert!(!attrs.has_attr("direction"));

        // Update existing
        attrs.set_attr("tag", "h3");
        assert_eq!(attrs.get_str("tag"), Some("h3"));
        assert_eq!(attrs.len(), 2);

        // Remove
        let removed = attrs.remove_attr("tag");
        assert_eq!(removed, Some(Value::from("h3")));
        assert!(!attrs.has_attr("tag"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_attrs_from_pairs_sorted() {
        let attrs = attrs_from_pairs([("version", 1), ("indent", 0)]);
        let keys: Vec<_> = attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["indent", "version"]);
    }
}
