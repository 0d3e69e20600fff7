//! # Unknown-Field Bag
//!
//! The residual key→value collection holding wire-payload fields the
//! declared schema does not know about. The bag is a genuinely dynamic
//! structure — its content is, by design, unconstrained by the static
//! schema — so it stays a parsed-JSON-value tree and is never typed
//! further.
//!
//! The bag is an in-memory concept only. Its contents are flattened into
//! the top-level object on encode; the bag's own wire key never appears in
//! output. See [`crate::record`] for the merge and split rules.

use serde_json::{Map, Value};

/// Residual wire fields with no declared-field counterpart.
///
/// # Invariants
///
/// A bag produced by decode holds keys disjoint from the declared wire
/// keys and from the reserved metadata keys. Callers may insert arbitrary
/// keys afterwards; the encode merge keeps declared fields authoritative
/// on any collision, so a conflicting insert can never shadow schema data
/// on the wire. Insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownFields(Map<String, Value>);

impl UnknownFields {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Number of fields held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag holds no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a field by wire key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a wire key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Store a field, returning any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a field by wire key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Iterate over the held fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Iterate over the held wire keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl From<Map<String, Value>> for UnknownFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<UnknownFields> for Map<String, Value> {
    fn from(bag: UnknownFields) -> Self {
        bag.0
    }
}

impl FromIterator<(String, Value)> for UnknownFields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for UnknownFields {
    type Item = (String, Value);
    type IntoIter = <Map<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_bag_is_empty() {
        let bag = UnknownFields::new();
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let mut bag = UnknownFields::new();
        bag.insert("mysteryField", json!("x"));
        assert_eq!(bag.get("mysteryField"), Some(&json!("x")));
        assert!(bag.contains_key("mysteryField"));
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_insert_returns_previous_value() {
        let mut bag = UnknownFields::new();
        assert_eq!(bag.insert("k", json!(1)), None);
        assert_eq!(bag.insert("k", json!(2)), Some(json!(1)));
        assert_eq!(bag.get("k"), Some(&json!(2)));
    }

    #[test]
    fn test_remove() {
        let mut bag = UnknownFields::new();
        bag.insert("k", json!(true));
        assert_eq!(bag.remove("k"), Some(json!(true)));
        assert!(bag.is_empty());
    }

    #[test]
    fn test_from_map_round_trip() {
        let mut map = Map::new();
        map.insert("a".to_owned(), json!([1, 2]));
        map.insert("b".to_owned(), json!({"nested": null}));
        let bag = UnknownFields::from(map.clone());
        assert_eq!(bag.len(), 2);
        assert_eq!(Map::from(bag), map);
    }

    #[test]
    fn test_collect_from_pairs() {
        let bag: UnknownFields = vec![("x".to_owned(), json!(1))].into_iter().collect();
        assert_eq!(bag.get("x"), Some(&json!(1)));
    }
}
