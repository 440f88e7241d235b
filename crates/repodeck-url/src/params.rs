//! String parameter maps for route placeholders and query strings.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt::Display;

/// Ordered `name → value` map.
///
/// Keys iterate in lexicographic order, which is the order query strings
/// are serialized in.
///
/// ```
/// use repodeck_url::Params;
///
/// let params = Params::new().with("id", 42).with("owner", "rust-lang");
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.keys().collect::<Vec<_>>(), ["id", "owner"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Params(BTreeMap::new())
    }

    /// Adds or replaces `key`, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
