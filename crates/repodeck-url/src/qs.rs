//! Query-string serialization.
//!
//! [`stringify`] writes `key=value` pairs sorted by key and
//! URI-component-encoded. [`parse`] reads a query string back the way a
//! browser's `URLSearchParams` does.

use std::borrow::Cow;

use crate::params::Params;

/// Serializes `query` as `a=1&b=2`, keys in lexicographic order.
///
/// An empty map serializes to the empty string.
///
/// ```
/// use repodeck_url::{qs, Params};
///
/// let query = Params::new().with("b", 2).with("a", 1);
/// assert_eq!(qs::stringify(&query), "a=1&b=2");
/// assert_eq!(qs::stringify(&Params::new()), "");
/// ```
pub fn stringify(query: &Params) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parses a query string into a parameter map.
///
/// A leading `?` is ignored, `+` decodes to a space and the first
/// occurrence of a repeated key wins.
///
/// ```
/// use repodeck_url::qs;
///
/// let query = qs::parse("?searchQuery=tokio+rs&page=2&page=3");
/// assert_eq!(query.get("searchQuery"), Some("tokio rs"));
/// assert_eq!(query.get("page"), Some("2"));
/// ```
pub fn parse(query: &str) -> Params {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = Params::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if !params.contains_key(&key) {
            params.insert(key.into_owned(), value);
        }
    }
    params
}

/// URI-component-encodes one key or value.
pub fn encode(component: &str) -> Cow<'_, str> {
    urlencoding::encode(component)
}
