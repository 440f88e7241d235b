//! Field access for table rows.
//!
//! The engine never looks inside a row directly. It asks the row for the
//! value at a field path through the [`Row`] trait. Paths are dotted
//! (`owner.login`), so nested records work the same way as flat ones.
//!
//! Structs usually get their implementation from `#[derive(Row)]`; JSON rows
//! (`serde_json::Value`) are resolved by walking the path segment by segment.

use crate::value::{Number, Value};

/// A record the table engine can filter and sort.
///
/// # Derive Usage
///
/// Every named field is exposed under its own name through
/// [`AsValue`](crate::AsValue).
/// `#[row(nested)]` delegates the rest of a dotted path to a field that is
/// itself a [`Row`], `#[row(skip)]` hides a field and `#[row(rename = "..")]`
/// changes the path segment. The derive also adds one `&'static str`
/// constant per exposed field, named in SCREAMING_SNAKE_CASE.
///
/// ```
/// use repodeck_table::{Row, Value, Number};
///
/// #[derive(Row)]
/// struct Owner {
///     login: String,
/// }
///
/// #[derive(Row)]
/// struct Repo {
///     name: String,
///     #[row(rename = "stargazers_count")]
///     stars: u64,
///     #[row(nested)]
///     owner: Owner,
///     #[row(skip)]
///     raw: Vec<u8>,
/// }
///
/// let repo = Repo {
///     name: "ripgrep".into(),
///     stars: 40,
///     owner: Owner { login: "BurntSushi".into() },
///     raw: Vec::new(),
/// };
///
/// assert_eq!(repo.field(Repo::NAME), Value::String("ripgrep"));
/// assert_eq!(repo.field(Repo::STARGAZERS_COUNT), Value::Number(Number::U64(40)));
/// assert_eq!(repo.field("owner.login"), Value::String("BurntSushi"));
/// assert_eq!(repo.field("owner.missing"), Value::None);
/// assert_eq!(repo.field("raw"), Value::None);
/// ```
///
/// # Manual Implementation
///
/// ```
/// use repodeck_table::{Row, Value, Number};
///
/// struct Repo {
///     name: String,
///     stars: u64,
/// }
///
/// impl Row for Repo {
///     fn field(&self, path: &str) -> Value<'_> {
///         match path {
///             "name" => Value::String(&self.name),
///             "stars" => Value::Number(Number::U64(self.stars)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Returns the value at `path`, or [`Value::None`] when the path does
    /// not resolve.
    fn field(&self, path: &str) -> Value<'_>;
}

impl<T: Row + ?Sized> Row for &T {
    fn field(&self, path: &str) -> Value<'_> {
        (**self).field(path)
    }
}

impl<T: Row> Row for Option<T> {
    fn field(&self, path: &str) -> Value<'_> {
        match self {
            Some(row) => row.field(path),
            None => Value::None,
        }
    }
}

impl Row for serde_json::Value {
    fn field(&self, path: &str) -> Value<'_> {
        match resolve_json(self, path) {
            Some(serde_json::Value::String(s)) => Value::String(s),
            Some(serde_json::Value::Bool(b)) => Value::Bool(*b),
            Some(serde_json::Value::Number(n)) => json_number(n),
            _ => Value::None,
        }
    }
}

/// Splits a dotted path into its first segment and the remainder.
///
/// ```
/// use repodeck_table::split_path;
///
/// assert_eq!(split_path("owner.login"), ("owner", Some("login")));
/// assert_eq!(split_path("a.b.c"), ("a", Some("b.c")));
/// assert_eq!(split_path("name"), ("name", None));
/// ```
pub fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

/// Walks a dotted path through nested JSON objects and arrays.
///
/// Numeric segments index into arrays (`languages.0.name`). Any segment that
/// does not resolve yields `None`.
pub fn resolve_json<'a>(root: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(root, |node, segment| match node {
        serde_json::Value::Object(map) => map.get(segment),
        serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn json_number(n: &serde_json::Number) -> Value<'_> {
    if let Some(i) = n.as_i64() {
        Value::Number(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Value::Number(Number::U64(u))
    } else if let Some(f) = n.as_f64() {
        Value::Number(Number::F64(f))
    } else {
        Value::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_top_level_fields() {
        let row = json!({ "id": 1, "name": "alpha", "archived": false });

        assert_eq!(row.field("id"), Value::Number(Number::I64(1)));
        assert_eq!(row.field("name"), Value::String("alpha"));
        assert_eq!(row.field("archived"), Value::Bool(false));
    }

    #[test]
    fn json_nested_paths() {
        let row = json!({
            "owner": { "login": "octocat", "site": { "url": "https://x" } },
            "topics": ["cli", "rust"]
        });

        assert_eq!(row.field("owner.login"), Value::String("octocat"));
        assert_eq!(row.field("owner.site.url"), Value::String("https://x"));
        assert_eq!(row.field("topics.1"), Value::String("rust"));
    }

    #[test]
    fn json_missing_paths_are_none() {
        let row = json!({ "owner": { "login": "octocat" }, "note": null });

        assert_eq!(row.field("owner.name"), Value::None);
        assert_eq!(row.field("owner.login.deeper"), Value::None);
        assert_eq!(row.field("nope"), Value::None);
        assert_eq!(row.field("note"), Value::None);
        assert_eq!(row.field(""), Value::None);
    }

    #[test]
    fn json_objects_are_not_values() {
        let row = json!({ "owner": { "login": "octocat" } });
        assert_eq!(row.field("owner"), Value::None);
    }

    #[test]
    fn references_and_options_delegate() {
        let row = json!({ "name": "beta" });
        let by_ref = &row;
        assert_eq!(by_ref.field("name"), Value::String("beta"));

        let absent: Option<serde_json::Value> = None;
        assert_eq!(absent.field("name"), Value::None);
    }
}
