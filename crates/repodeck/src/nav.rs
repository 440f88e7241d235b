//! In-app navigation: the current location and its history.

use std::fmt;

use repodeck_url::{qs, Params};
use tracing::debug;

/// A path plus its query string, without the leading `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub search: String,
}

impl Location {
    /// Splits `url` into path and query. The fragment is dropped.
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (pathname, search) = url.split_once('?').unwrap_or((url, ""));
        let pathname = if pathname.is_empty() { "/" } else { pathname };
        Location {
            pathname: pathname.to_string(),
            search: search.to_string(),
        }
    }

    /// Decoded query parameters.
    pub fn query(&self) -> Params {
        qs::parse(&self.search)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.search.is_empty() {
            f.write_str(&self.pathname)
        } else {
            write!(f, "{}?{}", self.pathname, self.search)
        }
    }
}

/// The current location and the ones before it.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Location,
    past: Vec<Location>,
}

impl Navigator {
    pub fn new(start: &str) -> Self {
        Navigator {
            current: Location::parse(start),
            past: Vec::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.current
    }

    pub fn navigate(&mut self, url: &str) {
        let next = Location::parse(url);
        debug!(from = %self.current, to = %next, "navigate");
        self.past.push(std::mem::replace(&mut self.current, next));
    }

    /// Returns to the previous location. `false` at the first entry.
    pub fn back(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Number of entries, the current one included.
    pub fn depth(&self) -> usize {
        self.past.len() + 1
    }
}

/// Whether a navigation link to `to` shows as active on `pathname`.
///
/// The root link is active only on the root; any other link is active on
/// its own path and everything below it.
pub fn nav_link_active(to: &str, pathname: &str) -> bool {
    if to == "/" {
        pathname == "/"
    } else {
        pathname.starts_with(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locations() {
        let loc = Location::parse("/repositories?searchQuery=react%20hooks#top");
        assert_eq!(loc.pathname, "/repositories");
        assert_eq!(loc.query().get("searchQuery"), Some("react hooks"));
        assert_eq!(loc.to_string(), "/repositories?searchQuery=react%20hooks");
        assert_eq!(Location::parse("").pathname, "/");
    }

    #[test]
    fn history() {
        let mut nav = Navigator::new("/");
        nav.navigate("/repositories?searchQuery=x");
        nav.navigate("/repositories/1?owner=a&repo=b");
        assert_eq!(nav.depth(), 3);
        assert!(nav.back());
        assert_eq!(nav.location().query().get("searchQuery"), Some("x"));
        assert!(nav.back());
        assert!(!nav.back());
        assert_eq!(nav.location().pathname, "/");
    }

    #[test]
    fn active_links() {
        assert!(nav_link_active("/", "/"));
        assert!(!nav_link_active("/", "/repositories"));
        assert!(nav_link_active("/repositories", "/repositories/12"));
        assert!(!nav_link_active("/repositories", "/"));
    }
}
