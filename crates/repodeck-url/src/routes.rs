//! Named route tables.
//!
//! [`make_url_for`] compiles a set of named templates once. The resulting
//! [`UrlFor`] builds URLs by route name and, in the other direction,
//! recognizes which route a URL points at.

use tracing::trace;

use crate::error::{Result, UrlError};
use crate::params::Params;
use crate::qs;
use crate::template::RouteTemplate;

/// Compiles named route templates into a URL builder.
///
/// Names keep their registration order, which is the order
/// [`UrlFor::recognize`] tries them in. Registering a name twice replaces
/// the earlier template in place.
///
/// ```
/// use repodeck_url::{make_url_for, Params};
///
/// let get_url = make_url_for([
///     ("home", "/"),
///     ("repositories", "/repositories"),
///     ("repository", "/repositories/:id"),
/// ])
/// .unwrap();
///
/// let url = get_url
///     .url(
///         "repository",
///         &Params::new().with("id", 42),
///         &Params::new().with("repo", "tokio").with("owner", "tokio-rs"),
///     )
///     .unwrap();
/// assert_eq!(url, "/repositories/42?owner=tokio-rs&repo=tokio");
/// ```
pub fn make_url_for<I, K, V>(routes: I) -> Result<UrlFor>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let mut compiled: Vec<(String, RouteTemplate)> = Vec::new();
    for (name, template) in routes {
        let name = name.into();
        let template = RouteTemplate::parse(template.as_ref())?;
        match compiled.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = template,
            None => compiled.push((name, template)),
        }
    }
    Ok(UrlFor {
        routes: compiled,
        base: String::new(),
    })
}

/// URL builder over a fixed set of named routes.
#[derive(Debug, Clone)]
pub struct UrlFor {
    routes: Vec<(String, RouteTemplate)>,
    base: String,
}

/// A URL recognized by [`UrlFor::recognize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Name of the matching route.
    pub name: String,
    /// Decoded placeholder values.
    pub params: Params,
    /// Decoded query parameters.
    pub query: Params,
}

impl UrlFor {
    /// Prefixes every built URL with `base` (e.g. an API origin).
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Builds the URL of route `name`.
    ///
    /// The query string is appended only when `query` is non-empty.
    pub fn url(&self, name: &str, route_params: &Params, query: &Params) -> Result<String> {
        let template = self
            .template(name)
            .ok_or_else(|| UrlError::UnknownRoute(name.to_string()))?;
        let path = template.to_path(route_params)?;

        let mut url = String::with_capacity(self.base.len() + path.len());
        url.push_str(&self.base);
        url.push_str(&path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&qs::stringify(query));
        }
        Ok(url)
    }

    /// Builds the URL of a route without placeholders or query.
    pub fn path(&self, name: &str) -> Result<String> {
        self.url(name, &Params::new(), &Params::new())
    }

    pub fn template(&self, name: &str) -> Option<&RouteTemplate> {
        self.routes
            .iter()
            .find(|(route, _)| route == name)
            .map(|(_, template)| template)
    }

    /// Registered route names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(name, _)| name.as_str())
    }

    /// Finds the first route matching `url`.
    ///
    /// The base prefix, if present, is stripped; the fragment is ignored.
    pub fn recognize(&self, url: &str) -> Option<Match> {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let url = match url.strip_prefix(self.base.as_str()) {
            Some(rest) if !self.base.is_empty() => rest,
            _ => url,
        };
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url, ""),
        };
        let path = if path.is_empty() { "/" } else { path };

        let found = self.routes.iter().find_map(|(name, template)| {
            template.matches(path).map(|params| Match {
                name: name.clone(),
                params,
                query: qs::parse(query),
            })
        });
        if found.is_none() {
            trace!(path, "no route matched");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> UrlFor {
        make_url_for([
            ("home", "/"),
            ("repositories", "/repositories"),
            ("repository", "/repositories/:id"),
        ])
        .unwrap()
    }

    #[test]
    fn builds_without_query() {
        assert_eq!(app().path("home").unwrap(), "/");
        assert_eq!(
            app()
                .url("repository", &Params::new().with("id", 1), &Params::new())
                .unwrap(),
            "/repositories/1"
        );
    }

    #[test]
    fn appends_sorted_query() {
        let url = app()
            .url(
                "repositories",
                &Params::new(),
                &Params::new().with("searchQuery", "react hooks"),
            )
            .unwrap();
        assert_eq!(url, "/repositories?searchQuery=react%20hooks");
    }

    #[test]
    fn unknown_route_and_missing_param() {
        assert_eq!(
            app().path("nope"),
            Err(UrlError::UnknownRoute("nope".into()))
        );
        assert!(matches!(
            app().path("repository"),
            Err(UrlError::MissingParam { .. })
        ));
    }

    #[test]
    fn base_prefix() {
        let api = make_url_for([("repo", "/repos/:owner/:repo")])
            .unwrap()
            .with_base("https://api.github.com/");
        let url = api
            .url(
                "repo",
                &Params::new().with("owner", "o").with("repo", "r"),
                &Params::new(),
            )
            .unwrap();
        assert_eq!(url, "https://api.github.com/repos/o/r");
        assert_eq!(api.recognize(&url).map(|m| m.name), Some("repo".into()));
    }

    #[test]
    fn recognize_round_trips_built_urls() {
        let routes = app();
        let url = routes
            .url(
                "repository",
                &Params::new().with("id", 99),
                &Params::new().with("owner", "me").with("repo", "x y"),
            )
            .unwrap();
        let matched = routes.recognize(&url).unwrap();
        assert_eq!(matched.name, "repository");
        assert_eq!(matched.params.get("id"), Some("99"));
        assert_eq!(matched.query.get("repo"), Some("x y"));
    }

    #[test]
    fn recognize_first_match_wins() {
        let routes = make_url_for([("any", "/:page"), ("repositories", "/repositories")]).unwrap();
        assert_eq!(routes.recognize("/repositories").unwrap().name, "any");
        assert_eq!(app().recognize("").unwrap().name, "home");
        assert_eq!(app().recognize("/?x=1#top").unwrap().query.get("x"), Some("1"));
        assert!(app().recognize("/users").is_none());
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let routes = make_url_for([("a", "/one"), ("b", "/two"), ("a", "/three")]).unwrap();
        assert_eq!(routes.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(routes.path("a").unwrap(), "/three");
    }

    #[test]
    fn invalid_template_fails_early() {
        assert!(matches!(
            make_url_for([("bad", "no-slash")]),
            Err(UrlError::InvalidTemplate { .. })
        ));
    }
}
