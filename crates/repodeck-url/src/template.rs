//! Path templates with named placeholders.
//!
//! A template is a `/`-separated path whose segments are either literal text
//! or a placeholder: `:name` (required) or `:name?` (optional). Placeholder
//! names use ASCII letters, digits and `_`.
//!
//! ```
//! use repodeck_url::{Params, RouteTemplate};
//!
//! let template = RouteTemplate::parse("/repos/:owner/:repo").unwrap();
//! let params = Params::new().with("owner", "rust-lang").with("repo", "rust");
//! assert_eq!(template.to_path(&params).unwrap(), "/repos/rust-lang/rust");
//!
//! let matched = template.matches("/repos/tokio-rs/tokio").unwrap();
//! assert_eq!(matched.get("repo"), Some("tokio"));
//! ```

use std::fmt;

use crate::error::{Result, UrlError};
use crate::params::Params;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param { name: String, optional: bool },
}

/// A parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parses a template such as `/repositories/:id`.
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: &str| UrlError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let Some(body) = template.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };

        let mut segments = Vec::new();
        if !body.is_empty() {
            for raw in body.split('/') {
                if raw.is_empty() {
                    return Err(invalid("empty path segment"));
                }
                let segment = match raw.strip_prefix(':') {
                    Some(spec) => {
                        let (name, optional) = match spec.strip_suffix('?') {
                            Some(name) => (name, true),
                            None => (spec, false),
                        };
                        if name.is_empty()
                            || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                        {
                            return Err(invalid(&format!("bad placeholder name ':{spec}'")));
                        }
                        if segments.iter().any(
                            |s| matches!(s, Segment::Param { name: existing, .. } if existing == name),
                        ) {
                            return Err(invalid(&format!("placeholder ':{name}' used twice")));
                        }
                        Segment::Param {
                            name: name.to_string(),
                            optional,
                        }
                    }
                    None if raw.contains(':') => {
                        return Err(invalid("placeholders must span a whole segment"));
                    }
                    None => Segment::Literal(raw.to_string()),
                };
                segments.push(segment);
            }
        }

        Ok(RouteTemplate {
            source: template.to_string(),
            segments,
        })
    }

    /// The template text as given to [`RouteTemplate::parse`].
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Builds a path, URI-component-encoding each placeholder value.
    ///
    /// Parameters the template does not name are ignored. A missing or
    /// empty value for a required placeholder is an error; an optional one
    /// drops its segment.
    pub fn to_path(&self, params: &Params) -> Result<String> {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                Segment::Param { name, optional } => {
                    match params.get(name).filter(|v| !v.is_empty()) {
                        Some(value) => {
                            path.push('/');
                            path.push_str(&urlencoding::encode(value));
                        }
                        None if *optional => {}
                        None => {
                            return Err(UrlError::MissingParam {
                                param: name.clone(),
                                template: self.source.clone(),
                            })
                        }
                    }
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    /// Matches a path (without query or fragment) against this template.
    ///
    /// Returns the decoded placeholder values on success. A single trailing
    /// slash is tolerated.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = path.strip_prefix('/')?;
        let path = path.strip_suffix('/').unwrap_or(path);
        let parts: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        let mut params = Params::new();
        if match_segments(&self.segments, &parts, &mut params) {
            Some(params)
        } else {
            None
        }
    }
}

fn match_segments(segments: &[Segment], parts: &[&str], params: &mut Params) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return parts.is_empty();
    };

    match segment {
        Segment::Literal(text) => match parts.split_first() {
            Some((part, tail)) if part == text => match_segments(rest, tail, params),
            _ => false,
        },
        Segment::Param { name, optional } => {
            if let Some((part, tail)) = parts.split_first() {
                if let Ok(value) = urlencoding::decode(part) {
                    if !value.is_empty() {
                        let previous = params.insert(name.clone(), &value);
                        if match_segments(rest, tail, params) {
                            return true;
                        }
                        match previous {
                            Some(previous) => params.insert(name.clone(), previous),
                            None => params.remove(name),
                        };
                    }
                }
            }
            *optional && match_segments(rest, parts, params)
        }
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
