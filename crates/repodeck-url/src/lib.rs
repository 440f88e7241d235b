//! Route templates, URL builders and query strings.
//!
//! - [`RouteTemplate`]: `/repositories/:id` style paths, built and matched
//! - [`make_url_for`] / [`UrlFor`]: named route tables with an optional base
//! - [`qs`]: sorted, URI-component-encoded query strings
//!
//! # Example
//!
//! ```rust
//! use repodeck_url::{make_url_for, Params};
//!
//! let routes = make_url_for([
//!     ("repositories", "/repositories"),
//!     ("repository", "/repositories/:id"),
//! ])
//! .unwrap();
//!
//! let url = routes
//!     .url("repositories", &Params::new(), &Params::new().with("searchQuery", "serde"))
//!     .unwrap();
//! assert_eq!(url, "/repositories?searchQuery=serde");
//!
//! let matched = routes.recognize("/repositories/7?owner=serde-rs&repo=serde").unwrap();
//! assert_eq!(matched.name, "repository");
//! assert_eq!(matched.params.get("id"), Some("7"));
//! assert_eq!(matched.query.get("owner"), Some("serde-rs"));
//! ```
//!
//! # Encoding
//!
//! Placeholder values, query keys and query values are percent-encoded with
//! everything but `A-Z a-z 0-9 - _ . ~` escaped.

mod error;
mod params;
pub mod qs;
mod routes;
mod template;

pub use error::{Result, UrlError};
pub use params::Params;
pub use routes::{make_url_for, Match, UrlFor};
pub use template::RouteTemplate;
