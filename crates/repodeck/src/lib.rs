//! # repodeck
//!
//! Search GitHub repositories from the terminal. Results are fetched once
//! per search and then filtered, sorted and paged in memory by
//! [`repodeck_table`].
//!
//! ## Layers
//!
//! - [`github`]: the [`RepoSource`](github::RepoSource) trait and its REST
//!   implementation
//! - [`pages`]: page containers holding UI state and building render contexts
//! - [`render`]: minijinja templates and JSON output
//! - [`app`]: location, navigation and the browse command loop
//! - [`cli`]: the `repodeck` command line
//!
//! Pages receive their data source as a parameter, so everything above
//! [`github`] runs against canned data in tests:
//!
//! ```
//! use repodeck::app::{App, Screen};
//! use repodeck::config::Config;
//! use repodeck::github::RepoSource;
//! use repodeck::models::{Repository, RepositoryFull};
//! use repodeck::error::{AppError, Result};
//!
//! struct Empty;
//!
//! impl RepoSource for Empty {
//!     fn search_repositories(&self, _: &str) -> Result<Vec<Repository>> {
//!         Ok(Vec::new())
//!     }
//!     fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryFull> {
//!         Err(AppError::GitHubApi { status: 404, message: format!("{owner}/{repo}") })
//!     }
//! }
//!
//! let mut app = App::new(&Config::default(), Empty, "/repositories?searchQuery=x").unwrap();
//! let Screen::Repositories(page) = app.screen().unwrap() else { panic!() };
//! assert_eq!(page.total_rows, 0);
//! ```

pub mod app;
pub mod browse;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod github;
pub mod logging;
pub mod models;
pub mod nav;
pub mod pages;
pub mod render;
pub mod routes;

pub use error::{AppError, Result};
