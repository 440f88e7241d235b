//! Page containers.
//!
//! A page owns its UI state, fetches through a
//! [`RepoSource`](crate::github::RepoSource) and produces a serializable
//! context that [`crate::render`] turns into terminal output.

pub mod repositories;
pub mod repository;

use serde::Serialize;

pub use repositories::{ListOptions, RepositoriesContext, RepositoriesPage, SearchState};
pub use repository::{RepositoryContext, RepositoryPage};

use crate::error::Result;
use crate::nav::nav_link_active;
use crate::routes::{Routes, HOME};
use repodeck_url::Params;

/// An entry of the header navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub to: String,
    pub active: bool,
}

/// Header navigation shown on every page.
pub fn nav_links(routes: &Routes, pathname: &str) -> Result<Vec<NavLink>> {
    let to = routes.get_url(HOME, &Params::new(), &Params::new())?;
    Ok(vec![NavLink {
        label: "Repositories",
        active: nav_link_active(&to, pathname),
        to,
    }])
}
