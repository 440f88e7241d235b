//! The repository detail page.

use serde::Serialize;
use tracing::info;

use repodeck_url::Params;

use super::{nav_links, NavLink};
use crate::error::{AppError, Result};
use crate::github::RepoSource;
use crate::models::RepositoryFull;
use crate::nav::Location;
use crate::routes::{Routes, REPOSITORIES, SEARCH_QUERY};

/// Detail page of one repository, addressed by `?owner=&repo=`.
#[derive(Debug, Clone)]
pub struct RepositoryPage {
    owner: String,
    repo: String,
}

impl RepositoryPage {
    /// Reads `owner` and `repo` from the query. Both are required.
    pub fn from_query(query: &Params) -> Result<Self> {
        let required = |key: &str| {
            query
                .get(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| AppError::InvalidInput(format!("missing '{key}' query parameter")))
        };
        Ok(RepositoryPage {
            owner: required("owner")?,
            repo: required("repo")?,
        })
    }

    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepositoryPage {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Fetches the repository and builds the render context.
    pub fn load<S: RepoSource + ?Sized>(
        &self,
        source: &S,
        routes: &Routes,
        location: &Location,
    ) -> Result<RepositoryContext> {
        let repository = source.repository(&self.owner, &self.repo)?;
        info!(owner = %self.owner, repo = %self.repo, "loaded repository page");
        Ok(RepositoryContext {
            nav: nav_links(routes, &location.pathname)?,
            back_url: self.back_url(routes)?,
            repository,
        })
    }

    /// The search page, searching for this repository's name.
    pub fn back_url(&self, routes: &Routes) -> Result<String> {
        routes.get_url(
            REPOSITORIES,
            &Params::new(),
            &Params::new().with(SEARCH_QUERY, &self.repo),
        )
    }
}

/// Everything the detail page template shows.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryContext {
    pub nav: Vec<NavLink>,
    pub back_url: String,
    pub repository: RepositoryFull,
}
