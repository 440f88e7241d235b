//! Data fetching.
//!
//! Pages never talk HTTP themselves: they receive a [`RepoSource`], which
//! [`GitHubClient`] implements against the REST API and tests implement with
//! canned data.

mod client;
pub mod convert;

pub use client::GitHubClient;

use crate::error::Result;
use crate::models::{Repository, RepositoryFull};

/// Where repositories come from.
pub trait RepoSource {
    /// Repositories matching `query`, best match first.
    ///
    /// An empty query yields no repositories.
    fn search_repositories(&self, query: &str) -> Result<Vec<Repository>>;

    /// One repository with its language breakdown.
    fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryFull>;
}

impl<S: RepoSource + ?Sized> RepoSource for &S {
    fn search_repositories(&self, query: &str) -> Result<Vec<Repository>> {
        (**self).search_repositories(query)
    }

    fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryFull> {
        (**self).repository(owner, repo)
    }
}
