//! Route tables of the application and of the GitHub API.

use repodeck_url::{make_url_for, Match, Params, UrlFor};

use crate::error::Result;

pub const HOME: &str = "home";
pub const REPOSITORIES: &str = "repositories";
pub const REPOSITORY: &str = "repository";

pub const SEARCH_REPOS: &str = "searchRepos";
pub const REPO: &str = "repo";
pub const REPO_LANGUAGES: &str = "repoLanguages";

/// Query parameter carrying the search text of the list page.
pub const SEARCH_QUERY: &str = "searchQuery";

/// Both route tables, built once at startup.
#[derive(Debug, Clone)]
pub struct Routes {
    app: UrlFor,
    api: UrlFor,
}

impl Routes {
    /// Builds the tables, prefixing API URLs with `api_base`.
    pub fn new(api_base: &str) -> Result<Self> {
        let app = make_url_for([
            (HOME, "/"),
            (REPOSITORIES, "/repositories"),
            (REPOSITORY, "/repositories/:id"),
        ])?;
        let api = make_url_for([
            (SEARCH_REPOS, "/search/repositories"),
            (REPO, "/repos/:owner/:repo"),
            (REPO_LANGUAGES, "/repos/:owner/:repo/languages"),
        ])?
        .with_base(api_base);
        Ok(Routes { app, api })
    }

    /// An application URL (path plus query).
    pub fn get_url(&self, name: &str, params: &Params, query: &Params) -> Result<String> {
        Ok(self.app.url(name, params, query)?)
    }

    /// An absolute GitHub API URL.
    pub fn get_api_url(&self, name: &str, params: &Params, query: &Params) -> Result<String> {
        Ok(self.api.url(name, params, query)?)
    }

    /// Resolves an application URL to its route.
    pub fn recognize(&self, url: &str) -> Option<Match> {
        self.app.recognize(url)
    }

    pub fn app(&self) -> &UrlFor {
        &self.app
    }

    pub fn api(&self) -> &UrlFor {
        &self.api
    }
}
