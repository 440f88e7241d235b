//! GitHub payloads and the records the pages display.
//!
//! The `*Item`/`Owner`/`SearchResponse` types mirror the REST API and are only
//! ever deserialized. [`Repository`] and [`RepositoryFull`] are the flattened,
//! display-ready records built from them by [`crate::github::convert`].

use std::collections::BTreeMap;

use repodeck_table::Row;
use serde::{Deserialize, Serialize};

/// Body of `GET /search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<RepositoryItem>,
}

/// A repository as returned by the search and repository endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryItem {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    /// `null` for repositories nobody ever pushed to.
    pub pushed_at: Option<String>,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub owner: Owner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
    pub html_url: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Body of `GET /repos/:owner/:repo/languages`: bytes of code per language.
pub type LanguageBytes = BTreeMap<String, u64>;

/// One row of the repositories table.
#[derive(Debug, Clone, PartialEq, Serialize, Row)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub stargazers_count: u64,
    /// `stargazers_count` in compact notation.
    pub stars: String,
    /// Raw RFC 3339 timestamp; sorts chronologically as text.
    pub pushed_at: String,
    /// `pushed_at` formatted for display.
    pub last_commit_date: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub owner_name: String,
    pub owner_link: String,
    pub owner_avatar: String,
}

/// A repository with its language breakdown, for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryFull {
    #[serde(flatten)]
    pub repository: Repository,
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Language {
    pub name: String,
    /// Share of the repository's code, rounded to one decimal.
    pub usage_percent: f64,
}
