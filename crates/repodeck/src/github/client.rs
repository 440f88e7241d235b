//! GitHub REST client.

use chrono::Utc;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use repodeck_url::Params;

use super::{convert, RepoSource};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{LanguageBytes, Repository, RepositoryFull, RepositoryItem, SearchResponse};
use crate::routes::{Routes, REPO, REPO_LANGUAGES, SEARCH_REPOS};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Fallback wait when GitHub limits us without saying for how long.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Blocking client for the endpoints the pages need.
pub struct GitHubClient {
    client: Client,
    routes: Routes,
    user_agent: String,
    token: Option<String>,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(config: &Config, routes: Routes) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            client,
            routes,
            user_agent: config.user_agent.clone(),
            token: config.token.clone(),
            per_page: config.fetch_per_page,
        })
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, GITHUB_JSON);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }
}

impl RepoSource for GitHubClient {
    fn search_repositories(&self, query: &str) -> Result<Vec<Repository>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.routes.get_api_url(
            SEARCH_REPOS,
            &Params::new(),
            &Params::new().with("q", query).with("per_page", self.per_page),
        )?;
        let body: SearchResponse = self.get(&url)?;
        if body.incomplete_results {
            warn!(query, "GitHub returned incomplete search results");
        }
        info!(
            query,
            total = body.total_count,
            fetched = body.items.len(),
            "searched repositories"
        );
        Ok(body.items.into_iter().map(convert::repository).collect())
    }

    fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryFull> {
        let params = Params::new().with("owner", owner).with("repo", repo);
        let item: RepositoryItem =
            self.get(&self.routes.get_api_url(REPO, &params, &Params::new())?)?;
        let bytes: LanguageBytes =
            self.get(&self.routes.get_api_url(REPO_LANGUAGES, &params, &Params::new())?)?;
        info!(owner, repo, languages = bytes.len(), "loaded repository");
        Ok(convert::repository_full(item, &bytes))
    }
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let now = Utc::now().timestamp();
    if let Some(retry_after_secs) = rate_limit_wait(status, response.headers(), now) {
        return Err(AppError::RateLimited { retry_after_secs });
    }

    let body = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(AppError::GitHubApi {
        status: status.as_u16(),
        message: api_message(&body),
    })
}

/// Seconds to wait if the response is a rate-limit rejection.
///
/// GitHub answers 403 or 429 and either sends `retry-after` (secondary
/// limits) or reports zero remaining requests with a reset epoch.
fn rate_limit_wait(status: StatusCode, headers: &HeaderMap, now: i64) -> Option<u64> {
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    if let Some(retry_after) = header("retry-after") {
        return Some(retry_after.trim().parse().unwrap_or(DEFAULT_RETRY_AFTER_SECS));
    }
    if header("x-ratelimit-remaining").map(str::trim) == Some("0") {
        let wait = header("x-ratelimit-reset")
            .and_then(|reset| reset.trim().parse::<i64>().ok())
            .map(|reset| reset.saturating_sub(now).max(0) as u64)
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Some(wait);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(DEFAULT_RETRY_AFTER_SECS);
    }
    None
}

/// The `message` field of a GitHub error body, or the body itself.
fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(k, v) in pairs {
            map.insert(k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn retry_after_header() {
        let wait = rate_limit_wait(StatusCode::FORBIDDEN, &headers(&[("retry-after", "30")]), 0);
        assert_eq!(wait, Some(30));
    }

    #[test]
    fn exhausted_primary_limit() {
        let h = headers(&[("x-ratelimit-remaining", "0"), ("x-ratelimit-reset", "1000")]);
        assert_eq!(rate_limit_wait(StatusCode::FORBIDDEN, &h, 940), Some(60));
        assert_eq!(rate_limit_wait(StatusCode::FORBIDDEN, &h, 2000), Some(0));
    }

    #[test]
    fn plain_forbidden_is_not_rate_limit() {
        let h = headers(&[("x-ratelimit-remaining", "42")]);
        assert_eq!(rate_limit_wait(StatusCode::FORBIDDEN, &h, 0), None);
        assert_eq!(rate_limit_wait(StatusCode::NOT_FOUND, &headers(&[]), 0), None);
        assert_eq!(
            rate_limit_wait(StatusCode::TOO_MANY_REQUESTS, &headers(&[]), 0),
            Some(DEFAULT_RETRY_AFTER_SECS)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            api_message(r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#),
            "Not Found"
        );
        assert_eq!(api_message("  bad gateway \n"), "bad gateway");
    }

    #[test]
    fn empty_query_skips_the_request() {
        let config = Config {
            api_base: "http://127.0.0.1:9".into(),
            ..Config::default()
        };
        let routes = Routes::new(&config.api_base).unwrap();
        let client = GitHubClient::new(&config, routes).unwrap();
        assert!(client.search_repositories("   ").unwrap().is_empty());
    }
}
