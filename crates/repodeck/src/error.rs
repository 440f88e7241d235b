//! Error types for the repodeck application.

use thiserror::Error;

use repodeck_table::TableError;
use repodeck_url::UrlError;

/// Errors surfaced to the presentation layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// The request did not complete (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// GitHub answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    GitHubApi { status: u16, message: String },

    /// GitHub API rate limit exceeded.
    #[error("GitHub API rate limit exceeded, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// The response body was not what the API documents.
    #[error("unexpected response from GitHub: {0}")]
    Decode(String),

    /// Configuration file or environment is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A page was opened without the parameters it needs.
    #[error("{0}")]
    InvalidInput(String),

    /// Template rendering failed.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Short message for the status line, without transport details.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Could not reach GitHub. Check your connection.",
            Self::RateLimited { .. } => "GitHub API rate limit reached. Try again later.",
            Self::GitHubApi { status: 404, .. } => "Repository not found.",
            Self::GitHubApi { status: 401, .. } => "GitHub rejected the token.",
            Self::GitHubApi { .. } | Self::Decode(_) => "GitHub returned an unexpected response.",
            Self::Config(_) => "Configuration is invalid.",
            Self::InvalidInput(_) | Self::Url(_) | Self::Table(_) => "Invalid input.",
            Self::Render(_) | Self::Io(_) => "Could not write output.",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
