//! Error types for URL building.

use thiserror::Error;

/// Errors from parsing route templates and building URLs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// A required placeholder has no value.
    #[error("missing route parameter '{param}' for '{template}'")]
    MissingParam { param: String, template: String },

    /// No route is registered under this name.
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    /// The template itself is malformed.
    #[error("invalid route template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },
}

/// Result type for URL operations.
pub type Result<T> = std::result::Result<T, UrlError>;
