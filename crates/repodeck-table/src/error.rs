//! Error types for the table engine.

use thiserror::Error;

use crate::filter::FilterKind;

/// Errors reported by table handlers.
///
/// Derivation itself never fails; only handlers that address a filter by
/// name can be called with something the table does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// No filter is registered under this key.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// The new value's shape does not match the filter's kind.
    #[error("filter '{key}' is a {expected} filter, got a {actual} value")]
    FilterKindMismatch {
        key: String,
        expected: FilterKind,
        actual: FilterKind,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
