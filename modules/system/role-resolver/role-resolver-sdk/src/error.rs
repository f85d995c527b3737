//! Error types for the role resolver module.

use thiserror::Error;

/// Failure of a directory query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error("directory search timed out")]
    Timeout,

    #[error("invalid search filter: {0}")]
    InvalidFilter(String),
}

/// Errors that can occur when resolving roles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleResolverError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("no directory entry found for user '{username}'")]
    UserNotFound { username: String },

    #[error("{count} directory entries found for user '{username}'")]
    MultipleEntries { username: String, count: usize },
}
