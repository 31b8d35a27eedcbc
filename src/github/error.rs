//! GitHub API error types

use thiserror::Error;

/// Error types for GitHub API operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Octocrab library error
    #[error("Octocrab error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Generic GitHub API error
    #[error("GitHub API error: {0}")]
    Api(String),

    /// GraphQL response carried an `errors` array
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found (404 or GraphQL `NOT_FOUND`)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication required or failed
    #[error("Authentication required")]
    AuthRequired,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// Configuration file or environment error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The surrounding query was cancelled before the fetch finished
    #[error("Fetch cancelled")]
    Cancelled,
}

impl GitHubError {
    /// True for GraphQL `NOT_FOUND` errors and HTTP 404 responses.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            GitHubError::NotFound(_) => true,
            GitHubError::Octocrab(octocrab::Error::GitHub { source, .. }) => {
                source.status_code.as_u16() == 404
            }
            _ => false,
        }
    }
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;
