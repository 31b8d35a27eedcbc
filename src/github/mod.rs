//! GitHub API operations module
//!
//! GraphQL access to issue comments using the octocrab library.

pub mod client;
pub mod error;
pub mod graphql;
pub mod list_issue_comments;
pub mod models;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};
pub use util::spawn_task;

pub use list_issue_comments::{ISSUE_COMMENT_TABLE, IssueCommentPages};
pub use models::{Actor, IssueComment, IssueScope, RateLimit};
