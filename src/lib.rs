//! `github_comment_table` - GitHub issue comments as queryable rows
//!
//! Pages through an issue's comments with GitHub's GraphQL API (via the
//! octocrab crate) and streams each comment to a consumer as a typed record
//! or a projected row, stopping on exhaustion, row budget, cancellation or
//! the first API error.

// Module declarations
pub mod config;
pub mod fetch;
pub mod github;
pub mod runtime;
pub mod table;

// Re-export runtime types
pub use runtime::{AsyncStream, AsyncTask};

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder};

// Re-export GitHub error types
pub use github::{GitHubError, GitHubResult};

// Re-export GitHub models
pub use github::{Actor, ISSUE_COMMENT_TABLE, IssueComment, IssueCommentPages, IssueScope, RateLimit};

// Re-export the paginated fetcher
pub use fetch::{
    FetchOutcome, FetchSummary, MAX_PAGE_SIZE, Page, PageInfo, PageSource, QueryBudget,
    adjust_page_size, paginate, paginate_async, stream_pages,
};

// Re-export the table surface
pub use table::{
    Column, ColumnType, Qualifiers, Row, RowSink, TableDefinition, list_issue_comment_rows,
    shared_comment_columns,
};

pub use config::PluginConfig;
