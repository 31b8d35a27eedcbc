//! Typed GraphQL models for issue comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies the issue whose comments are paged through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueScope {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Issue number within the repository
    pub number: u64,
}

impl IssueScope {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// `owner/repo`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A user, bot or organization referenced by a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One comment on an issue.
///
/// Field names follow the query aliases in [`super::graphql`], so `id` is the
/// numeric database id and `node_id` the global relay id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueComment {
    pub id: Option<i64>,
    pub node_id: String,
    pub author: Option<Actor>,
    pub author_association: String,
    pub body: String,
    pub body_text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_via_email: bool,
    pub editor: Option<Actor>,
    pub includes_created_edit: bool,
    pub is_minimized: bool,
    pub minimized_reason: Option<String>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub url: String,
    pub can_delete: bool,
    pub can_minimize: bool,
    pub can_react: bool,
    pub can_update: bool,
    pub cannot_update_reasons: Vec<String>,
    pub did_author: bool,
}

/// Rate limit snapshot returned alongside every query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateLimit {
    pub limit: u32,
    pub cost: u32,
    pub remaining: u32,
    pub used: u32,
    pub reset_at: Option<DateTime<Utc>>,
    pub node_count: u32,
}

impl RateLimit {
    /// Single diagnostic line for logging, prefixed with the table name.
    #[must_use]
    pub fn summary(&self, table: &str) -> String {
        let reset = self
            .reset_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "{table} rate limit: remaining {}/{} used {} cost {} nodes {} resets {reset}",
            self.remaining, self.limit, self.used, self.cost, self.node_count
        )
    }
}
