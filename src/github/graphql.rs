//! GraphQL documents and response envelopes.

use serde::{Deserialize, Serialize};

use crate::fetch::PageInfo;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::{IssueComment, RateLimit};

/// Comments on one issue, one page at a time.
pub const ISSUE_COMMENTS_QUERY: &str = r#"
query IssueComments(
  $owner: String!,
  $name: String!,
  $issueNumber: Int!,
  $pageSize: Int!,
  $cursor: String
) {
  rateLimit {
    limit
    cost
    remaining
    used
    resetAt
    nodeCount
  }
  repository(owner: $owner, name: $name) {
    issue(number: $issueNumber) {
      comments(first: $pageSize, after: $cursor) {
        pageInfo {
          hasNextPage
          endCursor
        }
        totalCount
        nodes {
          id: databaseId
          nodeId: id
          author { login avatarUrl url }
          authorAssociation
          body
          bodyText
          createdAt
          createdViaEmail
          editor { login avatarUrl url }
          includesCreatedEdit
          isMinimized
          minimizedReason
          lastEditedAt
          publishedAt
          updatedAt
          url
          canDelete: viewerCanDelete
          canMinimize: viewerCanMinimize
          canReact: viewerCanReact
          canUpdate: viewerCanUpdate
          cannotUpdateReasons: viewerCannotUpdateReasons
          didAuthor: viewerDidAuthor
        }
      }
    }
  }
}
"#;

/// Variables for [`ISSUE_COMMENTS_QUERY`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCommentsVariables {
    pub owner: String,
    pub name: String,
    pub issue_number: i32,
    pub page_size: u32,
    pub cursor: Option<String>,
}

/// Request body posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorEntry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// `{ data, errors }` envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

impl<T> GraphQlResponse<T> {
    /// Data when the response carried no errors, otherwise the classified error.
    pub fn into_result(self) -> GitHubResult<T> {
        if let Some(err) = classify_errors(&self.errors) {
            return Err(err);
        }
        self.data
            .ok_or_else(|| GitHubError::Api("GraphQL response carried no data".to_string()))
    }
}

fn classify_errors(errors: &[GraphQlErrorEntry]) -> Option<GitHubError> {
    if errors.is_empty() {
        return None;
    }
    if let Some(not_found) = errors
        .iter()
        .find(|e| e.kind.as_deref() == Some("NOT_FOUND"))
    {
        return Some(GitHubError::NotFound(not_found.message.clone()));
    }
    if errors.iter().any(|e| e.kind.as_deref() == Some("RATE_LIMITED")) {
        return Some(GitHubError::RateLimitExceeded);
    }
    Some(GitHubError::GraphQl(
        errors.iter().map(|e| e.message.clone()).collect(),
    ))
}

impl GraphQlResponse<IssueCommentsData> {
    /// Rate limit reported alongside the data, present even when `errors` is not empty.
    #[must_use]
    pub fn rate_limit(&self) -> Option<&RateLimit> {
        self.data.as_ref().and_then(|data| data.rate_limit.as_ref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCommentsData {
    #[serde(default)]
    pub rate_limit: Option<RateLimit>,
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    pub issue: Option<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub struct IssueNode {
    pub comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConnection {
    pub page_info: PageInfo,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<IssueComment>,
}
