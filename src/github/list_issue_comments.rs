//! GitHub issue comments listing operation.

use crate::fetch::{Page, PageSource, QueryBudget, stream_pages};
use crate::github::client::GitHubClient;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::graphql::{
    GraphQlResponse, ISSUE_COMMENTS_QUERY, IssueCommentsData, IssueCommentsVariables,
};
use crate::github::models::{IssueComment, IssueScope};
use crate::github::util::spawn_task;
use crate::runtime::{AsyncStream, AsyncTask};
use log::debug;
use std::sync::Arc;

/// Table name used in diagnostics.
pub const ISSUE_COMMENT_TABLE: &str = "github_issue_comment";

/// Pages of comments on one issue, fetched over GraphQL.
#[derive(Clone, Debug)]
pub struct IssueCommentPages {
    client: GitHubClient,
}

impl IssueCommentPages {
    #[must_use]
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

impl PageSource for IssueCommentPages {
    type Scope = IssueScope;
    type Item = IssueComment;

    fn name(&self) -> &'static str {
        ISSUE_COMMENT_TABLE
    }

    async fn fetch_page(
        &self,
        scope: &IssueScope,
        page_size: u32,
        cursor: Option<&str>,
    ) -> GitHubResult<Page<IssueComment>> {
        let issue_number = i32::try_from(scope.number).map_err(|_| {
            GitHubError::InvalidInput(format!("issue number {} is out of range", scope.number))
        })?;
        let variables = IssueCommentsVariables {
            owner: scope.owner.clone(),
            name: scope.repo.clone(),
            issue_number,
            page_size,
            cursor: cursor.map(str::to_string),
        };

        let response: GraphQlResponse<IssueCommentsData> = self
            .client
            .graphql_response(ISSUE_COMMENTS_QUERY, variables)
            .await?;
        // Logged before errors are checked, so a failing page still reports it
        if let Some(rate_limit) = response.rate_limit() {
            debug!("{}", rate_limit.summary(ISSUE_COMMENT_TABLE));
        }
        let data = response.into_result()?;

        let repository = data.repository.ok_or_else(|| {
            GitHubError::NotFound(format!("repository {}", scope.full_name()))
        })?;
        let issue = repository.issue.ok_or_else(|| {
            GitHubError::NotFound(format!("issue {}#{}", scope.full_name(), scope.number))
        })?;

        Ok(Page {
            nodes: issue.comments.nodes,
            page_info: issue.comments.page_info,
            total_count: issue.comments.total_count,
            rate_limit: data.rate_limit,
        })
    }
}

/// Stream comments as they arrive. Dropping the stream stops the fetch.
pub(crate) fn list_issue_comments(
    client: GitHubClient,
    scope: IssueScope,
    page_size: u32,
    budget: Arc<QueryBudget>,
) -> AsyncStream<GitHubResult<IssueComment>> {
    stream_pages(IssueCommentPages::new(client), scope, page_size, budget)
}

/// Fetch `totalCount` with a single one-node page.
pub(crate) fn issue_comment_count(
    client: GitHubClient,
    scope: IssueScope,
) -> AsyncTask<GitHubResult<u64>> {
    spawn_task(async move {
        let page = IssueCommentPages::new(client)
            .fetch_page(&scope, 1, None)
            .await?;
        Ok(page.total_count)
    })
}
