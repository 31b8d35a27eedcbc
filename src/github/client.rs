//! GitHub API client wrapper
//!
//! Provides a clean GraphQL API for the comment table without exposing Octocrab.
//!
//! # Examples
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use github_comment_table::{GitHubClient, IssueScope, QueryBudget};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!     let scope = IssueScope::new("rust-lang", "rust", 1);
//!
//!     let mut comments = gh.list_issue_comments(scope, 100, Arc::new(QueryBudget::with_limit(10)));
//!     while let Some(comment) = comments.next().await {
//!         println!("{}", comment?.body);
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::fetch::QueryBudget;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::graphql::{GraphQlRequest, GraphQlResponse};
use crate::github::models::{IssueComment, IssueScope};
use crate::runtime::{AsyncStream, AsyncTask};
use jsonwebtoken::EncodingKey;
use octocrab::{Octocrab, models::AppId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone), and clones may be used from many tasks at once.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with personal access token
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    /// Run one GraphQL query and unwrap its `{ data, errors }` envelope.
    pub async fn graphql<V, R>(&self, query: &str, variables: V) -> GitHubResult<R>
    where
        V: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        self.graphql_response(query, variables).await?.into_result()
    }

    /// Run one GraphQL query and return the envelope as received.
    ///
    /// Only transport failures are errors here; `errors` entries are left for
    /// the caller, which may want partial `data` such as the rate limit first.
    pub async fn graphql_response<V, R>(
        &self,
        query: &str,
        variables: V,
    ) -> GitHubResult<GraphQlResponse<R>>
    where
        V: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        self.inner
            .graphql(&GraphQlRequest { query, variables })
            .await
            .map_err(GitHubError::from)
    }

    // ========================================================================
    // Issue comments
    // ========================================================================

    /// Stream the comments of an issue, page by page, within `budget`.
    #[must_use]
    pub fn list_issue_comments(
        &self,
        scope: IssueScope,
        page_size: u32,
        budget: Arc<QueryBudget>,
    ) -> AsyncStream<GitHubResult<IssueComment>> {
        crate::github::list_issue_comments::list_issue_comments(
            self.clone(),
            scope,
            page_size,
            budget,
        )
    }

    /// Total number of comments on an issue.
    #[must_use]
    pub fn issue_comment_count(&self, scope: IssueScope) -> AsyncTask<GitHubResult<u64>> {
        crate::github::list_issue_comments::issue_comment_count(self.clone(), scope)
    }
}

/// Builder for creating `GitHubClient` with various authentication methods
pub struct GitHubClientBuilder {
    token: Option<String>,
    app_auth: Option<(AppId, String)>,
    base_uri: Option<String>,
    timeout: Option<Duration>,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            app_auth: None,
            base_uri: None,
            timeout: None,
        }
    }

    /// Set personal access token for authentication
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set GitHub App authentication (app ID and private key)
    #[must_use]
    pub fn app(mut self, app_id: AppId, private_key: impl Into<String>) -> Self {
        self.app_auth = Some((app_id, private_key.into()));
        self
    }

    /// Set base URI (for GitHub Enterprise)
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Connect and read timeout for every request
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        // Set authentication
        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        } else if let Some((app_id, private_key)) = self.app_auth {
            let key = EncodingKey::from_rsa_pem(private_key.as_bytes())
                .map_err(|e| GitHubError::ClientSetup(format!("Invalid RSA key: {e}")))?;
            builder = builder.app(app_id, key);
        }

        // Set base URI if provided
        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        if let Some(timeout) = self.timeout {
            builder = builder
                .set_connect_timeout(Some(timeout))
                .set_read_timeout(Some(timeout));
        }

        // Build Octocrab instance
        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
