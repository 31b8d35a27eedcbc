//! Configuration for the comment table

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::fetch::MAX_PAGE_SIZE;
use crate::github::client::GitHubClientBuilder;
use crate::github::error::{GitHubError, GitHubResult};

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Environment variable holding the API base URI (GitHub Enterprise).
pub const BASE_URL_ENV: &str = "GITHUB_BASE_URL";

/// Connection and paging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    pub token: Option<String>,
    pub base_uri: Option<String>,
    pub max_page_size: u32,
    pub request_timeout_secs: u64,
    pub ignore_not_found: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_uri: None,
            max_page_size: MAX_PAGE_SIZE,
            request_timeout_secs: 30,
            ignore_not_found: true,
        }
    }
}

impl PluginConfig {
    /// Parse TOML text and validate it.
    pub fn from_toml(text: &str) -> GitHubResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| GitHubError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` (defaults when `None`), then apply environment overrides.
    pub async fn load(path: Option<&Path>) -> GitHubResult<Self> {
        let mut config = match path {
            Some(path) => {
                let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                    GitHubError::Config(format!("reading {}: {e}", path.display()))
                })?;
                Self::from_toml(&text)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override file values with `GITHUB_TOKEN` / `GITHUB_BASE_URL` when set.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        if let Some(uri) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            self.base_uri = Some(uri);
        }
    }

    pub fn validate(&self) -> GitHubResult<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.max_page_size) {
            return Err(GitHubError::Config(format!(
                "max_page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.max_page_size
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(GitHubError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Client builder with token, base URI and timeout applied.
    pub fn client_builder(&self) -> GitHubResult<GitHubClientBuilder> {
        let token = self.token.clone().ok_or(GitHubError::AuthRequired)?;
        let mut builder = GitHubClientBuilder::new()
            .personal_token(token)
            .timeout(self.request_timeout());
        if let Some(uri) = &self.base_uri {
            builder = builder.base_uri(uri.clone());
        }
        Ok(builder)
    }
}
