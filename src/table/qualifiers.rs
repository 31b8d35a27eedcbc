//! Equality qualifiers supplied with a query.

use std::collections::BTreeMap;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::github::error::{GitHubError, GitHubResult};

lazy_static! {
    // Owner: alphanumerics and single hyphens. Repo: alphanumerics, `.`, `_`, `-`.
    static ref REPO_FULL_NAME: Result<Regex, regex::Error> =
        Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)/([A-Za-z0-9._-]+)$");
}

/// `column = value` constraints, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    values: BTreeMap<String, String>,
}

impl Qualifiers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a qualifier.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(column.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// String value of a required qualifier.
    pub fn string(&self, column: &str) -> GitHubResult<&str> {
        self.values
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| GitHubError::InvalidInput(format!("missing qualifier `{column}`")))
    }

    /// Integer value of a required qualifier.
    pub fn int(&self, column: &str) -> GitHubResult<u64> {
        let raw = self.string(column)?;
        raw.trim().parse::<u64>().map_err(|_| {
            GitHubError::InvalidInput(format!("qualifier `{column}` is not a number: {raw}"))
        })
    }
}

impl FromStr for Qualifiers {
    type Err = GitHubError;

    /// Parse `key=value` pairs separated by commas or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut quals = Qualifiers::new();
        for pair in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                GitHubError::InvalidInput(format!("qualifier `{pair}` is not key=value"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(GitHubError::InvalidInput(format!(
                    "qualifier `{pair}` has an empty column name"
                )));
            }
            quals.values.insert(key.to_string(), value.trim().to_string());
        }
        Ok(quals)
    }
}

/// Split `owner/repo` into its two halves.
pub fn parse_repo_full_name(full_name: &str) -> GitHubResult<(String, String)> {
    let pattern = REPO_FULL_NAME
        .as_ref()
        .map_err(|e| GitHubError::InvalidInput(format!("repository name pattern: {e}")))?;
    let caps = pattern.captures(full_name.trim()).ok_or_else(|| {
        GitHubError::InvalidInput(format!(
            "repository_full_name must look like owner/repo, got `{full_name}`"
        ))
    })?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}
