//! Tests for GitHub error classification.

use github_comment_table::GitHubError;

#[test]
fn test_not_found_detection() {
    assert!(GitHubError::NotFound("repo".to_string()).is_not_found());
    assert!(!GitHubError::Api("404 in the message".to_string()).is_not_found());
    assert!(!GitHubError::Cancelled.is_not_found());
    assert!(!GitHubError::RateLimitExceeded.is_not_found());
}

#[test]
fn test_error_display() {
    assert_eq!(
        GitHubError::GraphQl(vec!["first".to_string(), "second".to_string()]).to_string(),
        "GraphQL error: first; second"
    );
    assert_eq!(GitHubError::Cancelled.to_string(), "Fetch cancelled");
    assert_eq!(
        GitHubError::Api("bad gateway".to_string()).to_string(),
        "GitHub API error: bad gateway"
    );
}
