//! Tests for GraphQL envelopes and the issue comments response shape.

use github_comment_table::GitHubError;
use github_comment_table::github::graphql::{
    GraphQlResponse, ISSUE_COMMENTS_QUERY, IssueCommentsData, IssueCommentsVariables,
};
use serde::de::DeserializeOwned;
use serde_json::json;

fn parse(value: serde_json::Value) -> GraphQlResponse<IssueCommentsData> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_query_declares_variables() {
    for var in ["$owner", "$name", "$issueNumber", "$pageSize", "$cursor"] {
        assert!(ISSUE_COMMENTS_QUERY.contains(var), "missing {var}");
    }
    assert!(ISSUE_COMMENTS_QUERY.contains("comments(first: $pageSize, after: $cursor)"));
}

#[test]
fn test_variables_serialize_camel_case() {
    let vars = IssueCommentsVariables {
        owner: "octocat".to_string(),
        name: "hello-world".to_string(),
        issue_number: 42,
        page_size: 100,
        cursor: None,
    };
    assert_eq!(
        serde_json::to_value(&vars).unwrap(),
        json!({
            "owner": "octocat",
            "name": "hello-world",
            "issueNumber": 42,
            "pageSize": 100,
            "cursor": null
        })
    );
}

#[test]
fn test_page_response() {
    let response = parse(json!({
        "data": {
            "rateLimit": {
                "limit": 5000, "cost": 1, "remaining": 4990, "used": 10,
                "resetAt": "2024-05-01T12:00:00Z", "nodeCount": 100
            },
            "repository": {
                "issue": {
                    "comments": {
                        "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29yOjE=" },
                        "totalCount": 2,
                        "nodes": [
                            {
                                "id": 11, "nodeId": "IC_1",
                                "author": { "login": "octocat", "avatarUrl": null, "url": "https://github.com/octocat" },
                                "authorAssociation": "OWNER",
                                "body": "first", "bodyText": "first",
                                "createdAt": "2024-04-30T08:00:00Z",
                                "createdViaEmail": false,
                                "editor": null,
                                "includesCreatedEdit": false,
                                "isMinimized": false, "minimizedReason": null,
                                "lastEditedAt": null, "publishedAt": "2024-04-30T08:00:00Z",
                                "updatedAt": "2024-04-30T08:00:00Z",
                                "url": "https://github.com/octocat/hello-world/issues/42#issuecomment-11",
                                "canDelete": true, "canMinimize": true, "canReact": true, "canUpdate": true,
                                "cannotUpdateReasons": [], "didAuthor": true
                            },
                            { "id": 12, "nodeId": "IC_2", "author": null, "body": "ghost" }
                        ]
                    }
                }
            }
        }
    }));

    let data = response.into_result().unwrap();
    let rate_limit = data.rate_limit.unwrap();
    assert_eq!(rate_limit.remaining, 4990);
    assert_eq!(rate_limit.node_count, 100);

    let comments = data.repository.unwrap().issue.unwrap().comments;
    assert!(comments.page_info.has_next_page);
    assert_eq!(comments.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjE="));
    assert_eq!(comments.total_count, 2);
    assert_eq!(comments.nodes.len(), 2);

    let first = &comments.nodes[0];
    assert_eq!(first.id, Some(11));
    assert_eq!(first.author.as_ref().unwrap().login, "octocat");
    assert!(first.did_author);
    assert!(first.last_edited_at.is_none());

    let second = &comments.nodes[1];
    assert_eq!(second.node_id, "IC_2");
    assert!(second.author.is_none());
    assert!(!second.can_delete);
}

#[test]
fn test_missing_repository_is_null() {
    let response = parse(json!({ "data": { "repository": null } }));
    assert!(response.into_result().unwrap().repository.is_none());
}

#[test]
fn test_not_found_error() {
    let response = parse(json!({
        "data": { "repository": null },
        "errors": [{
            "type": "NOT_FOUND",
            "path": ["repository"],
            "message": "Could not resolve to a Repository with the name 'octocat/nope'."
        }]
    }));
    let err = response.into_result().unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("octocat/nope"));
}

#[test]
fn test_rate_limited_error() {
    let response = parse(json!({
        "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
    }));
    assert!(matches!(
        response.into_result(),
        Err(GitHubError::RateLimitExceeded)
    ));
}

#[test]
fn test_other_errors_are_collected() {
    let response = parse(json!({
        "errors": [
            { "message": "Field 'nope' doesn't exist on type 'Issue'" },
            { "type": "INTERNAL", "message": "Something went wrong" }
        ]
    }));
    match response.into_result() {
        Err(GitHubError::GraphQl(messages)) => assert_eq!(messages.len(), 2),
        other => panic!("expected GraphQL error, got {other:?}"),
    }
}

#[test]
fn test_missing_data_is_api_error() {
    let response = parse(json!({}));
    assert!(matches!(response.into_result(), Err(GitHubError::Api(_))));
}

/// Unwraps an envelope under the same bounds `GitHubClient::graphql` uses.
fn unwrap_envelope<R: DeserializeOwned>(value: serde_json::Value) -> Result<R, GitHubError> {
    let response: GraphQlResponse<R> = serde_json::from_value(value).unwrap();
    response.into_result()
}

#[test]
fn test_envelope_without_data_key() {
    let result: Result<IssueCommentsData, _> =
        unwrap_envelope(json!({ "extensions": { "cost": 1 } }));
    assert!(matches!(result, Err(GitHubError::Api(_))));
}

#[test]
fn test_envelope_with_data_for_any_deserializable_type() {
    let count: u64 = unwrap_envelope(json!({ "data": 7 })).unwrap();
    assert_eq!(count, 7);
}

#[test]
fn test_rate_limit_survives_errors() {
    let response = parse(json!({
        "data": {
            "rateLimit": {
                "limit": 5000, "cost": 1, "remaining": 4321,
                "used": 679, "resetAt": "2024-01-01T00:00:00Z", "nodeCount": 1
            },
            "repository": null
        },
        "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a Repository" }]
    }));

    assert_eq!(response.rate_limit().map(|r| r.remaining), Some(4321));
    assert!(response.into_result().unwrap_err().is_not_found());
}

#[test]
fn test_rate_limit_absent_without_data() {
    let response = parse(json!({
        "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
    }));
    assert!(response.rate_limit().is_none());
}
