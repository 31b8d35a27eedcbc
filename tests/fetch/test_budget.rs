//! Tests for the row budget and cancellation object.

use github_comment_table::QueryBudget;
use tokio_util::sync::CancellationToken;

#[test]
fn test_unlimited_budget_never_exhausts() {
    let budget = QueryBudget::unlimited();
    for _ in 0..1000 {
        budget.record_row();
    }
    assert_eq!(budget.rows_remaining(), None);
    assert!(!budget.is_exhausted());
    assert_eq!(budget.rows_emitted(), 1000);
}

#[test]
fn test_limited_budget_counts_down() {
    let budget = QueryBudget::with_limit(2);
    assert_eq!(budget.rows_remaining(), Some(2));
    budget.record_row();
    assert_eq!(budget.rows_remaining(), Some(1));
    budget.record_row();
    assert!(budget.is_exhausted());
    budget.record_row();
    assert_eq!(budget.rows_remaining(), Some(0));
}

#[test]
fn test_cancel_through_parent_token() {
    let parent = CancellationToken::new();
    let budget = QueryBudget::unlimited().with_cancellation(parent.child_token());
    assert!(!budget.is_cancelled());
    parent.cancel();
    assert!(budget.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_future_resolves() {
    let budget = QueryBudget::with_limit(10);
    budget.cancel();
    budget.cancelled().await;
    assert!(budget.is_cancelled());
}
