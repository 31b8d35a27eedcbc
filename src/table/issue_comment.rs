//! `github_issue_comment`: comments on one issue.

use std::ops::ControlFlow;

use log::warn;

use crate::fetch::{FetchSummary, PageSource, QueryBudget, paginate};
use crate::github::error::GitHubResult;
use crate::github::list_issue_comments::ISSUE_COMMENT_TABLE;
use crate::github::models::{IssueComment, IssueScope};
use crate::table::columns::{Column, CommentRow, Row, project_row, shared_comment_columns};
use crate::table::qualifiers::{Qualifiers, parse_repo_full_name};

/// Receives rows from a table's list function.
pub trait RowSink {
    /// Accept one row; `Break` asks the fetch to stop.
    fn push(&mut self, row: Row) -> ControlFlow<()>;
}

impl RowSink for Vec<Row> {
    fn push(&mut self, row: Row) -> ControlFlow<()> {
        Vec::push(self, row);
        ControlFlow::Continue(())
    }
}

/// Name, schema and list policy of a table.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// Qualifiers that must all be present to list the table.
    pub key_columns: &'static [&'static str],
    pub columns: Vec<Column>,
    /// Treat a missing repository or issue as an empty result.
    pub ignore_not_found: bool,
}

impl TableDefinition {
    #[must_use]
    pub fn github_issue_comment() -> Self {
        Self {
            name: ISSUE_COMMENT_TABLE,
            description: "GitHub Issue Comments are the responses/comments on GitHub Issues.",
            key_columns: &["repository_full_name", "number"],
            columns: shared_comment_columns(),
            ignore_not_found: true,
        }
    }

    #[must_use]
    pub fn ignore_not_found(mut self, ignore: bool) -> Self {
        self.ignore_not_found = ignore;
        self
    }

    /// Replace the projected columns, e.g. with a subset.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Issue scope named by the key-column qualifiers.
    pub fn issue_scope(&self, quals: &Qualifiers) -> GitHubResult<IssueScope> {
        let full_name = quals.string("repository_full_name")?;
        let number = quals.int("number")?;
        let (owner, repo) = parse_repo_full_name(full_name)?;
        Ok(IssueScope::new(owner, repo, number))
    }
}

/// List the rows of `table` for `quals` into `sink`.
///
/// Each row pushed is recorded against `budget`. Rows delivered before a
/// failure stay delivered; a not-found failure ends the listing successfully
/// when the table ignores not-found.
pub async fn list_issue_comment_rows<P, S>(
    source: &P,
    table: &TableDefinition,
    quals: &Qualifiers,
    page_size_hint: u32,
    budget: &QueryBudget,
    sink: &mut S,
) -> GitHubResult<FetchSummary>
where
    P: PageSource<Scope = IssueScope, Item = IssueComment>,
    S: RowSink + ?Sized,
{
    let scope = table.issue_scope(quals)?;
    let full_name = scope.full_name();
    let mut pushed = 0;

    let result = paginate(source, &scope, page_size_hint, budget, |comment| {
        let row = project_row(
            &table.columns,
            &CommentRow {
                repository_full_name: &full_name,
                number: scope.number,
                comment: &comment,
            },
        );
        budget.record_row();
        pushed += 1;
        sink.push(row)
    })
    .await;

    match result {
        Err(e) if table.ignore_not_found && e.is_not_found() => {
            warn!(
                "{} {full_name}#{}: {e}, ending after {pushed} rows",
                table.name, scope.number
            );
            Ok(FetchSummary {
                rows: pushed,
                ..FetchSummary::empty()
            })
        }
        other => other,
    }
}
