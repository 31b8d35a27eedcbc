//! Host-facing table surface
//!
//! Static column mapping, qualifier parsing and the list function that feeds
//! rows from the paginated fetcher to a [`RowSink`].

pub mod columns;
pub mod issue_comment;
pub mod qualifiers;

pub use columns::{
    Column, ColumnType, CommentRow, Row, convert_timestamp, project_row, select_columns,
    shared_comment_columns,
};
pub use issue_comment::{RowSink, TableDefinition, list_issue_comment_rows};
pub use qualifiers::{Qualifiers, parse_repo_full_name};
