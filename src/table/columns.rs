//! Column schema for comment tables.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::github::models::{Actor, IssueComment};

/// Value type a column presents to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Int,
    Bool,
    Json,
    Timestamp,
}

impl ColumnType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Int => "int",
            ColumnType::Bool => "bool",
            ColumnType::Json => "json",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

/// One comment plus the qualifiers it was fetched under.
#[derive(Debug, Clone, Copy)]
pub struct CommentRow<'a> {
    pub repository_full_name: &'a str,
    pub number: u64,
    pub comment: &'a IssueComment,
}

/// A named, typed column and how to read it from a [`CommentRow`].
#[derive(Clone)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
    pub description: &'static str,
    pub value: fn(&CommentRow<'_>) -> Value,
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Ordered column name to value map handed to the host.
pub type Row = Map<String, Value>;

/// Project `row` onto `columns`, keeping column order.
#[must_use]
pub fn project_row(columns: &[Column], row: &CommentRow<'_>) -> Row {
    columns
        .iter()
        .map(|c| (c.name.to_string(), (c.value)(row)))
        .collect()
}

/// RFC 3339 UTC string, or null when the timestamp is absent.
#[must_use]
pub fn convert_timestamp(ts: Option<DateTime<Utc>>) -> Value {
    ts.map_or(Value::Null, |t| {
        Value::String(t.to_rfc3339_opts(SecondsFormat::Secs, true))
    })
}

fn actor_json(actor: Option<&Actor>) -> Value {
    match actor {
        Some(a) if !a.login.is_empty() => json!(a),
        _ => Value::Null,
    }
}

fn actor_login(actor: Option<&Actor>) -> Value {
    actor.map_or(Value::Null, |a| json!(a.login))
}

fn optional_string(s: Option<&String>) -> Value {
    s.map_or(Value::Null, |s| json!(s))
}

macro_rules! column {
    ($name:literal, $kind:ident, $desc:literal, |$row:ident| $value:expr) => {
        Column {
            name: $name,
            kind: ColumnType::$kind,
            description: $desc,
            value: |$row: &CommentRow<'_>| $value,
        }
    };
}

/// Columns shared by every comment table (issue and pull request comments).
#[must_use]
pub fn shared_comment_columns() -> Vec<Column> {
    vec![
        column!("repository_full_name", String, "The full name of the repository (login/repo-name).", |r| json!(r.repository_full_name)),
        column!("number", Int, "The issue/pr number.", |r| json!(r.number)),
        column!("id", Int, "The ID of the comment.", |r| json!(r.comment.id)),
        column!("node_id", String, "The node ID of the comment.", |r| json!(r.comment.node_id)),
        column!("author", Json, "The actor who authored the comment.", |r| actor_json(r.comment.author.as_ref())),
        column!("author_login", String, "The login of the comment author.", |r| actor_login(r.comment.author.as_ref())),
        column!("author_association", String, "Author's association with the subject of the issue/pr the comment was raised on.", |r| json!(r.comment.author_association)),
        column!("body", String, "The contents of the comment as markdown.", |r| json!(r.comment.body)),
        column!("body_text", String, "The contents of the comment as text.", |r| json!(r.comment.body_text)),
        column!("created_at", Timestamp, "Timestamp when comment was created.", |r| convert_timestamp(r.comment.created_at)),
        column!("created_via_email", Bool, "If true, comment was created via email.", |r| json!(r.comment.created_via_email)),
        column!("editor", Json, "The actor who edited the comment.", |r| actor_json(r.comment.editor.as_ref())),
        column!("editor_login", String, "The login of the comment editor.", |r| actor_login(r.comment.editor.as_ref())),
        column!("includes_created_edit", Bool, "If true, comment was edited and includes an edit with the creation data.", |r| json!(r.comment.includes_created_edit)),
        column!("is_minimized", Bool, "If true, comment has been minimized.", |r| json!(r.comment.is_minimized)),
        column!("minimized_reason", String, "The reason for comment being minimized.", |r| optional_string(r.comment.minimized_reason.as_ref())),
        column!("last_edited_at", Timestamp, "Timestamp when comment was last edited.", |r| convert_timestamp(r.comment.last_edited_at)),
        column!("published_at", Timestamp, "Timestamp when comment was published.", |r| convert_timestamp(r.comment.published_at)),
        column!("updated_at", Timestamp, "Timestamp when comment was last updated.", |r| convert_timestamp(r.comment.updated_at)),
        column!("url", String, "URL for the comment.", |r| json!(r.comment.url)),
        column!("can_delete", Bool, "If true, user can delete the comment.", |r| json!(r.comment.can_delete)),
        column!("can_minimize", Bool, "If true, user can minimize the comment.", |r| json!(r.comment.can_minimize)),
        column!("can_react", Bool, "If true, user can react to the comment.", |r| json!(r.comment.can_react)),
        column!("can_update", Bool, "If true, user can update the comment.", |r| json!(r.comment.can_update)),
        column!("cannot_update_reasons", Json, "A list of reasons why user cannot update the comment.", |r| {
            if r.comment.cannot_update_reasons.is_empty() {
                Value::Null
            } else {
                json!(r.comment.cannot_update_reasons)
            }
        }),
        column!("did_author", Bool, "If true, user authored the comment.", |r| json!(r.comment.did_author)),
    ]
}

/// Keep only the named columns, in the order given.
///
/// Unknown names are returned as the error value.
pub fn select_columns(columns: &[Column], names: &[String]) -> Result<Vec<Column>, String> {
    names
        .iter()
        .map(|name| {
            columns
                .iter()
                .find(|c| c.name == name.as_str())
                .cloned()
                .ok_or_else(|| name.clone())
        })
        .collect()
}
