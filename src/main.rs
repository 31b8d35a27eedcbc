//! Command-line host for the github_issue_comment table.
//!
//! Lists the comments of one issue as JSON lines on stdout. Ctrl-C cancels the
//! query between (or during) page fetches.

use std::io::{BufWriter, Stdout, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use github_comment_table::table::{Row, RowSink, select_columns};
use github_comment_table::{
    IssueCommentPages, PluginConfig, Qualifiers, QueryBudget, TableDefinition,
    list_issue_comment_rows,
};
use log::{debug, info};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "github-comment-table")]
#[command(about = "List GitHub issue comments as table rows")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Repository full name (owner/repo)
    #[arg(short, long, required_unless_present = "schema")]
    repo: Option<String>,
    /// Issue number
    #[arg(short, long, required_unless_present = "schema")]
    number: Option<u64>,
    /// Stop after this many rows
    #[arg(short, long)]
    limit: Option<u64>,
    /// Comments requested per page (clamped to 1..=100)
    #[arg(long)]
    page_size: Option<u32>,
    /// Only output these columns, comma separated
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,
    /// Print the table schema and exit
    #[arg(long)]
    schema: bool,
    /// Print the issue's total comment count and exit
    #[arg(long, conflicts_with = "schema")]
    count: bool,
}

/// Writes each row as one JSON object per line.
struct JsonLines {
    out: BufWriter<Stdout>,
}

impl RowSink for JsonLines {
    fn push(&mut self, row: Row) -> ControlFlow<()> {
        let written = serde_json::to_writer(&mut self.out, &row)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        match written {
            Ok(()) => ControlFlow::Continue(()),
            // Downstream closed (e.g. piped into `head`)
            Err(_) => ControlFlow::Break(()),
        }
    }
}

fn print_schema(table: &TableDefinition) {
    println!("{}: {}", table.name, table.description);
    println!("key columns: {}", table.key_columns.join(", "));
    for column in &table.columns {
        println!(
            "  {:<24} {:<10} {}",
            column.name,
            column.kind.as_str(),
            column.description
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = PluginConfig::load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    let mut table = TableDefinition::github_issue_comment().ignore_not_found(config.ignore_not_found);
    if !cli.columns.is_empty() {
        let selected = select_columns(&table.columns, &cli.columns)
            .map_err(|name| anyhow::anyhow!("Unknown column `{name}`"))?;
        table = table.with_columns(selected);
    }

    if cli.schema {
        print_schema(&table);
        return Ok(());
    }

    let (Some(repo), Some(number)) = (cli.repo, cli.number) else {
        bail!("--repo and --number are required");
    };
    let quals = Qualifiers::new()
        .with("repository_full_name", repo)
        .with("number", number);

    let client = config
        .client_builder()
        .and_then(|builder| builder.build())
        .context("Failed to create GitHub client")?;

    if cli.count {
        let scope = table.issue_scope(&quals)?;
        let total = client
            .issue_comment_count(scope)
            .await
            .context("Count task was dropped")??;
        println!("{total}");
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let budget = match cli.limit {
        Some(limit) => QueryBudget::with_limit(limit),
        None => QueryBudget::unlimited(),
    }
    .with_cancellation(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling query");
            cancel.cancel();
        }
    });

    let page_size = cli
        .page_size
        .map_or(config.max_page_size, |p| p.min(config.max_page_size));
    let source = IssueCommentPages::new(client);
    let mut sink = JsonLines {
        out: BufWriter::new(std::io::stdout()),
    };

    let summary = list_issue_comment_rows(&source, &table, &quals, page_size, &budget, &mut sink)
        .await
        .context("Failed to list issue comments")?;
    sink.out.flush().context("Failed to flush output")?;

    debug!("{summary:?}");
    Ok(())
}
