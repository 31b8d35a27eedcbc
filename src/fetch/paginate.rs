//! Cursor pagination loop shared by every paged GraphQL connection.

use std::future::Future;
use std::ops::ControlFlow;

use log::{debug, error};

use crate::fetch::budget::QueryBudget;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::RateLimit;

/// GitHub caps `first:` on GraphQL connections at 100.
pub const MAX_PAGE_SIZE: u32 = 100;

/// `pageInfo` of a GraphQL connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One fetched page of a connection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
    pub total_count: u64,
    pub rate_limit: Option<RateLimit>,
}

/// A remote paged collection.
///
/// Implementations issue exactly one remote call per `fetch_page` and do not
/// retry; the loop in [`paginate`] owns the cursor.
pub trait PageSource: Send + Sync {
    /// Parent identifier of the collection.
    type Scope: Send + Sync;
    /// Record type of the collection.
    type Item: Send;

    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    fn fetch_page(
        &self,
        scope: &Self::Scope,
        page_size: u32,
        cursor: Option<&str>,
    ) -> impl Future<Output = GitHubResult<Page<Self::Item>>> + Send;
}

/// Why the loop ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The last page reported no next page.
    Exhausted,
    /// The consumer asked to stop or the row budget ran out.
    Stopped,
}

/// What a completed fetch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub pages: u32,
    pub rows: u64,
    pub total_count: Option<u64>,
    pub outcome: FetchOutcome,
}

impl FetchSummary {
    /// Summary of a fetch that produced nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pages: 0,
            rows: 0,
            total_count: None,
            outcome: FetchOutcome::Exhausted,
        }
    }
}

/// Clamp a requested page size to `[1, max]`, then to the remaining rows when
/// that is known, non-zero and smaller.
#[must_use]
pub fn adjust_page_size(max: u32, hint: u32, rows_remaining: Option<u64>) -> u32 {
    let size = hint.clamp(1, max.max(1));
    match rows_remaining {
        Some(remaining) if remaining > 0 && remaining < u64::from(size) => remaining as u32,
        _ => size,
    }
}

/// Page through `source` for `scope`, handing each record to `consumer`.
///
/// Records arrive in page order, then server order within a page. After every
/// record the consumer's flow and `budget` are checked; either can end the
/// fetch early with [`FetchOutcome::Stopped`]. Remote errors end the fetch and
/// are returned unchanged, after any records already delivered.
pub async fn paginate<P, F>(
    source: &P,
    scope: &P::Scope,
    page_size_hint: u32,
    budget: &QueryBudget,
    mut consumer: F,
) -> GitHubResult<FetchSummary>
where
    P: PageSource,
    F: FnMut(P::Item) -> ControlFlow<()>,
{
    paginate_async(source, scope, page_size_hint, budget, |item| {
        std::future::ready(consumer(item))
    })
    .await
}

/// [`paginate`] with a consumer that may wait, e.g. on a bounded channel.
///
/// The next page is not requested until the consumer has settled the last
/// record of the current one.
pub async fn paginate_async<P, F, Fut>(
    source: &P,
    scope: &P::Scope,
    page_size_hint: u32,
    budget: &QueryBudget,
    mut consumer: F,
) -> GitHubResult<FetchSummary>
where
    P: PageSource,
    F: FnMut(P::Item) -> Fut,
    Fut: Future<Output = ControlFlow<()>>,
{
    let table = source.name();
    let page_size = adjust_page_size(MAX_PAGE_SIZE, page_size_hint, budget.rows_remaining());
    let mut cursor: Option<String> = None;
    let mut summary = FetchSummary::empty();

    loop {
        if budget.is_cancelled() {
            debug!("{table} fetch cancelled after {} pages", summary.pages);
            return Err(GitHubError::Cancelled);
        }
        if budget.is_exhausted() {
            summary.outcome = FetchOutcome::Stopped;
            debug!("{table} row budget spent before page {}", summary.pages + 1);
            return Ok(summary);
        }

        let result = tokio::select! {
            biased;
            () = budget.cancelled() => return Err(GitHubError::Cancelled),
            result = source.fetch_page(scope, page_size, cursor.as_deref()) => result,
        };
        summary.pages += 1;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                error!("{table} api_error on page {}: {e}", summary.pages);
                return Err(e);
            }
        };
        summary.total_count = Some(page.total_count);

        for node in page.nodes {
            summary.rows += 1;
            let flow = consumer(node).await;
            if flow.is_break() || budget.is_exhausted() {
                summary.outcome = FetchOutcome::Stopped;
                debug!("{table} stopped early: {summary:?}");
                return Ok(summary);
            }
        }

        if !page.page_info.has_next_page {
            summary.outcome = FetchOutcome::Exhausted;
            debug!("{table} exhausted: {summary:?}");
            return Ok(summary);
        }

        match page.page_info.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Err(GitHubError::Api(format!(
                    "{table}: page {} reported a next page without an end cursor",
                    summary.pages
                )));
            }
        }
    }
}
