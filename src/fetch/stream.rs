//! Channel-backed streaming on top of [`paginate_async`].

use std::ops::ControlFlow;
use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use crate::fetch::budget::QueryBudget;
use crate::fetch::paginate::{PageSource, paginate_async};
use crate::github::error::GitHubResult;
use crate::runtime::AsyncStream;

/// Records buffered between the fetch task and the reader.
const STREAM_BUFFER: usize = 1;

/// Run [`paginate_async`] on a background task and hand records out as a stream.
///
/// The channel holds a single record, so the fetch task stays at most one
/// record ahead of the reader and never requests a page while a send is
/// waiting. Each record is counted against `budget` once it is queued. A
/// failed fetch ends the stream with its error. Dropping the stream stops the
/// fetch at the next send, without further requests.
pub fn stream_pages<P>(
    source: P,
    scope: P::Scope,
    page_size: u32,
    budget: Arc<QueryBudget>,
) -> AsyncStream<GitHubResult<P::Item>>
where
    P: PageSource + 'static,
    P::Scope: 'static,
    P::Item: 'static,
{
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);

    tokio::spawn(async move {
        let sender = &tx;
        let budget = budget.as_ref();
        let result = paginate_async(&source, &scope, page_size, budget, move |item| async move {
            if sender.send(Ok(item)).await.is_err() {
                return ControlFlow::Break(()); // Receiver dropped
            }
            budget.record_row();
            ControlFlow::Continue(())
        })
        .await;

        match result {
            Ok(summary) => debug!("{} stream finished: {summary:?}", source.name()),
            Err(e) => {
                let _ = tx.send(Err(e)).await;
            }
        }
    });

    AsyncStream::new(rx)
}
