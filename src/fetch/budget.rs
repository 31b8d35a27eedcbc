//! Row budget and cancellation for a single query.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Remaining-row budget and cancellation signal owned by the caller.
///
/// The host records rows as it accepts them; the fetch loop only queries.
#[derive(Debug, Default)]
pub struct QueryBudget {
    limit: Option<u64>,
    emitted: AtomicU64,
    cancel: CancellationToken,
}

impl QueryBudget {
    /// No row limit.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Stop after `limit` rows have been recorded.
    #[must_use]
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Use an existing cancellation token, e.g. a child of a server-wide one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Count one row as delivered to the caller.
    pub fn record_row(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn rows_emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    /// `None` when unlimited.
    #[must_use]
    pub fn rows_remaining(&self) -> Option<u64> {
        self.limit
            .map(|limit| limit.saturating_sub(self.rows_emitted()))
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.rows_remaining() == Some(0)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once [`QueryBudget::cancel`] (or the parent token) fires.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancel.cancelled()
    }
}
