//! Async task and stream handles for GitHub operations.
//!
//! Channel-based: a spawned tokio task produces, the handle consumes.

use futures::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::ReceiverStream;

// ============================================================================
// AsyncTask - Single-result async operation
// ============================================================================

/// A handle to an asynchronous task that produces a single result.
///
/// Uses oneshot channel internally for efficient one-time communication.
pub struct AsyncTask<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> AsyncTask<T>
where
    T: Send + 'static,
{
    /// Create from oneshot receiver (for advanced use).
    #[inline]
    #[must_use]
    pub fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Spawn an async operation on the current tokio runtime.
    #[inline]
    pub fn spawn_async<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn(async move {
            let _ = tx.send(future.await);
        });
        Self::new(rx)
    }
}

impl<T> Future for AsyncTask<T> {
    type Output = Result<T, oneshot::error::RecvError>;

    #[inline]
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx)
    }
}

// ============================================================================
// AsyncStream - Multi-result streaming operation
// ============================================================================

/// A handle to an asynchronous stream that produces multiple results.
///
/// Backed by a bounded channel, so a producer waits for the consumer once the
/// buffer is full. Dropping the handle closes the channel, which producers
/// observe as a failed send.
pub struct AsyncStream<T> {
    inner: ReceiverStream<T>,
}

impl<T> AsyncStream<T> {
    /// Create from a bounded receiver.
    #[inline]
    #[must_use]
    pub fn new(rx: mpsc::Receiver<T>) -> Self {
        Self {
            inner: ReceiverStream::new(rx),
        }
    }
}

impl<T> Stream for AsyncStream<T> {
    type Item = T;

    #[inline]
    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
