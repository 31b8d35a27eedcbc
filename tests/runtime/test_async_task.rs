//! Tests for async task runtime primitives.

use futures::StreamExt;
use github_comment_table::github::spawn_task;
use github_comment_table::runtime::{AsyncStream, AsyncTask};
use tokio::sync::{mpsc, oneshot};

#[tokio::test]
async fn test_async_task_spawn_async() {
    let task = AsyncTask::spawn_async(async { 42 });
    let result = task.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_spawn_task_helper() {
    let task = spawn_task(async { "done".to_string() });
    assert_eq!(task.await.unwrap(), "done");
}

#[tokio::test]
async fn test_async_task_sender_dropped() {
    let (tx, rx) = oneshot::channel::<i32>();
    drop(tx);
    assert!(AsyncTask::new(rx).await.is_err());
}

#[tokio::test]
async fn test_async_stream_forwards_in_order() {
    let (tx, rx) = mpsc::channel(4);
    let mut stream = AsyncStream::new(rx);
    for i in 1..=3 {
        tx.send(i).await.unwrap();
    }
    drop(tx);

    assert_eq!(stream.next().await, Some(1));
    assert_eq!(stream.next().await, Some(2));
    assert_eq!(stream.next().await, Some(3));
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn test_full_stream_holds_back_producer() {
    let (tx, rx) = mpsc::channel(1);
    let mut stream = AsyncStream::new(rx);
    tx.send(1).await.unwrap();
    assert!(tx.try_send(2).is_err());

    assert_eq!(stream.next().await, Some(1));
    assert!(tx.try_send(2).is_ok());
}

#[tokio::test]
async fn test_dropped_stream_fails_sends() {
    let (tx, rx) = mpsc::channel::<u8>(1);
    drop(AsyncStream::new(rx));
    assert!(tx.send(1).await.is_err());
}
