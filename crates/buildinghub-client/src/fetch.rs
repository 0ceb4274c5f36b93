//! Fetches scoped to the lifetime of a view.
//!
//! A [`ViewFetch`] runs one request on a tokio runtime and hands the result
//! back over a channel that the UI loop polls. Dropping the fetch aborts the
//! request, so a view that is torn down never receives a late result.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{ClientError, Result};

/// State of a fetch when polled.
#[derive(Debug)]
pub enum FetchPoll<T> {
    /// Still running.
    Pending,
    /// Finished. Returned once; later polls report `Pending`.
    Ready(Result<T>),
}

/// A cancelable, view-owned request.
#[derive(Debug)]
pub struct ViewFetch<T> {
    task: JoinHandle<()>,
    rx: Receiver<Result<T>>,
    done: bool,
}

impl<T: Send + 'static> ViewFetch<T> {
    /// Run `request` on `runtime`.
    pub fn spawn<F>(runtime: &Handle, label: &'static str, request: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let task = runtime.spawn(async move {
            let result = request.await;
            if tx.send(result).is_err() {
                debug!(fetch = label, "View gone, result discarded");
            }
        });
        Self {
            task,
            rx,
            done: false,
        }
    }
}

impl<T> ViewFetch<T> {
    /// Check for a result without blocking.
    pub fn poll(&mut self) -> FetchPoll<T> {
        if self.done {
            return FetchPoll::Pending;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.done = true;
                FetchPoll::Ready(result)
            }
            Err(TryRecvError::Empty) => FetchPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                self.done = true;
                FetchPoll::Ready(Err(ClientError::Cancelled))
            }
        }
    }

    /// Whether a result has already been taken.
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<T> Drop for ViewFetch<T> {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Aborting in-flight fetch");
        }
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    async fn wait<T>(fetch: &mut ViewFetch<T>) -> Result<T> {
        for _ in 0..200 {
            if let FetchPoll::Ready(result) = fetch.poll() {
                return result;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("fetch did not complete");
    }

    #[tokio::test]
    async fn test_result_is_delivered_once() {
        let mut fetch = ViewFetch::spawn(&Handle::current(), "test", async { Ok(42u32) });
        assert_eq!(wait(&mut fetch).await.unwrap(), 42);
        assert!(fetch.is_done());
        assert!(matches!(fetch.poll(), FetchPoll::Pending));
    }

    #[tokio::test]
    async fn test_error_is_delivered() {
        let mut fetch: ViewFetch<()> = ViewFetch::spawn(&Handle::current(), "test", async {
            Err(ClientError::Status {
                url: "http://x/api/issues".into(),
                status: 500,
            })
        });
        assert!(matches!(
            wait(&mut fetch).await,
            Err(ClientError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_drop_aborts_request() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let fetch = ViewFetch::spawn(&Handle::current(), "slow", async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        drop(fetch);
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
