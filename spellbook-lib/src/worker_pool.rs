//! Bounded pool of tokio tasks for concurrent downloads.
//!
//! Work items go through a bounded `async-channel`, whose `Receiver` is
//! `Clone`, so every worker pulls from its own handle. Results come back on
//! an unbounded tokio channel.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Default per-item limit. An item that runs longer is dropped without a
/// result and its worker moves on.
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(60);

/// A fixed set of workers processing one batch of items.
///
/// ```ignore
/// let mut pool = WorkerPool::start(4, ids, |id| async move { fetch(id).await });
/// while let Some(result) = pool.recv().await {
///     record(result);
/// }
/// ```
pub struct WorkerPool<R: Send + 'static> {
    results: mpsc::UnboundedReceiver<R>,
    _workers: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// Spawn `workers` tasks and feed them `items`, with the default timeout.
    pub fn start<W, F, Fut>(workers: usize, items: Vec<W>, process: F) -> Self
    where
        W: Send + 'static,
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self::start_with_timeout(workers, DEFAULT_ITEM_TIMEOUT, items, process)
    }

    /// Spawn `workers` tasks and feed them `items`.
    ///
    /// The work channel holds at most `workers` pending items, so the feeder
    /// task waits while every worker is busy. Must be called inside a tokio
    /// runtime.
    pub fn start_with_timeout<W, F, Fut>(
        workers: usize,
        item_timeout: Duration,
        items: Vec<W>,
        process: F,
    ) -> Self
    where
        W: Send + 'static,
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let workers = workers.max(1);
        let (work_tx, work_rx) = async_channel::bounded::<W>(workers);
        let (result_tx, results) = mpsc::unbounded_channel::<R>();
        let process = Arc::new(process);

        let handles = (0..workers)
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process = Arc::clone(&process);
                tokio::spawn(async move {
                    while let Ok(item) = work_rx.recv().await {
                        match tokio::time::timeout(item_timeout, process(item)).await {
                            Ok(result) => {
                                if result_tx.send(result).is_err() {
                                    break;
                                }
                            }
                            Err(_) => log::warn!(
                                "Work item timed out after {}s, skipping",
                                item_timeout.as_secs()
                            ),
                        }
                    }
                })
            })
            .collect();

        // Workers hold the only senders; the result channel closes when they exit.
        drop(result_tx);

        tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        Self {
            results,
            _workers: handles,
        }
    }

    /// Next finished result, or `None` once every worker has exited.
    pub async fn recv(&mut self) -> Option<R> {
        self.results.recv().await
    }
}
