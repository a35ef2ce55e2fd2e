//! Deferred task queue standing in for the UI thread.
//!
//! Groups never run deselection callbacks inline. They push them through a
//! [`TaskSender`] and the host drains the matching [`TaskReceiver`] from its
//! UI loop, either synchronously once per tick with
//! [`TaskReceiver::run_pending`] or from an async loop with
//! [`TaskReceiver::run`].
//!
//! Tasks from one sender run in the order they were scheduled.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;
use tokio::sync::mpsc;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Errors from scheduling onto the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The receiver was dropped, nobody will run the task.
    #[error("dispatch queue closed")]
    Closed,
}

/// Sender half of the task queue.
///
/// Clone-able, one per group is typical.
#[derive(Clone)]
pub struct TaskSender {
    tx: mpsc::UnboundedSender<Task>,
    pending: Arc<AtomicUsize>,
}

impl TaskSender {
    /// Queue a task to run later on the receiving side.
    pub fn schedule<F>(&self, task: F) -> Result<(), DispatchError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.tx.send(Box::new(task)).map_err(|_| {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            DispatchError::Closed
        })
    }

    /// Whether the receiving side is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl std::fmt::Debug for TaskSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSender")
            .field("pending", &self.pending.load(Ordering::SeqCst))
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Receiver half of the task queue. Owned by the UI loop.
pub struct TaskReceiver {
    rx: mpsc::UnboundedReceiver<Task>,
    pending: Arc<AtomicUsize>,
}

impl TaskReceiver {
    /// Number of tasks queued and not yet taken.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Run every task queued at the time of the call.
    ///
    /// Tasks scheduled by those tasks wait for the next call. Returns how
    /// many tasks ran.
    pub fn run_pending(&mut self) -> usize {
        let budget = self.pending();
        let mut ran = 0;
        while ran < budget {
            match self.rx.try_recv() {
                Ok(task) => {
                    self.pending.fetch_sub(1, Ordering::SeqCst);
                    task();
                    ran += 1;
                }
                Err(_) => break,
            }
        }
        ran
    }

    /// Wait for the next task without running it.
    ///
    /// Returns `None` once every sender is dropped and the queue is empty.
    pub async fn recv(&mut self) -> Option<Task> {
        let task = self.rx.recv().await?;
        self.pending.fetch_sub(1, Ordering::SeqCst);
        Some(task)
    }

    /// Run tasks until every sender is dropped. Returns how many tasks ran.
    pub async fn run(mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.recv().await {
            task();
            ran += 1;
        }
        log::trace!("[dispatch] all senders dropped after {} tasks", ran);
        ran
    }
}

/// Create a new task queue pair.
pub fn channel() -> (TaskSender, TaskReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let pending = Arc::new(AtomicUsize::new(0));
    (
        TaskSender {
            tx,
            pending: Arc::clone(&pending),
        },
        TaskReceiver { rx, pending },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_schedule_is_deferred_and_fifo() {
        let (tx, mut rx) = channel();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            tx.schedule(move || log.lock().unwrap().push(i)).unwrap();
        }

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(rx.pending(), 3);
        assert_eq!(rx.run_pending(), 3);
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(rx.pending(), 0);
    }

    #[test]
    fn test_tasks_scheduled_by_tasks_wait_for_next_tick() {
        let (tx, mut rx) = channel();
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_tx = tx.clone();
        let inner_hits = hits.clone();
        tx.schedule(move || {
            let hits = inner_hits.clone();
            inner_tx
                .schedule(move || {
                    hits.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        })
        .unwrap();

        assert_eq!(rx.run_pending(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(rx.run_pending(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_schedule_after_receiver_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(tx.is_closed());
        assert_eq!(tx.schedule(|| {}), Err(DispatchError::Closed));
    }

    #[test]
    fn test_dispatch_error_display() {
        assert_eq!(DispatchError::Closed.to_string(), "dispatch queue closed");
    }

    #[tokio::test]
    async fn test_run_until_senders_dropped() {
        let (tx, rx) = channel();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..4 {
            let hits = hits.clone();
            tx.schedule(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        drop(tx);

        assert_eq!(rx.run().await, 4);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }
}
