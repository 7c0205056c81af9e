//! Tracking for detached best-effort work.
//!
//! Opportunistic cache writes are spawned off the request path and never
//! awaited before the response goes back to the caller. They are still
//! registered here so tests and orderly hosts can wait for quiescence;
//! a host that tears the worker down without draining simply abandons
//! them, which is allowed for best-effort work.

use std::future::Future;
use std::sync::Mutex;

use tokio::task::JoinHandle;

#[derive(Default)]
pub struct WorkSet {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task and keep its handle.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        self.handles.lock().expect("work set poisoned").push(handle);
    }

    /// Number of tasks registered since the last drain (finished or not).
    pub fn pending(&self) -> usize {
        self.handles.lock().expect("work set poisoned").len()
    }

    /// Wait for every registered task to settle. Panicked tasks are
    /// treated as settled; their failure was already logged at the spawn
    /// site or swallowed as best-effort.
    pub async fn drain(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut guard = self.handles.lock().expect("work set poisoned");
            guard.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }
}
