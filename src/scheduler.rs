//! Deferred callbacks on the tokio runtime.
//!
//! Used for the cosmetic delays around notifications and the print trigger.
//! Callbacks scheduled under a key replace any pending callback with the same
//! key, so overlapping triggers never fire twice.

use crate::{Error, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};

/// Handle to a scheduled callback
pub struct TaskHandle {
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Cancel the callback if it has not run yet
    pub fn cancel(&self) {
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the callback. Returns `false` if it was cancelled.
    pub async fn join(self) -> bool {
        self.join.await.is_ok()
    }
}

#[derive(Clone)]
pub struct Scheduler {
    handle: Handle,
    pending: Arc<Mutex<HashMap<String, (u64, AbortHandle)>>>,
    next_id: Arc<AtomicU64>,
}

impl Scheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Bind to the runtime the caller is running on.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| Error::ConfigError(format!("scheduler needs a tokio runtime: {}", e)))
    }

    /// Run `f` once after `delay`. Fire-and-forget unless the handle is kept.
    pub fn schedule<F>(&self, delay: Duration, f: F) -> TaskHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let join = self.handle.spawn(delayed(delay, f));
        TaskHandle { join }
    }

    /// Like [`schedule`](Self::schedule) but cancels whatever is pending under `key`.
    pub fn schedule_keyed<F>(&self, key: &str, delay: Duration, f: F) -> TaskHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let owned_key = key.to_string();

        let mut guard = self.pending.lock().unwrap();
        if let Some((old_id, old)) = guard.remove(key) {
            log::debug!("cancelling pending task '{}' (#{})", key, old_id);
            old.abort();
        }

        let join = self.handle.spawn(delayed(delay, move || {
            {
                let mut g = pending.lock().unwrap();
                if matches!(g.get(&owned_key), Some((cur, _)) if *cur == id) {
                    g.remove(&owned_key);
                }
            }
            f();
        }));
        guard.insert(key.to_string(), (id, join.abort_handle()));
        TaskHandle { join }
    }

    /// Cancel the task pending under `key`. Returns whether one was pending.
    pub fn cancel(&self, key: &str) -> bool {
        match self.pending.lock().unwrap().remove(key) {
            Some((_, h)) => {
                h.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.lock().unwrap().contains_key(key)
    }
}

fn delayed<F>(delay: Duration, f: F) -> impl Future<Output = ()> + Send + 'static
where
    F: FnOnce() + Send + 'static,
{
    async move {
        tokio::time::sleep(delay).await;
        f();
    }
}
