//! Process-wide busy indicator.
//!
//! DESIGN
//! ======
//! Loading is `outstanding > 0 || manual`. The pipeline holds a
//! [`LoadingGuard`] for the lifetime of each call, so overlapping calls
//! keep the indicator raised until the last one settles. Flows that want
//! the indicator over a longer span take their own guard from `begin`, so
//! an abandoned flow lowers it too. `set_loading` overwrites only the
//! manual flag and is never cleared on the caller's behalf.

#[cfg(test)]
#[path = "loading_test.rs"]
mod loading_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::watch;

#[derive(Clone)]
pub struct LoadingStore {
    inner: Arc<Inner>,
}

struct Inner {
    outstanding: AtomicUsize,
    manual: AtomicBool,
    busy: watch::Sender<bool>,
}

impl Default for LoadingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                outstanding: AtomicUsize::new(0),
                manual: AtomicBool::new(false),
                busy: watch::Sender::new(false),
            }),
        }
    }

    /// Register one outstanding call. The call settles when the guard drops.
    #[must_use = "the call is considered settled as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard {
        self.inner.outstanding.fetch_add(1, Ordering::SeqCst);
        self.publish();
        LoadingGuard { store: self.clone() }
    }

    /// Overwrite the manual flag.
    pub fn set_loading(&self, loading: bool) {
        self.inner.manual.store(loading, Ordering::SeqCst);
        self.publish();
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.outstanding() > 0 || self.inner.manual.load(Ordering::SeqCst)
    }

    /// Number of calls dispatched and not yet settled.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.busy.subscribe()
    }

    fn settle(&self) {
        // Saturating so a stray extra settle can never wrap the counter.
        let _ = self
            .inner
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)));
        self.publish();
    }

    fn publish(&self) {
        self.inner.busy.send_if_modified(|busy| {
            let now = self.is_loading();
            if *busy == now {
                return false;
            }
            *busy = now;
            true
        });
    }
}

/// Marks one in-flight call; dropping it settles the call exactly once.
pub struct LoadingGuard {
    store: LoadingStore,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store.settle();
    }
}
