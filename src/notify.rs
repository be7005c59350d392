//! Transient user-facing notifications ("toasts").
//!
//! DESIGN
//! ======
//! Every notification is queued with a time-to-live and mirrored to
//! `tracing`. Views either poll [`Notifier::active`] (expired entries are
//! pruned on read) or take everything pending with [`Notifier::drain`],
//! which is what the CLI does after each command.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::DEFAULT_TOAST_MILLIS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub raised_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.ttl
    }
}

#[derive(Clone)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Notification>>>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TOAST_MILLIS))
    }
}

impl Notifier {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { queue: Arc::new(Mutex::new(VecDeque::new())), ttl }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Level::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    fn push(&self, level: Level, message: String) {
        match level {
            Level::Success => tracing::info!(%message, "notification"),
            Level::Error => tracing::warn!(%message, "error notification"),
        }
        let notification = Notification { level, message, raised_at: Instant::now(), ttl: self.ttl };
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(notification);
    }

    /// Notifications still within their lifetime, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        let now = Instant::now();
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.retain(|n| !n.is_expired(now));
        queue.iter().cloned().collect()
    }

    /// Take every pending notification regardless of age.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }
}
