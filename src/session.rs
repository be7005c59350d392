//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for "who is logged in". Flows read it to decide
//! what to render; the request pipeline reads the durable copy (not this
//! in-memory one) when attaching the bearer credential.
//!
//! DESIGN
//! ======
//! The in-memory record lives in a `tokio::sync::watch` channel so views can
//! subscribe to changes. `set_user` only touches memory; `persist` and
//! `logout` are the only writers of the durable copy under [`USER_STORAGE_KEY`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::User;
use crate::storage::{self, DurableStore, StorageError};

/// Durable storage key holding the JSON-encoded [`User`].
pub const USER_STORAGE_KEY: &str = "user";

/// Read the persisted user record, if any.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the record is malformed.
pub fn load_persisted(store: &dyn DurableStore) -> Result<Option<User>, StorageError> {
    storage::load_json(store, USER_STORAGE_KEY)
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn DurableStore>,
    current: Arc<watch::Sender<Option<User>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn DurableStore>) -> Self {
        Self { storage, current: Arc::new(watch::Sender::new(None)) }
    }

    /// Current user, if logged in.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Replace the in-memory user record. Callers persist separately.
    pub fn set_user(&self, user: Option<User>) {
        tracing::debug!(user = user.as_ref().map(|u| u.name.as_str()), "session user replaced");
        self.current.send_replace(user);
    }

    /// Write `user` to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or written.
    pub fn persist(&self, user: &User) -> Result<(), StorageError> {
        storage::save_json(self.storage.as_ref(), USER_STORAGE_KEY, user)
    }

    /// Load the durable record into memory. Used once at start.
    ///
    /// A missing or unreadable record leaves the session logged out.
    pub fn restore(&self) -> Option<User> {
        let user = match load_persisted(self.storage.as_ref()) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "stored session unreadable; starting logged out");
                None
            }
        };
        if let Some(u) = &user {
            tracing::info!(user = %u.name, "session restored");
        }
        self.current.send_replace(user.clone());
        user
    }

    /// Remove the durable record, then clear memory. Safe to call when
    /// nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable record cannot be removed; the
    /// in-memory user is left untouched in that case.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(USER_STORAGE_KEY)?;
        if self.current.send_replace(None).is_some() {
            tracing::info!("logged out");
        }
        Ok(())
    }

    /// Subscribe to user changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }
}
