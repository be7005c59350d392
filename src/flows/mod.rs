//! Feature routes without their views.
//!
//! Each flow validates locally first: a validation failure emits one error
//! notification and returns [`FlowError::Validation`] without dispatching
//! anything. Network failures arrive as [`FlowError::Api`] and have already
//! been notified by the pipeline, so callers may discard them.

pub mod create_post;
pub mod feed;
pub mod forgot_password;
pub mod login;
pub mod post_view;
pub mod profile;
pub mod register;

use crate::net::ApiError;
use crate::notify::Notifier;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Input rejected before any call was made.
    #[error("{0}")]
    Validation(String),

    /// The call failed; the user has already been notified.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be persisted or cleared.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl FlowError {
    /// Whether the user has already seen a notification for this error.
    #[must_use]
    pub const fn is_notified(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Api(e) => e.is_notified(),
            Self::Storage(_) => false,
        }
    }
}

/// Notify `message` as an error and return it as a validation failure.
pub(crate) fn reject(notifier: &Notifier, message: &str) -> FlowError {
    notifier.error(message);
    FlowError::Validation(message.to_owned())
}
