//! Request pipeline: the single egress point for server calls.
//!
//! DESIGN
//! ======
//! Every call runs `prepare` (outbound policy), the transport, then
//! `settle` (inbound policy), in that order and in plain sight:
//!
//! - outbound: register the call with the loading store, default the
//!   content type to JSON, and attach `Authorization: Bearer <token>` from
//!   the *persisted* user record when it carries a token;
//! - inbound: settle the loading registration exactly once, pass success
//!   through, and for failures emit one error notification carrying the
//!   server's `message` (or the fallback) before returning the error.
//!
//! ERROR HANDLING
//! ==============
//! Failures are always returned to the caller after the notification is
//! emitted. Callers that only need the user informed may drop the error;
//! see [`ApiError::is_notified`]. A call whose future is dropped before it
//! completes still settles its loading registration, but emits nothing.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::Transport;
use super::types::{ApiRequest, ApiResponse, AUTHORIZATION, CONTENT_TYPE, JSON_CONTENT_TYPE, Method};
use crate::loading::{LoadingGuard, LoadingStore};
use crate::notify::Notifier;
use crate::session;
use crate::storage::DurableStore;

#[derive(Clone)]
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn DurableStore>,
    loading: LoadingStore,
    notifier: Notifier,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        storage: Arc<dyn DurableStore>,
        loading: LoadingStore,
        notifier: Notifier,
    ) -> Self {
        Self { transport, storage, loading, notifier }
    }

    /// Outbound policy. Synchronous; the returned guard must live until the
    /// call settles.
    pub fn prepare(&self, mut request: ApiRequest) -> (ApiRequest, LoadingGuard) {
        let guard = self.loading.begin();

        if request.header(CONTENT_TYPE).is_none() {
            request.set_header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        }

        match session::load_persisted(self.storage.as_ref()) {
            Ok(Some(user)) => {
                if let Some(token) = user.token.filter(|t| !t.is_empty()) {
                    request.set_header(AUTHORIZATION, format!("Bearer {token}"));
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "stored user unreadable; sending without credential"),
        }

        (request, guard)
    }

    /// Inbound policy.
    ///
    /// # Errors
    ///
    /// Returns `outcome`'s error unchanged after notifying the user.
    pub fn settle<T>(
        &self,
        guard: LoadingGuard,
        method: Method,
        path: &str,
        outcome: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        drop(guard);
        if let Err(err) = &outcome {
            match err {
                ApiError::Network { detail, .. } | ApiError::Decode { detail, .. } => {
                    tracing::warn!(%method, path, %detail, "call failed");
                }
                ApiError::Status { status, message, .. } => {
                    tracing::warn!(%method, path, status, %message, "server rejected call");
                }
            }
            self.notifier.error(err.message());
        }
        outcome
    }

    /// Send `request` through both policies and return the raw 2xx response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for network failures and non-2xx responses.
    /// The user has already been notified when this returns `Err`.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.run(request, Ok).await
    }

    /// Like [`Pipeline::execute`], decoding the 2xx body as JSON.
    ///
    /// # Errors
    ///
    /// Additionally returns [`ApiError::Decode`] for malformed bodies.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.run(request, |resp| resp.decode::<T>().map_err(|e| ApiError::decode(&e)))
            .await
    }

    async fn run<T, F>(&self, request: ApiRequest, decode: F) -> Result<T, ApiError>
    where
        F: FnOnce(ApiResponse) -> Result<T, ApiError>,
    {
        let method = request.method;
        let path = request.path.clone();
        let (request, guard) = self.prepare(request);
        tracing::debug!(%method, path, authenticated = request.bearer_token().is_some(), "dispatching");

        let outcome = match self.transport.send(request).await {
            Ok(resp) if resp.is_success() => decode(resp),
            Ok(resp) => Err(ApiError::status(resp.status, &resp.body)),
            Err(e) => Err(ApiError::network(&e)),
        };
        self.settle(guard, method, &path, outcome)
    }

    #[must_use]
    pub fn loading(&self) -> &LoadingStore {
        &self.loading
    }
}
