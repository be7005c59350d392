//! Shared application services.
//!
//! DESIGN
//! ======
//! `App` is constructed once at start and handed to every flow. All fields
//! are cheap `Clone` handles over shared state, so flows can hold copies
//! without coordinating lifetimes. Nothing here is a global.

use std::sync::Arc;

use crate::config::Config;
use crate::loading::LoadingStore;
use crate::net::{Api, Pipeline, Transport};
use crate::notify::Notifier;
use crate::session::SessionStore;
use crate::storage::DurableStore;

#[derive(Clone)]
pub struct App {
    pub session: SessionStore,
    pub loading: LoadingStore,
    pub notifier: Notifier,
    pub api: Api,
}

impl App {
    /// Wire the stores and the pipeline around `transport`. The session is
    /// restored from `storage` before this returns.
    #[must_use]
    pub fn new(config: &Config, storage: Arc<dyn DurableStore>, transport: Arc<dyn Transport>) -> Self {
        let loading = LoadingStore::new();
        let notifier = Notifier::new(config.toast_ttl);
        let session = SessionStore::new(storage.clone());
        let pipeline = Pipeline::new(transport, storage, loading.clone(), notifier.clone());
        session.restore();
        Self { session, loading, notifier, api: Api::new(pipeline) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::net::{ApiRequest, ApiResponse, TransportError};
    use crate::storage::MemoryStore;

    /// Replays queued responses (default `200 {}`) and records every request.
    #[derive(Default)]
    pub struct ScriptedTransport {
        pub replies: Mutex<VecDeque<ApiResponse>>,
        pub sent: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn reply(&self, response: ApiResponse) {
            self.replies.lock().unwrap().push_back(response);
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| ApiResponse::new(200, "{}")))
        }
    }

    /// Never answers; used to abandon a call while it is in flight.
    pub struct StalledTransport;

    #[async_trait::async_trait]
    impl Transport for StalledTransport {
        async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, TransportError> {
            std::future::pending().await
        }
    }

    /// An `App` whose every call hangs until the caller gives up.
    pub fn stalled_app() -> App {
        App::new(&Config::default(), Arc::new(MemoryStore::new()), Arc::new(StalledTransport))
    }

    /// An `App` over in-memory storage and a scripted transport.
    pub fn test_app() -> (App, Arc<MemoryStore>, Arc<ScriptedTransport>) {
        let storage = Arc::new(MemoryStore::new());
        let transport = Arc::new(ScriptedTransport::default());
        let app = App::new(&Config::default(), storage.clone(), transport.clone());
        (app, storage, transport)
    }
}
