//! Network layer: request pipeline, transports, and typed API calls.
//!
//! ARCHITECTURE
//! ============
//! `types` describes requests independent of any HTTP library. A
//! `Transport` delivers them (`transport::HttpTransport` over reqwest, or
//! `offline::OfflineTransport` in-process). `pipeline::Pipeline` wraps a
//! transport with the cross-cutting policies, and `api::Api` is the only
//! thing flows talk to.

pub mod api;
pub mod error;
pub mod offline;
pub mod pipeline;
pub mod transport;
pub mod types;

pub use api::Api;
pub use error::{ApiError, FALLBACK_MESSAGE, TransportError};
pub use pipeline::Pipeline;
pub use transport::{HttpTransport, Transport};
pub use types::{ApiRequest, ApiResponse, FilePart, Method, MultipartForm, RequestBody};
