//! Errors surfaced by transports and the request pipeline.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Shown when a failure carries no server-provided message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// A transport could not deliver a request or read its response.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built (bad URL, bad header, bad MIME type).
    #[error("request build failed: {0}")]
    Build(String),

    /// Connection, TLS, timeout, or body-read failure.
    #[error("request failed: {0}")]
    Network(String),
}

/// A call made through the pipeline was rejected.
///
/// `Display` is the user-facing message that the pipeline already emitted
/// as a notification; the variant keeps the detail for callers and logs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{message}")]
    Network { message: String, detail: String },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String, body: String },

    /// A 2xx body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String, detail: String },
}

impl ApiError {
    #[must_use]
    pub fn network(err: &TransportError) -> Self {
        Self::Network { message: FALLBACK_MESSAGE.to_owned(), detail: err.to_string() }
    }

    /// Build a status error, extracting the server's `message` field when present.
    #[must_use]
    pub fn status(status: u16, body: &[u8]) -> Self {
        Self::Status {
            status,
            message: extract_message(body),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    #[must_use]
    pub fn decode(err: &serde_json::Error) -> Self {
        Self::Decode { message: FALLBACK_MESSAGE.to_owned(), detail: err.to_string() }
    }

    /// The message shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message, .. } | Self::Status { message, .. } | Self::Decode { message, .. } => message,
        }
    }

    /// HTTP status for server rejections.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }

    /// Every `ApiError` leaving the pipeline has already been shown to the
    /// user, so callers may drop it without further reporting.
    #[must_use]
    pub const fn is_notified(&self) -> bool {
        true
    }
}

/// Pull a human-readable `message` out of an error body.
///
/// Falls back to [`FALLBACK_MESSAGE`] for non-JSON bodies, a missing or
/// non-string `message`, or a blank one.
#[must_use]
pub fn extract_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(serde_json::Value::as_str).map(str::to_owned))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned())
}
