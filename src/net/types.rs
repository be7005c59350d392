//! Library-neutral request/response descriptions.
//!
//! DESIGN
//! ======
//! Requests are plain data so the pipeline's header policy can be asserted
//! in tests without a network, and so the offline transport can route them
//! without going through an HTTP stack.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

// =============================================================================
// MULTIPART
// =============================================================================

/// An uploaded file: name, MIME type, and contents.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FilePart {
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime: mime.into(), bytes }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self { mime: guess_mime(path).to_owned(), file_name, bytes })
    }
}

/// MIME type for common image extensions.
#[must_use]
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Text(String),
    File(FilePart),
}

/// Ordered multipart body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, Part)>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), Part::Text(value.into())));
        self
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.parts.push((name.into(), Part::File(file)));
        self
    }

    #[must_use]
    pub fn parts(&self) -> &[(String, Part)] {
        &self.parts
    }

    /// First text field named `name`.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, part)| match part {
            Part::Text(v) if n == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// First file field named `name`.
    #[must_use]
    pub fn file_value(&self, name: &str) -> Option<&FilePart> {
        self.parts.iter().find_map(|(n, part)| match part {
            Part::File(f) if n == name => Some(f),
            _ => None,
        })
    }
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), headers: Vec::new(), body: RequestBody::Empty }
    }

    #[must_use]
    pub fn post_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self { method: Method::Post, path: path.into(), headers: Vec::new(), body: RequestBody::Json(body) }
    }

    #[must_use]
    pub fn post_multipart(path: impl Into<String>, form: MultipartForm) -> Self {
        Self { method: Method::Post, path: path.into(), headers: Vec::new(), body: RequestBody::Multipart(form) }
            .with_header(CONTENT_TYPE, MULTIPART_CONTENT_TYPE)
    }

    /// Set `name`, replacing any existing value (names compare case-insensitively).
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Token carried in `Authorization: Bearer <token>`, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.header(AUTHORIZATION)?.strip_prefix("Bearer ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self { status, body: value.to_string().into_bytes() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the body is not valid JSON for `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
