//! Transports deliver an [`ApiRequest`] and hand back the raw response.
//!
//! A transport never interprets status codes; that is the pipeline's job.

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use super::error::TransportError;
use super::types::{ApiRequest, ApiResponse, CONTENT_TYPE, Method, MultipartForm, Part, RequestBody};
use crate::config::Config;

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response could be obtained.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

// =============================================================================
// HTTP TRANSPORT
// =============================================================================

/// reqwest-backed transport rooted at the configured API base URL.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn build(&self, request: ApiRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };

        let is_multipart = matches!(request.body, RequestBody::Multipart(_));
        for (name, value) in &request.headers {
            // reqwest writes its own multipart content type with the boundary.
            if is_multipart && name.eq_ignore_ascii_case(CONTENT_TYPE) {
                continue;
            }
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::Build(e.to_string()))?;
            let value = HeaderValue::from_str(value).map_err(|e| TransportError::Build(e.to_string()))?;
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };
        Ok(builder)
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
    let mut out = reqwest::multipart::Form::new();
    for (name, part) in form.parts() {
        out = match part {
            Part::Text(value) => out.text(name.clone(), value.clone()),
            Part::File(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(|e| TransportError::Build(e.to_string()))?;
                out.part(name.clone(), part)
            }
        };
    }
    Ok(out)
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let builder = self.build(request)?;
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(ApiResponse { status, body: body.to_vec() })
    }
}
