//! In-process stand-in for the community-feed backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server is not finished; until it is, `--offline` routes every call
//! here. Login accepts any non-empty identifier/password and returns a user
//! named after the identifier; the feed is served from a [`PostSource`].
//! Responses use the same status codes and `{ "message": ... }` error
//! bodies the real API returns, so the pipeline behaves identically.

#[cfg(test)]
#[path = "offline_test.rs"]
mod offline_test;

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use serde_json::{Value, json};
use time::OffsetDateTime;

use super::api::{FORGOT_PASSWORD_PATH, LOGIN_PATH, POSTS_PATH, REGISTER_PATH, RESET_PASSWORD_PATH, VERIFY_CODE_PATH};
use super::error::TransportError;
use super::transport::Transport;
use super::types::{ApiRequest, ApiResponse, Method, RequestBody};
use crate::data::{PostSource, rfc3339};
use crate::model::{Author, Location, Post, PostStatus};

/// Author recorded on posts created offline.
pub const OFFLINE_AUTHOR: &str = "CurrentUser";

pub struct OfflineTransport {
    source: Box<dyn PostSource>,
    created: Mutex<Vec<Post>>,
    usernames: Mutex<HashSet<String>>,
}

impl OfflineTransport {
    #[must_use]
    pub fn new(source: Box<dyn PostSource>) -> Self {
        Self { source, created: Mutex::new(Vec::new()), usernames: Mutex::new(HashSet::new()) }
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        match (request.method, request.path.as_str()) {
            (Method::Post, LOGIN_PATH) => login(&request.body),
            (Method::Post, REGISTER_PATH) => self.register(&request.body),
            (Method::Post, FORGOT_PASSWORD_PATH) => require_fields(&request.body, &["identifier"]),
            (Method::Post, VERIFY_CODE_PATH) => require_fields(&request.body, &["identifier", "code"]),
            (Method::Post, RESET_PASSWORD_PATH) => require_fields(&request.body, &["identifier", "code", "newPassword"]),
            (Method::Post, POSTS_PATH) => self.create_post(request),
            (Method::Get, POSTS_PATH) => self.list_posts(),
            _ => error(404, "Not found"),
        }
    }

    fn register(&self, body: &RequestBody) -> ApiResponse {
        let RequestBody::Multipart(form) = body else {
            return error(415, "Expected multipart form data");
        };
        let Some(username) = form.text_value("username").filter(|u| !u.is_empty()) else {
            return error(400, "Username is required");
        };
        let mut usernames = self.usernames.lock().unwrap_or_else(PoisonError::into_inner);
        if !usernames.insert(username.to_ascii_lowercase()) {
            return error(409, "Username already taken");
        }
        ApiResponse::json(201, &json!({ "message": "Registered" }))
    }

    fn create_post(&self, request: &ApiRequest) -> ApiResponse {
        if request.bearer_token().is_none() {
            return error(401, "Please login to create a post");
        }
        let RequestBody::Multipart(form) = &request.body else {
            return error(415, "Expected multipart form data");
        };
        let (Some(image), Some(description), Some(location)) =
            (form.file_value("image"), form.text_value("description"), form.text_value("location"))
        else {
            return error(400, "All fields are required");
        };

        let mut created = self.created.lock().unwrap_or_else(PoisonError::into_inner);
        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            image_urls: vec![format!("local://{}", image.file_name)],
            description: description.to_owned(),
            location: Location { name: location.to_owned() },
            status: PostStatus::Unresolved,
            created_by: Author { name: OFFLINE_AUTHOR.to_owned() },
            created_at: rfc3339(OffsetDateTime::now_utc()),
        };
        let body = serde_json::to_value(&post).unwrap_or(Value::Null);
        created.push(post);
        ApiResponse::json(201, &body)
    }

    fn list_posts(&self) -> ApiResponse {
        let created = self.created.lock().unwrap_or_else(PoisonError::into_inner);
        let posts: Vec<Post> = created.iter().rev().cloned().chain(self.source.posts()).collect();
        match serde_json::to_value(&posts) {
            Ok(body) => ApiResponse::json(200, &body),
            Err(e) => error(500, &e.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl Transport for OfflineTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let response = self.route(&request);
        tracing::debug!(method = %request.method, path = %request.path, status = response.status, "offline");
        Ok(response)
    }
}

fn login(body: &RequestBody) -> ApiResponse {
    let RequestBody::Json(value) = body else {
        return error(400, "Expected JSON body");
    };
    let identifier = str_field(value, "identifier");
    let password = str_field(value, "password");
    let (Some(identifier), Some(_)) = (identifier, password) else {
        return error(400, "Identifier and password are required");
    };
    ApiResponse::json(
        200,
        &json!({
            "user": {
                "_id": "1",
                "name": identifier,
                "email": identifier,
                "token": format!("offline-{}", uuid::Uuid::new_v4().simple()),
            }
        }),
    )
}

fn require_fields(body: &RequestBody, fields: &[&str]) -> ApiResponse {
    let RequestBody::Json(value) = body else {
        return error(400, "Expected JSON body");
    };
    if let Some(missing) = fields.iter().find(|f| str_field(value, f).is_none()) {
        return error(400, &format!("{missing} is required"));
    }
    ApiResponse::json(200, &json!({ "message": "OK" }))
}

fn str_field<'a>(value: &'a Value, name: &str) -> Option<&'a str> {
    value.get(name).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn error(status: u16, message: &str) -> ApiResponse {
    ApiResponse::json(status, &json!({ "message": message }))
}
