//! Typed helpers for the community-feed REST API.
//!
//! Every helper goes through [`Pipeline`], so failures have already been
//! shown to the user by the time they return `Err`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

use super::error::ApiError;
use super::pipeline::Pipeline;
use super::types::{ApiRequest, MultipartForm};
use crate::model::{Post, User};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const VERIFY_CODE_PATH: &str = "/auth/verify-code";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
pub const POSTS_PATH: &str = "/posts";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: User,
}

#[derive(Clone)]
pub struct Api {
    pipeline: Pipeline,
}

impl Api {
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// `POST /auth/login` with `{ identifier, password }`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any pipeline failure or a body without `user`.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User, ApiError> {
        let body = serde_json::json!({ "identifier": identifier, "password": password });
        let resp: LoginResponse = self
            .pipeline
            .execute_json(ApiRequest::post_json(LOGIN_PATH, body))
            .await?;
        Ok(resp.user)
    }

    /// `POST /auth/register` as multipart.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any pipeline failure.
    pub async fn register(&self, form: MultipartForm) -> Result<(), ApiError> {
        self.pipeline
            .execute(ApiRequest::post_multipart(REGISTER_PATH, form))
            .await?;
        Ok(())
    }

    /// `POST /auth/forgot-password` with `{ identifier }`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any pipeline failure.
    pub async fn forgot_password(&self, identifier: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "identifier": identifier });
        self.pipeline
            .execute(ApiRequest::post_json(FORGOT_PASSWORD_PATH, body))
            .await?;
        Ok(())
    }

    /// `POST /auth/verify-code` with `{ identifier, code }`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any pipeline failure.
    pub async fn verify_code(&self, identifier: &str, code: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "identifier": identifier, "code": code });
        self.pipeline
            .execute(ApiRequest::post_json(VERIFY_CODE_PATH, body))
            .await?;
        Ok(())
    }

    /// `POST /auth/reset-password` with `{ identifier, code, newPassword }`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any pipeline failure.
    pub async fn reset_password(&self, identifier: &str, code: &str, new_password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "identifier": identifier, "code": code, "newPassword": new_password });
        self.pipeline
            .execute(ApiRequest::post_json(RESET_PASSWORD_PATH, body))
            .await?;
        Ok(())
    }

    /// `POST /posts` as multipart.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any pipeline failure.
    pub async fn create_post(&self, form: MultipartForm) -> Result<(), ApiError> {
        self.pipeline
            .execute(ApiRequest::post_multipart(POSTS_PATH, form))
            .await?;
        Ok(())
    }

    /// `GET /posts`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any pipeline failure or a malformed list.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.pipeline.execute_json(ApiRequest::get(POSTS_PATH)).await
    }
}
