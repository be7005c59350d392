//! Create a post: one image, a description, and a location.

#[cfg(test)]
#[path = "create_post_test.rs"]
mod create_post_test;

use super::{FlowError, reject};
use crate::app::App;
use crate::net::{FilePart, MultipartForm};

pub const MISSING_FIELDS: &str = "All fields are required";
pub const POST_CREATED: &str = "Post created successfully";

#[derive(Clone, Debug, Default)]
pub struct PostDraft {
    pub image: Option<FilePart>,
    pub description: String,
    pub location: String,
}

impl PostDraft {
    /// All three fields present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.image.is_some() && !self.description.is_empty() && !self.location.is_empty()
    }
}

/// Submit `draft` as a new post.
///
/// # Errors
///
/// Returns [`FlowError::Validation`] (and dispatches nothing) unless the
/// image, description and location are all present; [`FlowError::Api`]
/// when the server rejects the post.
pub async fn create_post(app: &App, draft: &PostDraft) -> Result<(), FlowError> {
    let Some(image) = draft.image.as_ref().filter(|_| draft.is_complete()) else {
        return Err(reject(&app.notifier, MISSING_FIELDS));
    };

    let form = MultipartForm::new()
        .file("image", image.clone())
        .text("description", &draft.description)
        .text("location", &draft.location);
    app.api.create_post(form).await?;

    tracing::info!(location = %draft.location, "post created");
    app.notifier.success(POST_CREATED);
    Ok(())
}
