//! Full-page post: image carousel and header lines.

#[cfg(test)]
#[path = "post_view_test.rs"]
mod post_view_test;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use super::FlowError;
use crate::app::App;
use crate::model::Post;

/// Wrap-around cursor over a post's images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Arrows and dots only appear with more than one image.
    #[must_use]
    pub const fn has_controls(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> usize {
        if self.has_controls() {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    pub fn prev(&mut self) -> usize {
        if self.has_controls() {
            self.current = (self.current + self.len - 1) % self.len;
        }
        self.current
    }
}

/// `Posted by <name> at <timestamp>`; unparseable timestamps are shown raw.
#[must_use]
pub fn posted_by_line(post: &Post) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    let at = OffsetDateTime::parse(&post.created_at, &Rfc3339)
        .ok()
        .and_then(|t| t.format(&format).ok())
        .unwrap_or_else(|| post.created_at.clone());
    format!("Posted by {} at {at}", post.created_by.name)
}

/// Image reference for the carousel's current position.
#[must_use]
pub fn current_image<'a>(post: &'a Post, carousel: &Carousel) -> Option<&'a str> {
    post.image_urls.get(carousel.current()).map(String::as_str)
}

/// Fetch the feed and pick out the post with `id`. `None` when no such
/// post exists.
///
/// # Errors
///
/// Returns [`FlowError::Api`] when the feed cannot be loaded.
pub async fn find_post(app: &App, id: &str) -> Result<Option<Post>, FlowError> {
    let posts = app.api.list_posts().await?;
    Ok(posts.into_iter().find(|p| p.id == id))
}
