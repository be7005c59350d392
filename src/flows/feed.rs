//! Community feed with a resolved/unresolved filter.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use super::FlowError;
use crate::app::App;
use crate::data::PostSource;
use crate::model::{FeedFilter, Post};

pub const NO_POSTS: &str = "No posts found";

#[derive(Clone, Debug)]
pub struct FeedView {
    pub filter: FeedFilter,
    pub posts: Vec<Post>,
    /// Logged-in users get interaction controls on each post.
    pub is_logged_in: bool,
}

impl FeedView {
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.posts.is_empty().then_some(NO_POSTS)
    }
}

/// Posts admitted by `filter`, in their original order.
#[must_use]
pub fn filter_posts(posts: Vec<Post>, filter: FeedFilter) -> Vec<Post> {
    posts.into_iter().filter(|p| filter.admits(p.status)).collect()
}

/// Fetch the feed from the server.
///
/// # Errors
///
/// Returns [`FlowError::Api`] when the list cannot be fetched.
pub async fn load_feed(app: &App, filter: FeedFilter) -> Result<FeedView, FlowError> {
    let posts = app.api.list_posts().await?;
    tracing::debug!(total = posts.len(), ?filter, "feed loaded");
    Ok(view(app, posts, filter))
}

/// Build the feed from a local source without touching the network.
#[must_use]
pub fn feed_from_source(app: &App, source: &dyn PostSource, filter: FeedFilter) -> FeedView {
    view(app, source.posts(), filter)
}

fn view(app: &App, posts: Vec<Post>, filter: FeedFilter) -> FeedView {
    FeedView { filter, posts: filter_posts(posts, filter), is_logged_in: app.session.is_logged_in() }
}
