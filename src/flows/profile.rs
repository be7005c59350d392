//! Profile of the logged-in user.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::session::SessionStore;

pub const LOGIN_REQUIRED: &str = "Please login to view your profile.";
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/100";
pub const POSTS_COMING_SOON: &str = "Posts will appear here soon.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileView {
    Anonymous { message: &'static str },
    User { name: String, email: String, avatar: String },
}

#[must_use]
pub fn profile(session: &SessionStore) -> ProfileView {
    match session.user() {
        None => ProfileView::Anonymous { message: LOGIN_REQUIRED },
        Some(user) => ProfileView::User {
            avatar: user
                .avatar
                .filter(|a| a.starts_with("http"))
                .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_owned()),
            name: user.name,
            email: user.email,
        },
    }
}
