//! Wire DTOs shared by the session, the API layer, and the flows.
//!
//! DESIGN
//! ======
//! Field names mirror the server JSON (`_id`, `imageUrl`, `createdBy`) so
//! serde round-trips stay lossless and the persisted user record stays
//! readable by any other client of the same API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The authenticated user as returned by `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    pub email: String,
    /// Bearer credential attached to outgoing requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Lifecycle state of a reported issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Resolved,
    Unresolved,
}

impl PostStatus {
    /// Capitalized label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resolved => "Resolved",
            Self::Unresolved => "Unresolved",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => f.write_str("resolved"),
            Self::Unresolved => f.write_str("unresolved"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// A reported issue in the community feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    /// Ordered image references; the first one is the cover.
    #[serde(rename = "imageUrl")]
    pub image_urls: Vec<String>,
    pub description: String,
    pub location: Location,
    pub status: PostStatus,
    pub created_by: Author,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Which posts the feed shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedFilter {
    #[default]
    All,
    Resolved,
    Unresolved,
}

impl FeedFilter {
    /// Whether `status` passes this filter.
    #[must_use]
    pub fn admits(self, status: PostStatus) -> bool {
        match self {
            Self::All => true,
            Self::Resolved => status == PostStatus::Resolved,
            Self::Unresolved => status == PostStatus::Unresolved,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown feed filter '{0}' (expected all, resolved or unresolved)")]
pub struct ParseFeedFilterError(String);

impl FromStr for FeedFilter {
    type Err = ParseFeedFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "resolved" => Ok(Self::Resolved),
            "unresolved" => Ok(Self::Unresolved),
            _ => Err(ParseFeedFilterError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;
