//! Post data sources.
//!
//! DESIGN
//! ======
//! The feed reads posts through [`PostSource`] so the generated sample
//! data used by the offline backend can be swapped for fixtures in tests.
//! [`DummyPosts`] draws from fixed word lists with a caller-supplied RNG;
//! seed it for reproducible output.

#[cfg(test)]
#[path = "data_test.rs"]
mod data_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::model::{Author, Location, Post, PostStatus};

pub const DEFAULT_DUMMY_POST_COUNT: usize = 100;
/// Generated posts are spread over this many past days.
pub const DUMMY_POST_MAX_AGE_DAYS: i64 = 30;

const LOCATIONS: &[&str] = &[
    "City Park",
    "Main Street",
    "River Side",
    "Downtown",
    "Suburb",
    "Community Center",
    "School Grounds",
    "Industrial Area",
    "Market Square",
    "Beach",
];

const DESCRIPTIONS: &[&str] = &[
    "Trash cleaned in park",
    "Overflowing bins reported",
    "Graffiti removed",
    "Street lights fixed",
    "Pothole repaired",
    "Fallen tree removed",
    "Road sign damaged",
    "Recycling bins placed",
    "Water leak fixed",
    "Community cleanup organized",
];

const CREATORS: &[&str] = &[
    "John Doe",
    "Jane Smith",
    "Alice Johnson",
    "Bob Brown",
    "Charlie Davis",
    "Emily White",
    "Frank Miller",
    "Grace Lee",
    "Hannah Wilson",
    "Ian Clark",
];

pub trait PostSource: Send + Sync {
    fn posts(&self) -> Vec<Post>;
}

impl PostSource for Vec<Post> {
    fn posts(&self) -> Vec<Post> {
        self.clone()
    }
}

/// Randomly generated sample posts.
#[derive(Clone, Debug)]
pub struct DummyPosts {
    posts: Vec<Post>,
}

impl DummyPosts {
    /// Generate `count` posts with ids `"1"..="count"`, created within the
    /// last [`DUMMY_POST_MAX_AGE_DAYS`] days before `now`.
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R, now: OffsetDateTime) -> Self {
        let posts = (1..=count)
            .map(|n| {
                let days_ago = rng.random_range(0..DUMMY_POST_MAX_AGE_DAYS);
                let status = if rng.random_bool(0.5) { PostStatus::Resolved } else { PostStatus::Unresolved };
                Post {
                    id: n.to_string(),
                    image_urls: vec![format!("https://picsum.photos/400/300?{n}")],
                    description: pick(rng, DESCRIPTIONS).to_owned(),
                    location: Location { name: pick(rng, LOCATIONS).to_owned() },
                    status,
                    created_by: Author { name: pick(rng, CREATORS).to_owned() },
                    created_at: rfc3339(now - time::Duration::days(days_ago)),
                }
            })
            .collect();
        Self { posts }
    }

    /// Reproducible sample relative to the current time.
    #[must_use]
    pub fn seeded(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(count, &mut rng, OffsetDateTime::now_utc())
    }
}

impl PostSource for DummyPosts {
    fn posts(&self) -> Vec<Post> {
        self.posts.clone()
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.random_range(0..items.len())]
}

/// RFC 3339 rendering; out-of-range dates render empty.
#[must_use]
pub fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_default()
}
