use std::sync::Arc;

use super::*;
use crate::config::Config;
use crate::model::{Author, Location, PostStatus};
use crate::net::offline::OfflineTransport;
use crate::storage::MemoryStore;

fn post_with_images(n: usize) -> Post {
    Post {
        id: "1".to_owned(),
        image_urls: (0..n).map(|i| format!("img-{i}")).collect(),
        description: "Street lights fixed".to_owned(),
        location: Location { name: "Suburb".to_owned() },
        status: PostStatus::Resolved,
        created_by: Author { name: "Ian Clark".to_owned() },
        created_at: "2026-10-01T09:30:00Z".to_owned(),
    }
}

#[test]
fn carousel_wraps_both_ways() {
    let mut c = Carousel::new(3);
    assert_eq!(c.prev(), 2);
    assert_eq!(c.next(), 0);
    assert_eq!(c.next(), 1);
    assert_eq!(c.next(), 2);
    assert_eq!(c.next(), 0);
}

#[test]
fn single_image_has_no_controls() {
    let mut c = Carousel::new(1);
    assert!(!c.has_controls());
    assert_eq!(c.next(), 0);
    assert_eq!(c.prev(), 0);
    let mut empty = Carousel::new(0);
    assert_eq!(empty.next(), 0);
}

#[test]
fn current_image_follows_cursor() {
    let post = post_with_images(2);
    let mut c = Carousel::new(post.image_urls.len());
    c.next();
    assert_eq!(current_image(&post, &c), Some("img-1"));
    assert_eq!(current_image(&post_with_images(0), &Carousel::new(0)), None);
}

#[test]
fn posted_by_line_formats_timestamp() {
    assert_eq!(posted_by_line(&post_with_images(1)), "Posted by Ian Clark at 2026-10-01 09:30");
}

#[test]
fn posted_by_line_keeps_unparseable_timestamp() {
    let mut post = post_with_images(1);
    post.created_at = "yesterday".to_owned();
    assert_eq!(posted_by_line(&post), "Posted by Ian Clark at yesterday");
}

fn app_with_posts(posts: Vec<Post>) -> App {
    let transport = OfflineTransport::new(Box::new(posts));
    App::new(&Config::default(), Arc::new(MemoryStore::new()), Arc::new(transport))
}

#[tokio::test]
async fn find_post_picks_matching_id() {
    let mut other = post_with_images(1);
    other.id = "2".to_owned();
    other.description = "Broken bench".to_owned();
    let app = app_with_posts(vec![post_with_images(2), other]);

    let post = find_post(&app, "2").await.unwrap().unwrap();
    assert_eq!(post.description, "Broken bench");
    assert!(!app.loading.is_loading());
}

#[tokio::test]
async fn find_post_unknown_id_is_none_without_toast() {
    let app = app_with_posts(vec![post_with_images(1)]);

    assert_eq!(find_post(&app, "404").await.unwrap(), None);
    assert!(app.notifier.drain().is_empty());
}
