use super::*;

#[test]
fn user_uses_server_field_names() {
    let user = User {
        id: "1".to_owned(),
        name: "alice".to_owned(),
        email: "alice@example.test".to_owned(),
        token: Some("T".to_owned()),
        avatar: None,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["_id"], "1");
    assert_eq!(json["token"], "T");
    assert!(json.get("avatar").is_none());
}

#[test]
fn user_without_token_deserializes() {
    let user: User = serde_json::from_str(r#"{"_id":"9","name":"bob","email":"b@x.test"}"#).unwrap();
    assert_eq!(user.token, None);
    assert_eq!(user.avatar, None);
}

#[test]
fn post_deserializes_from_feed_payload() {
    let raw = serde_json::json!({
        "_id": "7",
        "imageUrl": ["https://picsum.photos/400/300?7"],
        "description": "Pothole repaired",
        "location": { "name": "Main Street" },
        "status": "resolved",
        "createdBy": { "name": "Jane Smith" },
        "createdAt": "2026-10-01T10:00:00Z"
    });
    let post: Post = serde_json::from_value(raw).unwrap();
    assert_eq!(post.status, PostStatus::Resolved);
    assert_eq!(post.created_by.name, "Jane Smith");
    assert_eq!(post.image_urls.len(), 1);
}

#[test]
fn unknown_status_is_rejected() {
    let result: Result<PostStatus, _> = serde_json::from_str(r#""pending""#);
    assert!(result.is_err());
}

#[test]
fn status_label_is_capitalized() {
    assert_eq!(PostStatus::Resolved.label(), "Resolved");
    assert_eq!(PostStatus::Unresolved.to_string(), "unresolved");
}

#[test]
fn feed_filter_parses_case_insensitively() {
    assert_eq!("All".parse::<FeedFilter>().unwrap(), FeedFilter::All);
    assert_eq!("unresolved".parse::<FeedFilter>().unwrap(), FeedFilter::Unresolved);
    assert!("open".parse::<FeedFilter>().is_err());
}

#[test]
fn feed_filter_admits() {
    assert!(FeedFilter::All.admits(PostStatus::Unresolved));
    assert!(FeedFilter::Resolved.admits(PostStatus::Resolved));
    assert!(!FeedFilter::Resolved.admits(PostStatus::Unresolved));
}
