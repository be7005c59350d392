use super::*;
use crate::data::DummyPosts;
use crate::net::types::{AUTHORIZATION, FilePart, MultipartForm};

fn offline() -> OfflineTransport {
    OfflineTransport::new(Box::new(DummyPosts::seeded(5, 10)))
}

fn message(resp: &ApiResponse) -> String {
    let v: Value = resp.decode().unwrap();
    v["message"].as_str().unwrap_or_default().to_owned()
}

#[tokio::test]
async fn login_returns_user_named_after_identifier() {
    let t = offline();
    let resp = t
        .send(ApiRequest::post_json(LOGIN_PATH, json!({ "identifier": "alice", "password": "pw" })))
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
    let v: Value = resp.decode().unwrap();
    assert_eq!(v["user"]["name"], "alice");
    assert!(v["user"]["token"].as_str().unwrap().starts_with("offline-"));
}

#[tokio::test]
async fn login_requires_both_fields() {
    let t = offline();
    let resp = t
        .send(ApiRequest::post_json(LOGIN_PATH, json!({ "identifier": "alice" })))
        .await
        .unwrap();
    assert_eq!(resp.status, 400);
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let t = offline();
    let form = || MultipartForm::new().text("username", "Alice");
    let first = t.send(ApiRequest::post_multipart(REGISTER_PATH, form())).await.unwrap();
    assert_eq!(first.status, 201);
    let second = t
        .send(ApiRequest::post_multipart(REGISTER_PATH, MultipartForm::new().text("username", "alice")))
        .await
        .unwrap();
    assert_eq!(second.status, 409);
    assert_eq!(message(&second), "Username already taken");
}

#[tokio::test]
async fn password_reset_steps_validate_fields() {
    let t = offline();
    let ok = t
        .send(ApiRequest::post_json(VERIFY_CODE_PATH, json!({ "identifier": "a", "code": "1" })))
        .await
        .unwrap();
    assert_eq!(ok.status, 200);
    let missing = t
        .send(ApiRequest::post_json(RESET_PASSWORD_PATH, json!({ "identifier": "a", "code": "1" })))
        .await
        .unwrap();
    assert_eq!(missing.status, 400);
    assert_eq!(message(&missing), "newPassword is required");
}

#[tokio::test]
async fn create_post_requires_credential() {
    let t = offline();
    let resp = t
        .send(ApiRequest::post_multipart(POSTS_PATH, MultipartForm::new()))
        .await
        .unwrap();
    assert_eq!(resp.status, 401);
}

#[tokio::test]
async fn created_post_leads_the_feed() {
    let t = offline();
    let form = MultipartForm::new()
        .file("image", FilePart::new("bins.jpg", "image/jpeg", vec![0xff, 0xd8]))
        .text("description", "Overflowing bins")
        .text("location", "Market Square");
    let created = t
        .send(ApiRequest::post_multipart(POSTS_PATH, form).with_header(AUTHORIZATION, "Bearer T"))
        .await
        .unwrap();
    assert_eq!(created.status, 201);

    let list = t.send(ApiRequest::get(POSTS_PATH)).await.unwrap();
    let posts: Vec<Post> = list.decode().unwrap();
    assert_eq!(posts.len(), 11);
    assert_eq!(posts[0].description, "Overflowing bins");
    assert_eq!(posts[0].created_by.name, OFFLINE_AUTHOR);
    assert_eq!(posts[0].status, PostStatus::Unresolved);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let t = offline();
    let resp = t.send(ApiRequest::get("/comments")).await.unwrap();
    assert_eq!(resp.status, 404);
    assert_eq!(message(&resp), "Not found");
}
