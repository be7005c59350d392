use super::*;
use crate::app::test_helpers::test_app;
use crate::net::ApiResponse;
use crate::notify::Level;
use crate::session::{USER_STORAGE_KEY, load_persisted};
use crate::storage::DurableStore;

fn form(identifier: &str, password: &str) -> LoginForm {
    LoginForm { identifier: identifier.to_owned(), password: password.to_owned() }
}

fn user_reply(name: &str) -> ApiResponse {
    ApiResponse::json(
        200,
        &serde_json::json!({ "user": { "_id": "1", "name": name, "email": name, "token": "Token" } }),
    )
}

#[tokio::test]
async fn login_sets_session_and_persists_json_record() {
    let (app, storage, transport) = test_app();
    transport.reply(user_reply("alice"));

    let user = login(&app, &form("alice", "secret")).await.unwrap();
    assert_eq!(user.name, "alice");
    assert_eq!(app.session.user().map(|u| u.name), Some("alice".to_owned()));

    let raw = storage.get(USER_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["name"], "alice");

    let toasts = app.notifier.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, Level::Success);
    assert_eq!(toasts[0].message, LOGIN_SUCCESS);
}

#[tokio::test]
async fn next_call_after_login_carries_token() {
    let (app, _, transport) = test_app();
    transport.reply(user_reply("alice"));
    login(&app, &form("alice", "secret")).await.unwrap();

    app.api.list_posts().await.ok();
    let sent = transport.sent();
    assert_eq!(sent[0].bearer_token(), None);
    assert_eq!(sent[1].bearer_token(), Some("Token"));
}

#[tokio::test]
async fn empty_identifier_is_rejected_first() {
    let (app, _, transport) = test_app();
    let err = login(&app, &form("", "")).await.unwrap_err();
    assert!(matches!(err, FlowError::Validation(ref m) if m == MISSING_IDENTIFIER));
    assert!(transport.sent().is_empty());
    assert_eq!(app.notifier.drain().len(), 1);
}

#[tokio::test]
async fn empty_password_is_rejected() {
    let (app, _, transport) = test_app();
    let err = login(&app, &form("alice", "")).await.unwrap_err();
    assert_eq!(err.to_string(), MISSING_PASSWORD);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn rejected_credentials_leave_session_empty() {
    let (app, storage, transport) = test_app();
    transport.reply(ApiResponse::json(401, &serde_json::json!({ "message": "Invalid credentials" })));

    let err = login(&app, &form("alice", "wrong")).await.unwrap_err();
    assert!(err.is_notified());
    assert!(app.session.user().is_none());
    assert_eq!(load_persisted(storage.as_ref()).unwrap(), None);
    assert_eq!(app.notifier.drain()[0].message, "Invalid credentials");
}

#[tokio::test]
async fn logout_after_login_clears_everything() {
    let (app, storage, transport) = test_app();
    transport.reply(user_reply("alice"));
    login(&app, &form("alice", "secret")).await.unwrap();

    logout(&app).unwrap();
    logout(&app).unwrap();
    assert!(app.session.user().is_none());
    assert_eq!(load_persisted(storage.as_ref()).unwrap(), None);
}
