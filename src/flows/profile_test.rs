use super::*;
use crate::model::User;
use crate::storage::MemoryStore;
use std::sync::Arc;

fn session_with(avatar: Option<&str>) -> SessionStore {
    let session = SessionStore::new(Arc::new(MemoryStore::new()));
    session.set_user(Some(User {
        id: "1".to_owned(),
        name: "alice".to_owned(),
        email: "alice@example.test".to_owned(),
        token: None,
        avatar: avatar.map(str::to_owned),
    }));
    session
}

#[test]
fn anonymous_sees_login_prompt() {
    let session = SessionStore::new(Arc::new(MemoryStore::new()));
    assert_eq!(profile(&session), ProfileView::Anonymous { message: LOGIN_REQUIRED });
}

#[test]
fn logged_in_sees_name_and_email() {
    let view = profile(&session_with(Some("https://cdn.example.test/a.png")));
    assert_eq!(
        view,
        ProfileView::User {
            name: "alice".to_owned(),
            email: "alice@example.test".to_owned(),
            avatar: "https://cdn.example.test/a.png".to_owned(),
        }
    );
}

#[test]
fn non_url_avatar_uses_placeholder() {
    let ProfileView::User { avatar, .. } = profile(&session_with(Some("string"))) else {
        panic!("expected user view");
    };
    assert_eq!(avatar, PLACEHOLDER_AVATAR);
}
