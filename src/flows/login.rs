//! Login: validate, authenticate, then persist the session.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::{FlowError, reject};
use crate::app::App;
use crate::model::User;

pub const MISSING_IDENTIFIER: &str = "Please enter your username/email";
pub const MISSING_PASSWORD: &str = "Please enter your password";
pub const LOGIN_SUCCESS: &str = "Login successful";

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

/// Log in with `form`.
///
/// On success the user is set in the session, written to durable storage,
/// and a success notification is emitted.
///
/// # Errors
///
/// Returns [`FlowError::Validation`] for an empty identifier or password
/// (checked in that order), [`FlowError::Api`] when the server rejects the
/// credentials, or [`FlowError::Storage`] if the session cannot be persisted.
pub async fn login(app: &App, form: &LoginForm) -> Result<User, FlowError> {
    if form.identifier.is_empty() {
        return Err(reject(&app.notifier, MISSING_IDENTIFIER));
    }
    if form.password.is_empty() {
        return Err(reject(&app.notifier, MISSING_PASSWORD));
    }

    let user = app.api.login(&form.identifier, &form.password).await?;
    app.session.set_user(Some(user.clone()));
    app.session.persist(&user)?;
    tracing::info!(user = %user.name, "logged in");
    app.notifier.success(LOGIN_SUCCESS);
    Ok(user)
}

/// Log out, clearing memory and durable storage.
///
/// # Errors
///
/// Returns [`FlowError::Storage`] if the durable record cannot be removed.
pub fn logout(app: &App) -> Result<(), FlowError> {
    app.session.logout()?;
    Ok(())
}
