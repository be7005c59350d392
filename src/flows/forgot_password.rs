//! Three-step password reset: send code, verify code, set new password.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use super::{FlowError, reject};
use crate::app::App;

pub const MISSING_IDENTIFIER: &str = "Please enter your username or email";
pub const MISSING_CODE: &str = "Please enter the code sent to your email";
pub const MISSING_NEW_PASSWORD: &str = "Please enter your new password";
pub const CODE_SENT: &str = "Verification code sent to your email";
pub const CODE_VERIFIED: &str = "Code verified! Set your new password.";
pub const PASSWORD_UPDATED: &str = "Password updated! Please login.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetStep {
    #[default]
    SendCode,
    VerifyCode,
    NewPassword,
    /// Password changed; the user should log in again.
    Done,
}

#[derive(Clone, Debug, Default)]
pub struct PasswordReset {
    step: ResetStep,
    pub identifier: String,
    pub code: String,
    pub new_password: String,
}

impl PasswordReset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume at `step`, e.g. when the code arrived in a previous session.
    #[must_use]
    pub fn resume(step: ResetStep, identifier: impl Into<String>) -> Self {
        Self { step, identifier: identifier.into(), ..Self::default() }
    }

    #[must_use]
    pub const fn step(&self) -> ResetStep {
        self.step
    }

    /// Step 1: ask the server to email a verification code.
    ///
    /// # Errors
    ///
    /// Validation failure for an empty identifier; API failure otherwise.
    pub async fn send_code(&mut self, app: &App) -> Result<(), FlowError> {
        if self.identifier.is_empty() {
            return Err(reject(&app.notifier, MISSING_IDENTIFIER));
        }
        with_busy(app, app.api.forgot_password(&self.identifier)).await?;
        app.notifier.success(CODE_SENT);
        self.step = ResetStep::VerifyCode;
        Ok(())
    }

    /// Step 2: check the emailed code.
    ///
    /// # Errors
    ///
    /// Validation failure for an empty code; API failure otherwise.
    pub async fn verify_code(&mut self, app: &App) -> Result<(), FlowError> {
        if self.code.is_empty() {
            return Err(reject(&app.notifier, MISSING_CODE));
        }
        with_busy(app, app.api.verify_code(&self.identifier, &self.code)).await?;
        app.notifier.success(CODE_VERIFIED);
        self.step = ResetStep::NewPassword;
        Ok(())
    }

    /// Step 3: set the new password.
    ///
    /// # Errors
    ///
    /// Validation failure for an empty password; API failure otherwise.
    pub async fn set_password(&mut self, app: &App) -> Result<(), FlowError> {
        if self.new_password.is_empty() {
            return Err(reject(&app.notifier, MISSING_NEW_PASSWORD));
        }
        with_busy(app, app.api.reset_password(&self.identifier, &self.code, &self.new_password)).await?;
        app.notifier.success(PASSWORD_UPDATED);
        self.step = ResetStep::Done;
        Ok(())
    }

    /// Return to the previous step.
    pub fn back(&mut self) -> ResetStep {
        self.step = match self.step {
            ResetStep::SendCode | ResetStep::VerifyCode => ResetStep::SendCode,
            ResetStep::NewPassword => ResetStep::VerifyCode,
            ResetStep::Done => ResetStep::NewPassword,
        };
        self.step
    }
}

/// Keep the busy indicator raised for the whole of `call`, including when
/// the step is abandoned before it finishes.
async fn with_busy<T>(app: &App, call: impl Future<Output = T>) -> T {
    let _busy = app.loading.begin();
    call.await
}
