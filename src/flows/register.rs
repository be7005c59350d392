//! Four-step registration wizard.
//!
//! DESIGN
//! ======
//! Steps: name → identity (username, gender, date of birth) → contact
//! (mobile, email, password) → optional profile picture. `next` validates
//! only the current step and reports the first missing field; `submit` is
//! accepted only on the last step and sends everything as one multipart
//! form.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::fmt;
use std::str::FromStr;

use super::{FlowError, reject};
use crate::app::App;
use crate::net::{FilePart, MultipartForm};

pub const REGISTER_SUCCESS: &str = "Registered successfully! Please login.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegisterStep {
    #[default]
    Name,
    Identity,
    Contact,
    Picture,
}

impl RegisterStep {
    /// One-based position shown to the user.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Name => 1,
            Self::Identity => 2,
            Self::Contact => 3,
            Self::Picture => 4,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Name => Self::Identity,
            Self::Identity => Self::Contact,
            Self::Contact | Self::Picture => Self::Picture,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Name | Self::Identity => Self::Name,
            Self::Contact => Self::Identity,
            Self::Picture => Self::Contact,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
            Self::Other => f.write_str("other"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown gender '{0}' (expected male, female or other)")]
pub struct ParseGenderError(String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(ParseGenderError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub gender: Option<Gender>,
    /// Date of birth as entered, e.g. `2001-04-30`.
    pub dob: String,
    pub mobile: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    /// First validation message for `step`, if any.
    #[must_use]
    pub fn missing_in(&self, step: RegisterStep) -> Option<&'static str> {
        match step {
            RegisterStep::Name => {
                if self.first_name.is_empty() {
                    Some("Please enter your first name")
                } else if self.last_name.is_empty() {
                    Some("Please enter your last name")
                } else {
                    None
                }
            }
            RegisterStep::Identity => {
                if self.username.is_empty() {
                    Some("Please enter your username")
                } else if self.gender.is_none() {
                    Some("Please select gender")
                } else if self.dob.is_empty() {
                    Some("Please enter date of birth")
                } else {
                    None
                }
            }
            RegisterStep::Contact => {
                if self.mobile.is_empty() {
                    Some("Please enter mobile number")
                } else if self.email.is_empty() {
                    Some("Please enter email")
                } else if self.password.is_empty() {
                    Some("Please enter password")
                } else {
                    None
                }
            }
            RegisterStep::Picture => None,
        }
    }

    fn to_multipart(&self) -> MultipartForm {
        MultipartForm::new()
            .text("firstName", &self.first_name)
            .text("lastName", &self.last_name)
            .text("username", &self.username)
            .text("dob", &self.dob)
            .text("gender", self.gender.map(|g| g.to_string()).unwrap_or_default())
            .text("mobile", &self.mobile)
            .text("email", &self.email)
            .text("password", &self.password)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegisterWizard {
    step: RegisterStep,
    pub form: RegistrationForm,
    pub profile_pic: Option<FilePart>,
}

impl RegisterWizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> RegisterStep {
        self.step
    }

    /// Validate the current step and advance.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] with the first missing field of the
    /// current step; the step does not change.
    pub fn next(&mut self, app: &App) -> Result<RegisterStep, FlowError> {
        if let Some(message) = self.form.missing_in(self.step) {
            return Err(reject(&app.notifier, message));
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Go back one step; stays on the first step.
    pub fn prev(&mut self) -> RegisterStep {
        self.step = self.step.prev();
        self.step
    }

    /// Submit the completed form.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] when called before the last step
    /// and [`FlowError::Api`] when the server rejects the registration.
    pub async fn submit(&self, app: &App) -> Result<(), FlowError> {
        if self.step != RegisterStep::Picture {
            return Err(reject(&app.notifier, "Please complete every step before registering"));
        }

        let mut form = self.form.to_multipart();
        if let Some(pic) = &self.profile_pic {
            form = form.file("profilePic", pic.clone());
        }

        let busy = app.loading.begin();
        let result = app.api.register(form).await;
        drop(busy);
        result?;

        tracing::info!(username = %self.form.username, "registered");
        app.notifier.success(REGISTER_SUCCESS);
        Ok(())
    }
}
