//! Two-step sign-up: the account form, then the emailed verification code.
//! The screen owns the transient registration attempt; it is dropped with the
//! screen once the address is verified or the user navigates away.

use super::{router::Route, validation};
use crate::api::{
    ApiClient,
    types::{RegistrationRequest, VerifyEmailRequest},
};
use tracing::debug;

pub const CODE_SENT: &str = "A verification code has been sent to your email.";
pub const VERIFIED: &str = "Email verified successfully! Redirecting to login...";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    Form,
    Verification { email: String },
    Verified,
}

#[derive(Default)]
pub struct RegistrationScreen {
    pub username: String,
    pub email: String,
    pub password: String,
    pub code: String,
    step: Step,
    message: Option<String>,
}

impl std::fmt::Debug for RegistrationScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationScreen")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("step", &self.step)
            .field("message", &self.message)
            .finish()
    }
}

impl RegistrationScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> &Step {
        &self.step
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Local checks run before anything is sent; returns the message to show.
    fn validate_form(&self) -> Option<&'static str> {
        if !validation::all_present(&[&self.username, &self.email, &self.password]) {
            Some(validation::REQUIRED_FIELDS)
        } else if !validation::valid_email(&self.email) {
            Some(validation::INVALID_EMAIL)
        } else if !validation::valid_password(&self.password) {
            Some(validation::SHORT_PASSWORD)
        } else {
            None
        }
    }

    /// Submits the account form. On success the screen moves to the
    /// verification step (or straight to `Verified` when the server needs no code).
    pub async fn sign_up(&mut self, client: &ApiClient) {
        if self.step != Step::Form {
            return;
        }
        if let Some(problem) = self.validate_form() {
            self.message = Some(problem.to_string());
            return;
        }

        let request = RegistrationRequest::new(
            self.username.clone(),
            self.email.clone(),
            self.password.clone(),
        );

        match client.register(&request).await {
            Ok(registration) => {
                self.password.clear();
                if registration.verification_required {
                    self.message = Some(if registration.message.is_empty() {
                        CODE_SENT.to_string()
                    } else {
                        registration.message
                    });
                    self.step = Step::Verification {
                        email: self.email.clone(),
                    };
                } else {
                    self.message = Some(registration.message).filter(|m| !m.is_empty());
                    self.step = Step::Verified;
                }
            }
            Err(err) => {
                debug!("registration failed: {}", err);
                self.message = Some(err.user_message());
            }
        }
    }

    /// Submits the verification code. Returns `/login` once verified; a wrong
    /// code keeps the screen on the verification step.
    pub async fn verify(&mut self, client: &ApiClient) -> Option<Route> {
        let Step::Verification { email } = &self.step else {
            return None;
        };

        let code = self.code.trim().to_string();
        if code.is_empty() {
            self.message = Some(validation::MISSING_CODE.to_string());
            return None;
        }

        let request = VerifyEmailRequest {
            email: email.clone(),
            code,
        };

        match client.verify_email(&request).await {
            Ok(_) => {
                self.message = Some(VERIFIED.to_string());
                self.step = Step::Verified;
                Some(Route::Login)
            }
            Err(err) => {
                debug!("verification failed: {}", err);
                self.message = Some(err.user_message());
                None
            }
        }
    }
}
