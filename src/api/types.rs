//! Request and response payloads for the feed backend. Inputs that carry a
//! password hold it as a `SecretString`; the borrowed wire payloads expose it
//! only for the duration of serialization.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub(crate) fn payload(&self) -> LoginPayload<'_> {
        LoginPayload {
            username: &self.username,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Debug)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl RegistrationRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub(crate) fn payload(&self) -> RegisterPayload<'_> {
        RegisterPayload {
            username: &self.username,
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, Default)]
pub struct SupportRequest {
    pub email: String,
    pub message: String,
    pub attachment: Option<PathBuf>,
}

#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RegisterPayload<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CsrfTokenResponse {
    #[serde(default)]
    pub csrf_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub verification_required: Option<bool>,
}

/// Outcome of a successful registration call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub message: String,
    pub verification_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_payload_matches_wire_format() {
        let credentials = Credentials::new("bob", "secret1");
        let json = serde_json::to_value(credentials.payload()).expect("Failed to serialize");
        assert_eq!(
            json,
            serde_json::json!({"username": "bob", "password": "secret1"})
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials::new("bob", "secret1");
        assert!(!format!("{credentials:?}").contains("secret1"));

        let request = RegistrationRequest::new("a", "a@b.com", "123456");
        assert!(!format!("{request:?}").contains("123456"));
    }

    #[test]
    fn register_response_tolerates_extra_fields() {
        let response: RegisterResponse = serde_json::from_str(
            r#"{"success": true, "message": "Confirmation email sent! Check your inbox."}"#,
        )
        .expect("Failed to deserialize");
        assert_eq!(
            response.message.as_deref(),
            Some("Confirmation email sent! Check your inbox.")
        );
        assert_eq!(response.verification_required, None);
    }
}
