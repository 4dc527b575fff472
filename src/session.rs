//! Client-held session state: whether the user is logged in and the CSRF token
//! the server issued. There is exactly one `Session` per running front end and
//! it is passed by reference into every call that reads or changes it. The
//! token is kept as a `SecretString` and redacted from `Debug` output.

use crate::api::ApiError;
use secrecy::{ExposeSecret, SecretString};

#[derive(Default)]
pub struct Session {
    logged_in: bool,
    csrf_token: Option<SecretString>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    #[must_use]
    pub const fn has_csrf_token(&self) -> bool {
        self.csrf_token.is_some()
    }

    /// Returns the token for a privileged request.
    ///
    /// # Errors
    /// Returns `ApiError::MissingCsrfToken` when no token has been stored.
    pub fn require_csrf_token(&self) -> Result<&SecretString, ApiError> {
        self.csrf_token.as_ref().ok_or(ApiError::MissingCsrfToken)
    }

    /// Stores a token issued by the server. Blank values are ignored.
    pub fn set_csrf_token(&mut self, token: impl Into<String>) {
        let token: String = token.into();
        let token = token.trim();
        if !token.is_empty() {
            self.csrf_token = Some(SecretString::from(token.to_string()));
        }
    }

    /// Drops the token after a failed fetch; the login flag is kept.
    pub fn clear_csrf_token(&mut self) {
        self.csrf_token = None;
    }

    pub fn mark_logged_in(&mut self) {
        self.logged_in = true;
    }

    /// Back to the logged-out state with no token.
    pub fn reset(&mut self) {
        self.logged_in = false;
        self.csrf_token = None;
    }

    /// Compares the stored token without exposing it to callers.
    #[must_use]
    pub fn csrf_token_matches(&self, candidate: &str) -> bool {
        self.csrf_token
            .as_ref()
            .is_some_and(|token| token.expose_secret() == candidate)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.logged_in)
            .field(
                "csrf_token",
                &self.csrf_token.as_ref().map(|_| "***"),
            )
            .finish()
    }
}
