//! Session-aware calls: CSRF token fetch, login, logout, registration, email
//! verification and the protected resource. Calls that change or depend on the
//! session take it explicitly; privileged calls refuse to run without a token.

use super::{
    ApiClient, ApiError, CSRF_HEADER, decode_json, decode_optional_json, error_from_body,
    message_or, send,
    types::{
        CsrfTokenResponse, Credentials, LoginResponse, RegisterResponse, Registration,
        RegistrationRequest, VerifyEmailRequest,
    },
};
use crate::session::Session;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{info_span, instrument, warn};

const CSRF_TOKEN_PATH: &str = "/csrf-token";
const LOGIN_PATH: &str = "/login";
const LOGOUT_PATH: &str = "/logout";
const REGISTER_PATH: &str = "/register";
const VERIFY_EMAIL_PATH: &str = "/verify-email";
const PROTECTED_PATH: &str = "/protected";

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed!";
pub const LOGOUT_SUCCESS: &str = "Logout successful";
pub const LOGOUT_FAILED: &str = "Logout failed!";
pub const REGISTRATION_FAILED: &str = "Registration failed!";
pub const VERIFICATION_FAILED: &str = "Invalid verification code!";
pub const VERIFICATION_SUCCESS: &str = "Email verified successfully!";

impl ApiClient {
    /// Fetches a CSRF token and stores it in `session`.
    ///
    /// Any failure clears the stored token; the login flag is left alone.
    ///
    /// # Errors
    /// Returns an error on network failure, a non-success status, or a body
    /// without a `csrf_token`.
    #[instrument(skip_all)]
    pub async fn fetch_csrf_token(&self, session: &mut Session) -> Result<(), ApiError> {
        match self.request_csrf_token().await {
            Ok(token) => {
                session.set_csrf_token(token);
                Ok(())
            }
            Err(err) => {
                session.clear_csrf_token();
                Err(err)
            }
        }
    }

    async fn request_csrf_token(&self) -> Result<String, ApiError> {
        let url = self.api_url(CSRF_TOKEN_PATH);
        let span = info_span!("api.csrf_token", http.method = "GET", url = %url);
        let (status, body) = send(self.http.get(&url), span).await?;

        if !status.is_success() {
            return Err(error_from_body(status, &body, "Failed to fetch CSRF token"));
        }

        let response: CsrfTokenResponse = decode_json(&body)?;
        response
            .csrf_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                ApiError::Parse("Error parsing JSON response: no csrf_token found".to_string())
            })
    }

    /// Logs in with `credentials` and marks `session` as logged in.
    ///
    /// When the response carries no token a refresh is attempted; its failure
    /// is logged and does not undo the login.
    ///
    /// # Errors
    /// Returns the server message (or a fallback) on failure; the session is untouched.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(
        &self,
        session: &mut Session,
        credentials: &Credentials,
    ) -> Result<String, ApiError> {
        let url = self.api_url(LOGIN_PATH);
        let span = info_span!("api.login", http.method = "POST", url = %url);
        let request = self.http.post(&url).json(&credentials.payload());
        let (status, body) = send(request, span).await?;

        if !status.is_success() {
            return Err(error_from_body(status, &body, LOGIN_FAILED));
        }

        let response: LoginResponse = decode_optional_json(&body)?;
        session.mark_logged_in();

        match response.csrf_token {
            Some(token) if !token.trim().is_empty() => session.set_csrf_token(token),
            _ => {
                if let Err(err) = self.fetch_csrf_token(session).await {
                    warn!("Logged in without a CSRF token: {}", err);
                }
            }
        }

        Ok(response
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| LOGIN_SUCCESS.to_string()))
    }

    /// Logs out and resets `session`.
    ///
    /// # Errors
    /// Returns `ApiError::MissingCsrfToken` without sending anything when the
    /// session has no token, otherwise the server message on failure.
    #[instrument(skip_all)]
    pub async fn logout(&self, session: &mut Session) -> Result<String, ApiError> {
        let token = session.require_csrf_token()?.expose_secret().to_string();

        let url = self.api_url(LOGOUT_PATH);
        let span = info_span!("api.logout", http.method = "POST", url = %url);
        let request = self.http.post(&url).header(CSRF_HEADER, token);
        let (status, body) = send(request, span).await?;

        if !status.is_success() {
            return Err(error_from_body(status, &body, LOGOUT_FAILED));
        }

        session.reset();

        Ok(message_or(&body, LOGOUT_SUCCESS))
    }

    /// Submits a registration. The reply says whether a verification step follows.
    ///
    /// # Errors
    /// Returns `ApiError::Malformed` with the raw text when the body is not
    /// JSON, otherwise the server message on failure.
    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Registration, ApiError> {
        let url = self.api_url(REGISTER_PATH);
        let span = info_span!("api.register", http.method = "POST", url = %url);
        let (status, body) = send(self.http.post(&url).json(&request.payload()), span).await?;

        let json: Value = decode_json(&body)?;
        if !status.is_success() {
            return Err(error_from_body(status, &body, REGISTRATION_FAILED));
        }

        let response: RegisterResponse = serde_json::from_value(json)
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))?;

        Ok(Registration {
            message: response
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_default(),
            verification_required: response.verification_required.unwrap_or(true),
        })
    }

    /// Confirms an email address with the code the server sent.
    ///
    /// # Errors
    /// Returns `ApiError::Malformed` with the raw text when the body is not
    /// JSON, otherwise the server message on failure.
    #[instrument(skip_all)]
    pub async fn verify_email(&self, request: &VerifyEmailRequest) -> Result<String, ApiError> {
        let url = self.api_url(VERIFY_EMAIL_PATH);
        let span = info_span!("api.verify_email", http.method = "POST", url = %url);
        let (status, body) = send(self.http.post(&url).json(request), span).await?;

        decode_json::<Value>(&body)?;
        if !status.is_success() {
            return Err(error_from_body(status, &body, VERIFICATION_FAILED));
        }

        Ok(message_or(&body, VERIFICATION_SUCCESS))
    }

    /// Requests the protected resource as `username`.
    ///
    /// # Errors
    /// Returns `ApiError::MissingCsrfToken` without sending anything when the
    /// session has no token, otherwise the server message on failure.
    #[instrument(skip_all)]
    pub async fn protected(&self, session: &Session, username: &str) -> Result<String, ApiError> {
        let token = session.require_csrf_token()?.expose_secret().to_string();

        let url = self.api_url(PROTECTED_PATH);
        let span = info_span!("api.protected", http.method = "POST", url = %url);
        let request = self
            .http
            .post(&url)
            .header(CSRF_HEADER, token)
            .form(&[("username", username)]);
        let (status, body) = send(request, span).await?;

        if !status.is_success() {
            return Err(error_from_body(
                status,
                &body,
                "Failed to fetch protected resource",
            ));
        }

        Ok(message_or(&body, ""))
    }
}
