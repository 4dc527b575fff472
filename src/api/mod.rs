//! HTTP client for the feed backend. One `ApiClient` is built per front end and
//! keeps a cookie store so every call to the API host carries the session
//! cookie. The client never stores the CSRF token itself; callers pass the
//! [`Session`](crate::session::Session) that owns it.

mod auth;
mod error;
mod support;
pub mod types;

pub use self::auth::{
    LOGIN_FAILED, LOGIN_SUCCESS, LOGOUT_FAILED, LOGOUT_SUCCESS, REGISTRATION_FAILED,
    VERIFICATION_FAILED, VERIFICATION_SUCCESS,
};
pub use self::error::{ApiError, GENERIC_FAILURE};
pub use self::support::{SUPPORT_FAILED, SUPPORT_SUCCESS};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{Instrument, Span, debug};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SUPPORT_BASE_URL: &str = "http://localhost:8000";

/// Header carrying the CSRF token on privileged requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub support_base_url: String,
    /// No timeout unless set; the transport default applies.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            support_base_url: DEFAULT_SUPPORT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_support_base_url(mut self, url: impl Into<String>) -> Self {
        self.support_base_url = url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    support_http: Client,
    api_base_url: String,
    support_base_url: String,
}

impl ApiClient {
    /// Builds the HTTP clients for the API and support hosts.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if a base URL is invalid or a client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let api_base_url = validate_base_url(&config.api_base_url)?;
        let support_base_url = validate_base_url(&config.support_base_url)?;

        let mut builder = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .cookie_store(true);
        // Support requests go out without credentials.
        let mut support_builder = Client::builder().user_agent(crate::APP_USER_AGENT);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
            support_builder = support_builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;
        let support_http = support_builder
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        debug!("api base URL: {}, support base URL: {}", api_base_url, support_base_url);

        Ok(Self {
            http,
            support_http,
            api_base_url,
            support_base_url,
        })
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn support_base_url(&self) -> &str {
        &self.support_base_url
    }

    fn api_url(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }

    fn support_url(&self, path: &str) -> String {
        build_url_with_base(&self.support_base_url, path)
    }
}

fn validate_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim();
    let url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("Invalid base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ApiError::Config(format!(
                "Invalid base URL {trimmed}: unsupported scheme {scheme}"
            )));
        }
    }

    if url.host().is_none() {
        return Err(ApiError::Config(format!(
            "Invalid base URL {trimmed}: no host specified"
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `ApiError` variants with timeout detection.
fn map_request_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Sends a request inside `span` and reads the whole body as text.
async fn send(request: RequestBuilder, span: Span) -> Result<(StatusCode, String), ApiError> {
    async move {
        let response: Response = request
            .send()
            .await
            .map_err(|err| map_request_error(&err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| map_request_error(&err))?;
        debug!(status = status.as_u16(), "response received");
        Ok((status, body))
    }
    .instrument(span)
    .await
}

/// Extracts a non-empty `message` field from a JSON body.
fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}

/// Trims and truncates a raw body for display; `None` when blank.
fn sanitize_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(MAX_ERROR_CHARS).collect())
    }
}

/// Server message from a JSON or plain-text body, falling back to `fallback`.
fn message_or(body: &str, fallback: &str) -> String {
    message_from_body(body)
        .or_else(|| {
            if serde_json::from_str::<Value>(body).is_ok() {
                None
            } else {
                sanitize_body(body)
            }
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// Converts a non-success response into `ApiError::Http`.
fn error_from_body(status: StatusCode, body: &str, fallback: &str) -> ApiError {
    ApiError::Http {
        status: status.as_u16(),
        message: message_or(body, fallback),
    }
}

/// Decodes a JSON body, surfacing anything else as the sanitized raw text.
fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|_| ApiError::Malformed(sanitize_body(body).unwrap_or_default()))
}

/// Like `decode_json` but an empty body decodes to the default value.
fn decode_optional_json<T: DeserializeOwned + Default>(body: &str) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        Ok(T::default())
    } else {
        decode_json(body)
    }
}
