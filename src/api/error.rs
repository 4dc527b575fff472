use thiserror::Error;

/// Shown when the failure carries nothing the user can act on.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again later.";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    /// The server answered with a body that is not JSON; holds the raw text.
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("CSRF token is missing!")]
    MissingCsrfToken,
}

impl ApiError {
    /// Message a screen shows inline for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Malformed(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
            Self::Network(_) | Self::Timeout(_) | Self::Malformed(_) => GENERIC_FAILURE.to_string(),
            Self::MissingCsrfToken => self.to_string(),
            Self::Config(message) | Self::Parse(message) | Self::Io(message) => message.clone(),
        }
    }
}
