use super::router::Route;
use crate::{api::ApiClient, session::Session};
use tracing::debug;

pub const CONFIRM_PROMPT: &str = "Are you sure you want to log out?";

#[derive(Debug, Default)]
pub struct LogoutScreen {
    message: Option<String>,
}

impl LogoutScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Logs out and returns `/` on success. A missing token fails here
    /// without contacting the server.
    pub async fn confirm(&mut self, client: &ApiClient, session: &mut Session) -> Option<Route> {
        match client.logout(session).await {
            Ok(message) => {
                self.message = Some(message);
                Some(Route::Home)
            }
            Err(err) => {
                debug!("logout failed: {}", err);
                self.message = Some(err.user_message());
                None
            }
        }
    }
}
