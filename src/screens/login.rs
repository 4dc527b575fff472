use super::{router::Route, validation};
use crate::{
    api::{ApiClient, types::Credentials},
    session::Session,
};
use tracing::debug;

#[derive(Default)]
pub struct LoginScreen {
    pub username: String,
    pub password: String,
    message: Option<String>,
}

impl std::fmt::Debug for LoginScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginScreen")
            .field("username", &self.username)
            .field("password", &"***")
            .field("message", &self.message)
            .finish()
    }
}

impl LoginScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Logs in with the entered credentials. Returns the route to show next
    /// on success; on failure the message explains why.
    pub async fn submit(&mut self, client: &ApiClient, session: &mut Session) -> Option<Route> {
        if !validation::all_present(&[&self.username, &self.password]) {
            self.message = Some(validation::REQUIRED_FIELDS.to_string());
            return None;
        }

        let credentials = Credentials::new(self.username.clone(), self.password.clone());

        match client.login(session, &credentials).await {
            Ok(message) => {
                self.message = Some(message);
                Some(Route::Home)
            }
            Err(err) => {
                debug!("login failed: {}", err);
                self.message = Some(err.user_message());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use anyhow::Result;

    #[tokio::test]
    async fn missing_fields_issue_no_request() -> Result<()> {
        // Nothing listens here; a request would surface as a network error.
        let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9"))?;
        let mut session = Session::new();

        for (username, password) in [("", "secret1"), ("bob", ""), ("", "")] {
            let mut screen = LoginScreen {
                username: username.to_string(),
                password: password.to_string(),
                message: None,
            };
            let next = screen.submit(&client, &mut session).await;

            assert_eq!(next, None);
            assert_eq!(screen.message(), Some("All fields are required!"));
            assert!(!session.is_logged_in());
        }
        Ok(())
    }

    #[tokio::test]
    async fn network_failure_shows_generic_message() -> Result<()> {
        let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9"))?;
        let mut session = Session::new();
        let mut screen = LoginScreen {
            username: "bob".to_string(),
            password: "secret1".to_string(),
            message: None,
        };

        let next = screen.submit(&client, &mut session).await;

        assert_eq!(next, None);
        assert_eq!(
            screen.message(),
            Some("An error occurred. Please try again later.")
        );
        Ok(())
    }
}
