use super::validation;
use crate::api::{ApiClient, types::SupportRequest};
use std::path::PathBuf;
use tracing::debug;

/// Support request form. Success and error messages are kept apart, and a
/// successful send clears the form.
#[derive(Debug, Default)]
pub struct SupportScreen {
    pub email: String,
    pub message: String,
    pub attachment: Option<PathBuf>,
    response: Option<String>,
    error: Option<String>,
}

impl SupportScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sends the form. Returns true when the server accepted it.
    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        self.response = None;
        self.error = None;

        if !validation::all_present(&[self.email.trim(), self.message.trim()]) {
            self.error = Some(validation::REQUIRED_FIELDS.to_string());
            return false;
        }

        let request = SupportRequest {
            email: self.email.clone(),
            message: self.message.clone(),
            attachment: self.attachment.clone(),
        };

        match client.send_support_email(&request).await {
            Ok(response) => {
                self.response = Some(response);
                self.email.clear();
                self.message.clear();
                self.attachment = None;
                true
            }
            Err(err) => {
                debug!("support request failed: {}", err);
                self.error = Some(err.user_message());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use anyhow::Result;
    use serde_json::json;
    use std::{io::Write, net::TcpListener};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_locally() -> Result<()> {
        let client = ApiClient::new(&ApiConfig::default().with_support_base_url("http://127.0.0.1:9"))?;
        let mut screen = SupportScreen {
            email: "a@b.com".to_string(),
            message: "   ".to_string(),
            ..SupportScreen::default()
        };

        assert!(!screen.submit(&client).await);
        assert_eq!(screen.error(), Some(validation::REQUIRED_FIELDS));
        assert_eq!(screen.response(), None);
        assert_eq!(screen.email, "a@b.com");
        Ok(())
    }

    #[tokio::test]
    async fn successful_send_clears_the_form() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/send-email"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Email sent successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "trace id 42")?;

        let client =
            ApiClient::new(&ApiConfig::default().with_support_base_url(server.uri()))?;
        let mut screen = SupportScreen::new();
        screen.email = "a@b.com".to_string();
        screen.message = "The feed does not load".to_string();
        screen.attachment = Some(file.path().to_path_buf());

        assert!(screen.submit(&client).await);
        assert_eq!(screen.response(), Some("Email sent successfully"));
        assert_eq!(screen.error(), None);
        assert!(screen.email.is_empty());
        assert!(screen.message.is_empty());
        assert_eq!(screen.attachment, None);
        Ok(())
    }

    #[tokio::test]
    async fn failed_send_keeps_the_form() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/send-email"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "status": "error",
                "message": "Something went wrong."
            })))
            .mount(&server)
            .await;

        let client =
            ApiClient::new(&ApiConfig::default().with_support_base_url(server.uri()))?;
        let mut screen = SupportScreen::new();
        screen.email = "a@b.com".to_string();
        screen.message = "The feed does not load".to_string();

        assert!(!screen.submit(&client).await);
        assert_eq!(screen.error(), Some("Something went wrong."));
        assert_eq!(screen.response(), None);
        assert_eq!(screen.email, "a@b.com");
        Ok(())
    }
}
