use super::{ApiClient, ApiError, error_from_body, message_or, send, types::SupportRequest};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{info_span, instrument};

const SEND_EMAIL_PATH: &str = "/send-email";

pub const SUPPORT_SUCCESS: &str = "Email sent successfully";
pub const SUPPORT_FAILED: &str = "Something went wrong.";

impl ApiClient {
    /// Uploads a support request, with its optional attachment, to the support host.
    ///
    /// # Errors
    /// Returns `ApiError::Io` if the attachment cannot be read, otherwise the
    /// server message on failure.
    #[instrument(skip_all)]
    pub async fn send_support_email(&self, request: &SupportRequest) -> Result<String, ApiError> {
        let mut form = Form::new()
            .text("email", request.email.clone())
            .text("message", request.message.clone());

        if let Some(path) = &request.attachment {
            form = form.part("attachment", attachment_part(path).await?);
        }

        let url = self.support_url(SEND_EMAIL_PATH);
        let span = info_span!("api.send_email", http.method = "POST", url = %url);
        let (status, body) = send(self.support_http.post(&url).multipart(form), span).await?;

        if !status.is_success() {
            return Err(error_from_body(status, &body, SUPPORT_FAILED));
        }

        Ok(message_or(&body, SUPPORT_SUCCESS))
    }
}

async fn attachment_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        ApiError::Io(format!(
            "Failed to read attachment {}: {err}",
            path.display()
        ))
    })?;

    let file_name = path
        .file_name()
        .map_or_else(|| "attachment".to_string(), |name| name.to_string_lossy().into_owned());

    Ok(Part::bytes(bytes).file_name(file_name))
}
