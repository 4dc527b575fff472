use crate::cli::actions::{Action, send_email, shell};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Shell(args) => shell::execute(args).await,
        Action::SendEmail(args) => send_email::execute(args).await,
    }
}
