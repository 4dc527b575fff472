use crate::{api::ApiClient, cli::globals::GlobalArgs, screens::SupportScreen};
use anyhow::{Result, anyhow};
use std::{io::Write, path::PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: String,
    pub message: String,
    pub attachment: Option<PathBuf>,
}

/// Execute the send-email action.
/// # Errors
/// Returns an error if the client cannot be built or the support service rejects the request.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Global args: {:?}", args.globals);

    let client = ApiClient::new(&args.globals.api_config())?;

    let mut screen = SupportScreen::new();
    screen.email = args.email;
    screen.message = args.message;
    screen.attachment = args.attachment;

    if screen.submit(&client).await {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", screen.response().unwrap_or_default())?;
        Ok(())
    } else {
        Err(anyhow!(
            "{}",
            screen.error().unwrap_or("Support request failed")
        ))
    }
}
