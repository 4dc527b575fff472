//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{Action, send_email, shell};
use crate::cli::commands::{self, api};
use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use url::Url;

fn url_arg(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    let value = matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))?;

    let url = Url::parse(value.trim()).with_context(|| format!("invalid --{name}: {value}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "invalid --{name}: unsupported scheme {}",
            url.scheme()
        ));
    }

    Ok(value.trim().to_string())
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or a URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let mut globals = GlobalArgs::new(
        url_arg(matches, api::ARG_API_URL)?,
        url_arg(matches, api::ARG_SUPPORT_URL)?,
    );
    globals.set_timeout(matches.get_one::<u64>(api::ARG_TIMEOUT).copied());

    match matches.subcommand() {
        Some((commands::CMD_SEND_EMAIL, sub)) => Ok(Action::SendEmail(send_email::Args {
            globals,
            email: sub
                .get_one::<String>(commands::ARG_EMAIL)
                .cloned()
                .context("missing required argument: --email")?,
            message: sub
                .get_one::<String>(commands::ARG_MESSAGE)
                .cloned()
                .context("missing required argument: --message")?,
            attachment: sub.get_one::<PathBuf>(commands::ARG_ATTACHMENT).cloned(),
        })),
        _ => Ok(Action::Shell(shell::Args { globals })),
    }
}
