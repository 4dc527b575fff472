use crate::api::{DEFAULT_API_BASE_URL, DEFAULT_SUPPORT_BASE_URL};
use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SUPPORT_URL: &str = "support-url";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the feed API (http(s)://host:port)")
                .env("VESTIBULE_API_URL")
                .global(true)
                .default_value(DEFAULT_API_BASE_URL),
        )
        .arg(
            Arg::new(ARG_SUPPORT_URL)
                .long(ARG_SUPPORT_URL)
                .help("Base URL of the support mail service")
                .env("VESTIBULE_SUPPORT_URL")
                .global(true)
                .default_value(DEFAULT_SUPPORT_BASE_URL),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds (default: none)")
                .env("VESTIBULE_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
