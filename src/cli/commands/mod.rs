pub mod api;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_SHELL: &str = "shell";
pub const CMD_SEND_EMAIL: &str = "send-email";

pub const ARG_EMAIL: &str = "email";
pub const ARG_MESSAGE: &str = "message";
pub const ARG_ATTACHMENT: &str = "attachment";

fn send_email_command() -> Command {
    Command::new(CMD_SEND_EMAIL)
        .about("Send a support request to the support mail service")
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Reply-to email address")
                .required(true),
        )
        .arg(
            Arg::new(ARG_MESSAGE)
                .short('m')
                .long(ARG_MESSAGE)
                .help("Message body")
                .required(true),
        )
        .arg(
            Arg::new(ARG_ATTACHMENT)
                .short('a')
                .long(ARG_ATTACHMENT)
                .help("Optional file to attach")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("vestibule")
        .about("Session client for the vestibule social feed")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand(Command::new(CMD_SHELL).about("Interactive session (default)"))
        .subcommand(send_email_command());

    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "vestibule");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Session client for the vestibule social feed".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("VESTIBULE_API_URL", None::<&str>),
                ("VESTIBULE_SUPPORT_URL", None::<&str>),
                ("VESTIBULE_TIMEOUT", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from(vec!["vestibule"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_URL).cloned(),
                    Some("http://localhost:8080".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(api::ARG_SUPPORT_URL).cloned(),
                    Some("http://localhost:8000".to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT), None);
                assert_eq!(matches.subcommand_name(), None);
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("VESTIBULE_API_URL", Some("https://api.vestibule.dev")),
                ("VESTIBULE_SUPPORT_URL", Some("https://support.vestibule.dev")),
                ("VESTIBULE_TIMEOUT", Some("15")),
                ("VESTIBULE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["vestibule", "shell"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_URL).cloned(),
                    Some("https://api.vestibule.dev".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(api::ARG_SUPPORT_URL).cloned(),
                    Some("https://support.vestibule.dev".to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(15));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                assert_eq!(matches.subcommand_name(), Some(CMD_SHELL));
            },
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        temp_env::with_vars([("VESTIBULE_TIMEOUT", None::<&str>)], || {
            let result = new().try_get_matches_from(vec!["vestibule", "--timeout", "0"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_send_email_args() {
        let matches = new().get_matches_from(vec![
            "vestibule",
            "send-email",
            "--email",
            "a@b.com",
            "--message",
            "The feed does not load",
            "--attachment",
            "/tmp/trace.log",
        ]);

        let Some((CMD_SEND_EMAIL, sub)) = matches.subcommand() else {
            panic!("expected send-email subcommand");
        };
        assert_eq!(
            sub.get_one::<String>(ARG_EMAIL).cloned(),
            Some("a@b.com".to_string())
        );
        assert_eq!(
            sub.get_one::<std::path::PathBuf>(ARG_ATTACHMENT).cloned(),
            Some(std::path::PathBuf::from("/tmp/trace.log"))
        );
    }

    #[test]
    fn test_send_email_requires_message() {
        let result =
            new().try_get_matches_from(vec!["vestibule", "send-email", "--email", "a@b.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("VESTIBULE_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["vestibule"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("VESTIBULE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["vestibule".to_string()];

                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
