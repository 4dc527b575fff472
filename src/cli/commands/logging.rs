use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn parse_level(level: &str) -> Result<u8, String> {
    let level = level.trim();
    if let Ok(count) = level.parse::<u8>() {
        return if usize::from(count) < LEVELS.len() {
            Ok(count)
        } else {
            Err(format!("log level out of range: {count}"))
        };
    }

    LEVELS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level: {level} (expected one of {})", LEVELS.join(", ")))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log verbosity; repeat -v or set error, warn, info, debug, trace (default: error)")
            .env("VESTIBULE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_map_to_counts() {
        assert_eq!(parse_level("error"), Ok(0));
        assert_eq!(parse_level("INFO"), Ok(2));
        assert_eq!(parse_level(" trace "), Ok(4));
    }

    #[test]
    fn numeric_levels_are_bounded() {
        assert_eq!(parse_level("3"), Ok(3));
        assert!(parse_level("5").is_err());
    }

    #[test]
    fn unknown_level_lists_choices() {
        let err = parse_level("loud").err().unwrap_or_default();
        assert!(err.contains("error, warn, info, debug, trace"));
    }
}
