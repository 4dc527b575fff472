//! # Vestibule (session client for the social feed)
//!
//! `vestibule` talks to the feed backend over cookie-credentialed HTTP and keeps
//! the client half of its session contract: an authentication flag plus the
//! CSRF token the server hands out.
//!
//! ## Session
//!
//! A [`session::Session`] is the single source of truth for the login state and
//! the CSRF token. It is owned by whoever drives the screens and passed
//! explicitly into every privileged call; nothing reads the token from cookies
//! or any other side channel.
//!
//! ## CSRF
//!
//! The token is read from the `csrf_token` field of the `/csrf-token` and
//! `/login` responses and sent back only in the `X-CSRF-Token` header. A
//! privileged request without a token fails locally and never reaches the
//! network.
//!
//! ## Screens
//!
//! [`screens`] holds one controller per screen (login, registration, logout,
//! home, support). Each turns user input into client calls and keeps the message
//! the user should see next. Errors never escape a screen.

pub mod api;
pub mod cli;
pub mod screens;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
