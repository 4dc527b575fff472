//! Screen controllers. Each screen holds its own input fields and the message
//! to show next, calls the [`ApiClient`](crate::api::ApiClient), and never lets
//! an error escape. Screens do not talk to each other; navigation is expressed
//! as the [`Route`] a submit returns.
//!
//! Submits borrow the screen and the session mutably for the whole request, so
//! a second submit cannot start while one is in flight.

pub mod home;
pub mod login;
pub mod logout;
pub mod registration;
pub mod router;
pub mod support;
pub mod validation;

pub use self::home::HomeScreen;
pub use self::login::LoginScreen;
pub use self::logout::LogoutScreen;
pub use self::registration::{RegistrationScreen, Step};
pub use self::router::{Route, resolve};
pub use self::support::SupportScreen;
