use crate::session::Session;
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Logout,
    Register,
    Support,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Logout => "/logout",
            Self::Register => "/register",
            Self::Support => "/support",
        }
    }

    #[must_use]
    pub const fn requires_login(self) -> bool {
        matches!(self, Self::Home | Self::Logout)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('/') {
            "" => Ok(Self::Home),
            "/login" => Ok(Self::Login),
            "/logout" => Ok(Self::Logout),
            "/register" => Ok(Self::Register),
            "/support" => Ok(Self::Support),
            other => Err(format!("unknown route: {other}")),
        }
    }
}

/// Applies the login guard: guarded routes redirect to `/login` when logged out.
#[must_use]
pub const fn resolve(route: Route, session: &Session) -> Route {
    if route.requires_login() && !session.is_logged_in() {
        Route::Login
    } else {
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_routes_redirect_when_logged_out() {
        let session = Session::new();
        assert_eq!(resolve(Route::Home, &session), Route::Login);
        assert_eq!(resolve(Route::Logout, &session), Route::Login);
        assert_eq!(resolve(Route::Register, &session), Route::Register);
        assert_eq!(resolve(Route::Support, &session), Route::Support);
    }

    #[test]
    fn guarded_routes_open_when_logged_in() {
        let mut session = Session::new();
        session.mark_logged_in();
        assert_eq!(resolve(Route::Home, &session), Route::Home);
        assert_eq!(resolve(Route::Logout, &session), Route::Logout);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Logout,
            Route::Register,
            Route::Support,
        ] {
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
        assert_eq!("/login/".parse::<Route>(), Ok(Route::Login));
        assert!("/search".parse::<Route>().is_err());
    }
}
