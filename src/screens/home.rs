//! Home feed. The feed is a fixed placeholder until the backend serves posts;
//! the header offers login or logout depending on the session.

use super::{logout::LogoutScreen, router::Route};
use crate::{api::ApiClient, session::Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Post {
    pub author: &'static str,
    pub age: &'static str,
    pub body: &'static str,
    pub likes: u32,
    pub comments: u32,
    pub reposts: u32,
}

const PLACEHOLDER_FEED: [Post; 2] = [
    Post {
        author: "@nishajwrites",
        age: "11h",
        body: "If he didn't mean it that way how come he hasn't apologized?",
        likes: 479,
        comments: 7,
        reposts: 36,
    },
    Post {
        author: "@morallygreykay",
        age: "16h",
        body: "If you're really paying attention...",
        likes: 704,
        comments: 9,
        reposts: 55,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderAction {
    LogIn,
    LogOut,
}

#[derive(Debug, Default)]
pub struct HomeScreen {
    logout: LogoutScreen,
}

impl HomeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn posts(&self) -> &'static [Post] {
        &PLACEHOLDER_FEED
    }

    #[must_use]
    pub const fn header_action(&self, session: &Session) -> HeaderAction {
        if session.is_logged_in() {
            HeaderAction::LogOut
        } else {
            HeaderAction::LogIn
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.logout.message()
    }

    /// Same behavior as confirming on the logout screen.
    pub async fn log_out(&mut self, client: &ApiClient, session: &mut Session) -> Option<Route> {
        self.logout.confirm(client, session).await
    }
}

impl Post {
    /// One-line rendering used by text front ends.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} {}: {} [likes {} | comments {} | reposts {}]",
            self.author, self.age, self.body, self.likes, self.comments, self.reposts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_action_follows_session() {
        let home = HomeScreen::new();
        let mut session = Session::new();
        assert_eq!(home.header_action(&session), HeaderAction::LogIn);

        session.mark_logged_in();
        assert_eq!(home.header_action(&session), HeaderAction::LogOut);
    }

    #[test]
    fn placeholder_feed_renders() {
        let home = HomeScreen::new();
        let rendered: Vec<String> = home.posts().iter().map(Post::render).collect();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].starts_with("@nishajwrites 11h:"));
        assert!(rendered[1].contains("likes 704"));
    }
}
