//! Interactive session. One `Shell` owns the client, the session and every
//! screen for the lifetime of the process; each input line is a command that
//! drives one screen and prints what that screen would show.

use crate::{
    api::ApiClient,
    cli::globals::GlobalArgs,
    screens::{
        HomeScreen, LoginScreen, LogoutScreen, RegistrationScreen, Route, Step, SupportScreen,
        home::{HeaderAction, Post},
        logout::CONFIRM_PROMPT,
        resolve,
    },
    session::Session,
};
use anyhow::Result;
use std::{io::Write, path::PathBuf, str::FromStr};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

const HELP: &[&str] = &[
    "login <username> <password>          log in",
    "logout                               log out",
    "register <username> <email> <pass>   create an account",
    "verify <code>                        confirm the emailed code",
    "home                                 show the feed",
    "protected [username]                 call the protected resource",
    "refresh                              fetch a new CSRF token",
    "attach <path>                        attach a file to the next support request",
    "support <email> <message...>         send a support request",
    "status                               show session state",
    "go <path>                            navigate to /, /login, /logout, /register or /support",
    "help                                 show this list",
    "quit                                 leave",
];

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Login { username: String, password: String },
    Logout,
    Register { username: String, email: String, password: String },
    Verify { code: String },
    Home,
    Protected { username: Option<String> },
    Refresh,
    Attach { path: PathBuf },
    Support { email: String, message: String },
    Status,
    Go(Route),
    Help,
    Quit,
}

fn usage(name: &str) -> String {
    let usage = match name {
        "login" => "login <username> <password>",
        "logout" => "logout",
        "register" => "register <username> <email> <password>",
        "verify" => "verify <code>",
        "protected" => "protected [username]",
        "attach" => "attach <path>",
        "support" => "support <email> <message...>",
        "go" => "go <path>",
        "home" | "refresh" | "status" | "help" | "quit" => name,
        _ => return format!("unknown command: {name}"),
    };
    format!("usage: {usage}")
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err("empty command".to_string());
        };
        let name = name.to_lowercase();
        let args: Vec<&str> = parts.collect();

        match (name.as_str(), args.as_slice()) {
            ("login", [username, password]) => Ok(Self::Login {
                username: (*username).to_string(),
                password: (*password).to_string(),
            }),
            ("logout", []) => Ok(Self::Logout),
            ("register", [username, email, password]) => Ok(Self::Register {
                username: (*username).to_string(),
                email: (*email).to_string(),
                password: (*password).to_string(),
            }),
            ("verify", [code]) => Ok(Self::Verify {
                code: (*code).to_string(),
            }),
            ("home", []) => Ok(Self::Home),
            ("protected", []) => Ok(Self::Protected { username: None }),
            ("protected", [username]) => Ok(Self::Protected {
                username: Some((*username).to_string()),
            }),
            ("refresh", []) => Ok(Self::Refresh),
            ("attach", [path]) => Ok(Self::Attach {
                path: PathBuf::from(path),
            }),
            ("support", [email, message @ ..]) if !message.is_empty() => Ok(Self::Support {
                email: (*email).to_string(),
                message: message.join(" "),
            }),
            ("status", []) => Ok(Self::Status),
            ("go", [path]) => path.parse().map(Self::Go),
            ("help", []) => Ok(Self::Help),
            ("quit" | "exit", []) => Ok(Self::Quit),
            (name, _) => Err(usage(name)),
        }
    }
}

/// Lines to print after a command, and whether the shell should stop.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            quit: false,
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

pub struct Shell {
    client: ApiClient,
    session: Session,
    route: Route,
    login: LoginScreen,
    registration: RegistrationScreen,
    logout: LogoutScreen,
    home: HomeScreen,
    support: SupportScreen,
    username: Option<String>,
}

impl Shell {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let session = Session::new();
        let route = resolve(Route::Home, &session);
        Self {
            client,
            session,
            route,
            login: LoginScreen::new(),
            registration: RegistrationScreen::new(),
            logout: LogoutScreen::new(),
            home: HomeScreen::new(),
            support: SupportScreen::new(),
            username: None,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub const fn registration(&self) -> &RegistrationScreen {
        &self.registration
    }

    /// Fetches the initial CSRF token. Failure is logged and the shell carries on.
    pub async fn start(&mut self) {
        match self.client.fetch_csrf_token(&mut self.session).await {
            Ok(()) => info!("CSRF token fetched"),
            Err(err) => warn!("Failed to fetch CSRF token: {}", err),
        }
    }

    /// Moves to `route` after the login guard; leaving `/register` drops the
    /// registration attempt.
    fn navigate(&mut self, route: Route) -> Route {
        let target = resolve(route, &self.session);
        if self.route == Route::Register && target != Route::Register {
            self.registration = RegistrationScreen::new();
        }
        self.route = target;
        target
    }

    fn redirect_notice(requested: Route, landed: Route) -> Option<String> {
        (requested != landed).then(|| format!("{requested} requires login; showing {landed}"))
    }

    pub async fn handle(&mut self, command: ShellCommand) -> Reply {
        match command {
            ShellCommand::Login { username, password } => self.login(username, password).await,
            ShellCommand::Logout => self.logout().await,
            ShellCommand::Register {
                username,
                email,
                password,
            } => self.register(username, email, password).await,
            ShellCommand::Verify { code } => self.verify(code).await,
            ShellCommand::Home => self.show_home(),
            ShellCommand::Protected { username } => self.protected(username).await,
            ShellCommand::Refresh => self.refresh().await,
            ShellCommand::Attach { path } => {
                let reply = Reply::line(format!("Attachment set: {}", path.display()));
                self.support.attachment = Some(path);
                reply
            }
            ShellCommand::Support { email, message } => self.send_support(email, message).await,
            ShellCommand::Status => self.status(),
            ShellCommand::Go(route) => {
                let landed = self.navigate(route);
                Reply::line(
                    Self::redirect_notice(route, landed).unwrap_or_else(|| format!("At {landed}")),
                )
            }
            ShellCommand::Help => Reply {
                lines: HELP.iter().map(ToString::to_string).collect(),
                quit: false,
            },
            ShellCommand::Quit => Reply {
                lines: Vec::new(),
                quit: true,
            },
        }
    }

    async fn login(&mut self, username: String, password: String) -> Reply {
        self.navigate(Route::Login);
        self.login.username = username;
        self.login.password = password;

        let next = self.login.submit(&self.client, &mut self.session).await;
        self.login.password.clear();

        let mut reply = Reply::line(self.login.message().unwrap_or_default());
        if let Some(route) = next {
            self.username = Some(self.login.username.clone());
            let landed = self.navigate(route);
            reply.push(format!("At {landed}"));
        }
        reply
    }

    async fn logout(&mut self) -> Reply {
        let next = if self.route == Route::Home {
            self.home.log_out(&self.client, &mut self.session).await
        } else {
            let landed = self.navigate(Route::Logout);
            if landed != Route::Logout {
                return Reply::line(
                    Self::redirect_notice(Route::Logout, landed).unwrap_or_default(),
                );
            }
            self.logout.confirm(&self.client, &mut self.session).await
        };

        let message = if self.route == Route::Home {
            self.home.message()
        } else {
            self.logout.message()
        };
        let mut reply = Reply::line(message.unwrap_or_default());

        if let Some(route) = next {
            self.username = None;
            let landed = self.navigate(route);
            reply.push(format!("At {landed}"));
        }
        reply
    }

    async fn register(&mut self, username: String, email: String, password: String) -> Reply {
        self.navigate(Route::Register);
        if self.registration.step() != &Step::Form {
            self.registration = RegistrationScreen::new();
        }
        self.registration.username = username;
        self.registration.email = email;
        self.registration.password = password;

        self.registration.sign_up(&self.client).await;

        let mut reply = Reply::line(self.registration.message().unwrap_or_default());
        if matches!(self.registration.step(), Step::Verification { .. }) {
            reply.push("Enter the code with: verify <code>");
        }
        reply
    }

    async fn verify(&mut self, code: String) -> Reply {
        if !matches!(self.registration.step(), Step::Verification { .. }) {
            return Reply::line("Nothing to verify; register first.");
        }
        self.registration.code = code;

        let next = self.registration.verify(&self.client).await;
        let mut reply = Reply::line(self.registration.message().unwrap_or_default());

        if let Some(route) = next {
            let landed = self.navigate(route);
            reply.push(format!("At {landed}"));
        }
        reply
    }

    fn show_home(&mut self) -> Reply {
        let landed = self.navigate(Route::Home);
        if let Some(notice) = Self::redirect_notice(Route::Home, landed) {
            return Reply::line(notice);
        }

        let mut reply = Reply::line(match self.home.header_action(&self.session) {
            HeaderAction::LogOut => "Home [logout]",
            HeaderAction::LogIn => "Home [login]",
        });
        for post in self.home.posts() {
            reply.push(Post::render(post));
        }
        reply
    }

    async fn protected(&mut self, username: Option<String>) -> Reply {
        let username = username.or_else(|| self.username.clone()).unwrap_or_default();
        match self.client.protected(&self.session, &username).await {
            Ok(message) => Reply::line(message),
            Err(err) => {
                debug!("protected request failed: {}", err);
                Reply::line(err.user_message())
            }
        }
    }

    async fn refresh(&mut self) -> Reply {
        match self.client.fetch_csrf_token(&mut self.session).await {
            Ok(()) => Reply::line("CSRF token refreshed."),
            Err(err) => {
                warn!("Failed to fetch CSRF token: {}", err);
                Reply::line(err.user_message())
            }
        }
    }

    async fn send_support(&mut self, email: String, message: String) -> Reply {
        self.navigate(Route::Support);
        self.support.email = email;
        self.support.message = message;

        if self.support.submit(&self.client).await {
            Reply::line(self.support.response().unwrap_or_default())
        } else {
            Reply::line(self.support.error().unwrap_or_default())
        }
    }

    fn status(&self) -> Reply {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        let mut reply = Reply::line(format!("Route: {}", self.route));
        reply.push(format!("Logged in: {}", yes_no(self.session.is_logged_in())));
        reply.push(format!(
            "CSRF token: {}",
            if self.session.has_csrf_token() {
                "present"
            } else {
                "absent"
            }
        ));
        reply.push(format!("API: {}", self.client.api_base_url()));
        reply.push(format!("Support: {}", self.client.support_base_url()));
        if self.route == Route::Logout {
            reply.push(CONFIRM_PROMPT);
        }
        reply
    }

    /// Reads commands from `input` until it ends or `quit`, writing replies to `output`.
    ///
    /// # Errors
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            write!(output, "{} > ", self.route)?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let reply = match line.parse::<ShellCommand>() {
                Ok(command) => self.handle(command).await,
                Err(err) => Reply {
                    lines: vec![err, "Type `help` for a list of commands.".to_string()],
                    quit: false,
                },
            };

            for line in reply.lines.iter().filter(|line| !line.is_empty()) {
                writeln!(output, "{line}")?;
            }
            if reply.quit {
                break;
            }
        }

        Ok(())
    }
}

/// Execute the shell action.
/// # Errors
/// Returns an error if the client cannot be built or terminal I/O fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Global args: {:?}", args.globals);

    let client = ApiClient::new(&args.globals.api_config())?;
    let mut shell = Shell::new(client);
    shell.start().await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    shell.run(stdin, &mut stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;

    fn offline_shell() -> Result<Shell> {
        Ok(Shell::new(ApiClient::new(&ApiConfig::new(
            "http://127.0.0.1:9",
        ))?))
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            "login bob secret1".parse::<ShellCommand>(),
            Ok(ShellCommand::Login {
                username: "bob".to_string(),
                password: "secret1".to_string()
            })
        );
        assert_eq!(
            "support a@b.com the feed   is empty".parse::<ShellCommand>(),
            Ok(ShellCommand::Support {
                email: "a@b.com".to_string(),
                message: "the feed is empty".to_string()
            })
        );
        assert_eq!(
            "GO /register".parse::<ShellCommand>(),
            Ok(ShellCommand::Go(Route::Register))
        );
        assert_eq!(
            "protected".parse::<ShellCommand>(),
            Ok(ShellCommand::Protected { username: None })
        );
        assert_eq!("exit".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
    }

    #[test]
    fn parse_errors_show_usage() {
        assert_eq!(
            "login bob".parse::<ShellCommand>(),
            Err("usage: login <username> <password>".to_string())
        );
        assert_eq!(
            "support a@b.com".parse::<ShellCommand>(),
            Err("usage: support <email> <message...>".to_string())
        );
        assert_eq!(
            "dance".parse::<ShellCommand>(),
            Err("unknown command: dance".to_string())
        );
        assert!("go /search".parse::<ShellCommand>().is_err());
    }

    #[tokio::test]
    async fn starts_on_login_route() -> Result<()> {
        let shell = offline_shell()?;
        assert_eq!(shell.route(), Route::Login);
        assert!(!shell.session().is_logged_in());
        Ok(())
    }

    #[tokio::test]
    async fn home_redirects_when_logged_out() -> Result<()> {
        let mut shell = offline_shell()?;
        let reply = shell.handle(ShellCommand::Home).await;
        assert_eq!(reply.lines, vec!["/ requires login; showing /login".to_string()]);
        assert_eq!(shell.route(), Route::Login);
        Ok(())
    }

    #[tokio::test]
    async fn run_reads_until_quit() -> Result<()> {
        let mut shell = offline_shell()?;
        let input: &[u8] = b"status\n\nbogus\ngo /register\nquit\nstatus\n";
        let mut output = Vec::new();

        shell.run(input, &mut output).await?;

        let output = String::from_utf8(output)?;
        assert!(output.contains("Route: /login"));
        assert!(output.contains("Logged in: no"));
        assert!(output.contains("CSRF token: absent"));
        assert!(output.contains("API: http://127.0.0.1:9"));
        assert!(output.contains("Support: http://localhost:8000"));
        assert!(output.contains("unknown command: bogus"));
        assert!(output.contains("At /register"));
        assert_eq!(output.matches("Route:").count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn verify_without_registration() -> Result<()> {
        let mut shell = offline_shell()?;
        let reply = shell
            .handle(ShellCommand::Verify {
                code: "123456".to_string(),
            })
            .await;
        assert_eq!(reply.lines, vec!["Nothing to verify; register first.".to_string()]);
        Ok(())
    }
}
