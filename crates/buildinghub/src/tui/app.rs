//! TUI application state and logic.

use std::time::Instant;

use buildinghub_core::{
    ForgotPasswordForm, LoginForm, NavigationShell, Notices, ShellEvents, ShellOutcome, SignupForm,
};
use buildinghub_models::{MenuItem, MenuTarget, Role};
use tracing::{debug, info};

use super::views::{Backend, View};

/// Notice shown after logging out.
pub const SIGNED_OUT: &str = "Đã đăng xuất";

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Signup,
    ForgotPassword,
    /// Signed in; the navigation shell and a page.
    Shell,
}

/// A blocking message the user must dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

/// State for a signed-in user.
#[derive(Debug)]
pub struct Session {
    pub role: Role,
    pub shell: NavigationShell,
    /// Where the user is: a route, or the accounting tab.
    pub location: MenuTarget,
    pub view: View,
}

impl Session {
    /// The menu entry for the current location.
    pub fn active_item(&self) -> Option<&'static MenuItem> {
        self.shell.active_item(&self.location)
    }
}

/// Records what the shell asked for so the app can apply it once the shell
/// borrow ends.
#[derive(Debug, Default)]
struct ShellIntents {
    close: bool,
    logout: bool,
    navigate: Option<MenuTarget>,
}

impl ShellEvents for ShellIntents {
    fn on_close(&mut self) {
        self.close = true;
    }

    fn on_logout(&mut self) {
        self.logout = true;
    }

    fn on_navigate(&mut self, target: &MenuTarget) {
        self.navigate = Some(*target);
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub forgot: ForgotPasswordForm,
    pub session: Option<Session>,
    pub notices: Notices,
    pub alert: Option<Alert>,
    /// Whether the app should quit.
    pub should_quit: bool,
    backend: Option<Backend>,
}

impl App {
    /// Create a new app. Without a backend, remote lists stay empty.
    pub fn new(backend: Option<Backend>) -> Self {
        Self {
            screen: Screen::Login,
            login: LoginForm::new(),
            signup: SignupForm::new(),
            forgot: ForgotPasswordForm::new(),
            session: None,
            notices: Notices::default(),
            alert: None,
            should_quit: false,
            backend,
        }
    }

    /// Show a blocking alert.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert {
            message: message.into(),
        });
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Enter the shell as `role`, landing on its first menu entry.
    pub fn sign_in(&mut self, role: Role) {
        let shell = NavigationShell::new(role);
        let location = shell.menu().home();
        info!(role = %role, "Signed in");
        let view = View::open(location, role, self.backend.as_ref());
        self.session = Some(Session {
            role,
            shell,
            location,
            view,
        });
        self.screen = Screen::Shell;
    }

    /// Drop the session and return to the login screen.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!(role = %session.role, "Signed out");
            self.notices.info(SIGNED_OUT);
        }
        self.login = LoginForm::new();
        self.screen = Screen::Login;
    }

    /// Replace the current page.
    pub fn navigate(&mut self, target: MenuTarget) {
        let backend = self.backend.as_ref();
        if let Some(session) = self.session.as_mut() {
            debug!(target = ?target, "Navigate");
            session.location = target;
            session.view = View::open(target, session.role, backend);
        }
    }

    pub fn submit_login(&mut self) {
        let mut signed_in = None;
        let result = self.login.submit(|role| signed_in = Some(role));
        match (result, signed_in) {
            (Ok(_), Some(role)) => self.sign_in(role),
            (Ok(_), None) => {}
            (Err(e), _) => self.show_alert(e.to_string()),
        }
    }

    pub fn submit_signup(&mut self) {
        let mut back_to_login = false;
        match self.signup.submit(|| back_to_login = true) {
            Ok(message) => {
                self.show_alert(message);
                if back_to_login {
                    self.signup = SignupForm::new();
                    self.screen = Screen::Login;
                }
            }
            Err(e) => self.show_alert(e.to_string()),
        }
    }

    pub fn submit_forgot(&mut self) {
        let mut back_to_login = false;
        match self.forgot.submit(|| back_to_login = true) {
            Ok(message) => {
                self.show_alert(message);
                if back_to_login {
                    self.forgot = ForgotPasswordForm::new();
                    self.screen = Screen::Login;
                }
            }
            Err(e) => self.show_alert(e.to_string()),
        }
    }

    /// Toggle the sidebar, putting the cursor on the active entry when it
    /// opens.
    pub fn toggle_menu(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.shell.toggle();
            if session.shell.is_open() {
                let location = session.location;
                session.shell.select_active(&location);
            }
        }
    }

    /// Close the sidebar as a backdrop click would.
    pub fn dismiss_menu(&mut self) -> ShellOutcome {
        let mut intents = ShellIntents::default();
        let outcome = match self.session.as_mut() {
            Some(session) => session.shell.click_backdrop(&mut intents),
            None => return ShellOutcome::Ignored,
        };
        self.apply(intents);
        outcome
    }

    /// Activate the menu entry under the cursor.
    pub fn activate_menu_selection(&mut self) -> ShellOutcome {
        let mut intents = ShellIntents::default();
        let outcome = match self.session.as_mut() {
            Some(session) => session.shell.activate_selected(&mut intents),
            None => return ShellOutcome::Ignored,
        };
        self.apply(intents);
        outcome
    }

    /// Activate a menu entry by id.
    pub fn click_menu_item(&mut self, id: &str) -> ShellOutcome {
        let mut intents = ShellIntents::default();
        let outcome = match self.session.as_mut() {
            Some(session) => session.shell.click_item(id, &mut intents),
            None => return ShellOutcome::Ignored,
        };
        self.apply(intents);
        outcome
    }

    fn apply(&mut self, intents: ShellIntents) {
        if let Some(target) = intents.navigate {
            self.navigate(target);
        }
        if intents.close {
            if let Some(session) = self.session.as_mut() {
                session.shell.close();
            }
        }
        if intents.logout {
            self.sign_out();
        }
    }

    /// Per-frame housekeeping: collect finished loads and expire notices.
    pub fn tick(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.view.poll(&mut self.notices);
        }
        self.notices.expire(now);
    }
}
