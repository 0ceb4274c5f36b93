//! Key handling for the TUI.
//!
//! Routes key presses to the alert, the auth forms, the navigation shell or
//! the current page, in that order of precedence.

use buildinghub_core::{LoginFocus, TextField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Screen};

/// Apply an editing key to a text field. Returns false for keys that are
/// not edits.
fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        _ => return false,
    }
    true
}

impl App {
    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.dismiss_alert();
            }
            return;
        }

        match self.screen {
            Screen::Login => self.login_key(key),
            Screen::Signup => self.signup_key(key),
            Screen::ForgotPassword => self.forgot_key(key),
            Screen::Shell => self.shell_key(key),
        }
    }

    fn login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => return self.submit_login(),
            KeyCode::Tab | KeyCode::Down => {
                self.login.focus = self.login.focus.next();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login.focus = self.login.focus.prev();
                return;
            }
            KeyCode::F(2) => return self.login.toggle_show_password(),
            KeyCode::F(5) => {
                self.screen = Screen::Signup;
                return;
            }
            KeyCode::F(6) => {
                self.screen = Screen::ForgotPassword;
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match self.login.focus {
            LoginFocus::Role => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => self.login.cycle_role(true),
                KeyCode::Left => self.login.cycle_role(false),
                _ => {}
            },
            LoginFocus::RememberMe => {
                if key.code == KeyCode::Char(' ') {
                    self.login.toggle_remember_me();
                }
            }
            LoginFocus::Email | LoginFocus::Password => {
                if let Some(field) = self.login.focused_field() {
                    edit_field(field, key);
                }
            }
        }
    }

    fn signup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_signup(),
            KeyCode::Esc => self.screen = Screen::Login,
            KeyCode::Tab | KeyCode::Down => self.signup.focus = self.signup.focus.next(),
            KeyCode::BackTab | KeyCode::Up => {
                // Two steps forward in a three-field cycle.
                self.signup.focus = self.signup.focus.next().next();
            }
            _ => {
                edit_field(self.signup.focused_field(), key);
            }
        }
    }

    fn forgot_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_forgot(),
            KeyCode::Esc => self.screen = Screen::Login,
            _ => {
                edit_field(&mut self.forgot.email, key);
            }
        }
    }

    fn shell_key(&mut self, key: KeyEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.shell.is_open() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => session.shell.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => session.shell.select_next(),
                KeyCode::Enter => {
                    self.activate_menu_selection();
                }
                KeyCode::Esc | KeyCode::Char('m') => {
                    self.dismiss_menu();
                }
                _ => {}
            }
            return;
        }

        if session.view.captures_text() {
            session.view.handle_key(key, &mut self.notices);
            return;
        }

        match key.code {
            KeyCode::Char('m') => self.toggle_menu(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {
                session.view.handle_key(key, &mut self.notices);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildinghub_models::{MenuTarget, Role, Route};

    use crate::tui::views::View;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_keyboard_login() {
        let mut app = App::new(None);
        // Role is focused first.
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "a@b.vn");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Shell);
        assert!(app.session.is_some());
    }

    #[test]
    fn test_alert_blocks_input_until_dismissed() {
        let mut app = App::new(None);
        press(&mut app, KeyCode::Enter);
        assert!(app.alert.is_some());
        press(&mut app, KeyCode::F(5));
        assert_eq!(app.screen, Screen::Login);
        press(&mut app, KeyCode::Enter);
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = App::new(None);
        app.sign_in(Role::Admin);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_sidebar_keyboard_navigation() {
        let mut app = App::new(None);
        app.sign_in(Role::Resident);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.session.as_ref().unwrap().shell.is_open());

        // Cursor starts on the active dashboard entry.
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let session = app.session.as_ref().unwrap();
        assert!(!session.shell.is_open());
        assert_eq!(session.location, MenuTarget::Path(Route::ResidentAnnouncements));
    }

    #[test]
    fn test_search_typing_does_not_toggle_menu() {
        let mut app = App::new(None);
        app.sign_in(Role::Resident);
        app.navigate(MenuTarget::Path(Route::ResidentInformation));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "m");
        let session = app.session.as_ref().unwrap();
        assert!(!session.shell.is_open());
        match &session.view {
            View::Information(info) => assert_eq!(info.filter.search.as_str(), "m"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_signup_screen_round_trip() {
        let mut app = App::new(None);
        press(&mut app, KeyCode::F(5));
        assert_eq!(app.screen, Screen::Signup);
        type_text(&mut app, "Lan");
        assert_eq!(app.signup.name.value(), "Lan");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Login);
    }
}
