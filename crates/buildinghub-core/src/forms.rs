//! Form state for the sign-in flow and the profile page.
//!
//! Forms hold their field values locally and validate on submit. Validation
//! failures are returned as [`FormError`] and the success callback is not
//! invoked; nothing is sent anywhere.

use buildinghub_models::{Profile, ProfileField, Role};
use thiserror::Error;
use tracing::{info, warn};

/// Confirmation shown after a successful sign-up.
pub const SIGNUP_SUCCESS: &str = "Đăng ký thành công! Vui lòng đăng nhập.";

/// Confirmation shown after requesting a password reset.
pub const RESET_SENT: &str = "Chúng tôi đã gửi hướng dẫn đặt lại mật khẩu (giả lập).";

/// Form validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Vui lòng chọn loại tài khoản")]
    RoleRequired,

    #[error("Vui lòng nhập {0}")]
    MissingField(&'static str),

    #[error("Email không hợp lệ: {0}")]
    InvalidEmail(String),
}

/// Result type for form submission.
pub type Result<T> = std::result::Result<T, FormError>;

/// A single-line text input with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field holding `value` with the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// The value as drawn; masked fields show one bullet per character.
    pub fn display(&self, masked: bool) -> String {
        if masked {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

fn require(field: &TextField, label: &'static str) -> Result<()> {
    if field.is_blank() {
        warn!(field = label, "Required field left empty");
        return Err(FormError::MissingField(label));
    }
    Ok(())
}

/// Minimal email shape check: `local@domain.tld`.
fn require_email(field: &TextField) -> Result<()> {
    require(field, "email")?;
    let value = field.value().trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    };
    if !valid || value.contains(char::is_whitespace) {
        return Err(FormError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

/// Fields of the login form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Role,
    Email,
    Password,
    RememberMe,
}

impl LoginFocus {
    pub fn next(self) -> Self {
        match self {
            LoginFocus::Role => LoginFocus::Email,
            LoginFocus::Email => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::RememberMe,
            LoginFocus::RememberMe => LoginFocus::Role,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            LoginFocus::Role => LoginFocus::RememberMe,
            LoginFocus::Email => LoginFocus::Role,
            LoginFocus::Password => LoginFocus::Email,
            LoginFocus::RememberMe => LoginFocus::Password,
        }
    }
}

/// The login form. Any credentials are accepted; only the role matters.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: TextField,
    pub password: TextField,
    pub show_password: bool,
    pub remember_me: bool,
    pub role: Option<Role>,
    pub focus: LoginFocus,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    /// Step the role selection through [`Role::ALL`].
    pub fn cycle_role(&mut self, forward: bool) {
        let roles = Role::ALL;
        let next = match self.role.and_then(|r| roles.iter().position(|x| *x == r)) {
            None => 0,
            Some(i) if forward => (i + 1) % roles.len(),
            Some(i) => (i + roles.len() - 1) % roles.len(),
        };
        self.role = Some(roles[next]);
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_remember_me(&mut self) {
        self.remember_me = !self.remember_me;
    }

    /// The focused text input, if focus is on one.
    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            LoginFocus::Email => Some(&mut self.email),
            LoginFocus::Password => Some(&mut self.password),
            _ => None,
        }
    }

    /// Validate and sign in, calling `on_login` with the chosen role.
    pub fn submit<F>(&self, on_login: F) -> Result<Role>
    where
        F: FnOnce(Role),
    {
        require(&self.email, "email")?;
        require(&self.password, "mật khẩu")?;
        let Some(role) = self.role else {
            warn!("Login submitted without a role");
            return Err(FormError::RoleRequired);
        };
        info!(role = %role, remember_me = self.remember_me, "Signing in");
        on_login(role);
        Ok(role)
    }
}

/// Fields of the sign-up form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupFocus {
    #[default]
    Name,
    Email,
    Password,
}

impl SignupFocus {
    pub fn next(self) -> Self {
        match self {
            SignupFocus::Name => SignupFocus::Email,
            SignupFocus::Email => SignupFocus::Password,
            SignupFocus::Password => SignupFocus::Name,
        }
    }
}

/// The sign-up form.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub focus: SignupFocus,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            SignupFocus::Name => &mut self.name,
            SignupFocus::Email => &mut self.email,
            SignupFocus::Password => &mut self.password,
        }
    }

    /// Validate, call `on_success`, and return the confirmation message.
    pub fn submit<F>(&self, on_success: F) -> Result<&'static str>
    where
        F: FnOnce(),
    {
        require(&self.name, "họ tên")?;
        require_email(&self.email)?;
        require(&self.password, "mật khẩu")?;
        info!("Sign-up accepted");
        on_success();
        Ok(SIGNUP_SUCCESS)
    }
}

/// The forgot-password form.
#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: TextField,
}

impl ForgotPasswordForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, call `on_back`, and return the confirmation message.
    pub fn submit<F>(&self, on_back: F) -> Result<&'static str>
    where
        F: FnOnce(),
    {
        require_email(&self.email)?;
        info!("Password reset requested");
        on_back();
        Ok(RESET_SENT)
    }
}

/// Local view/edit state for a profile page.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    saved: Profile,
    draft: Profile,
    editing: bool,
    focus: usize,
}

impl ProfileEditor {
    pub fn new(profile: Profile) -> Self {
        Self {
            draft: profile.clone(),
            saved: profile,
            editing: false,
            focus: 0,
        }
    }

    /// The committed profile.
    pub fn saved(&self) -> &Profile {
        &self.saved
    }

    /// The profile as currently shown, including unsaved edits.
    pub fn draft(&self) -> &Profile {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Replace a field of the draft. Ignored outside edit mode.
    pub fn update(&mut self, field: ProfileField, value: impl Into<String>) {
        if self.editing {
            *self.draft.get_mut(field) = value.into();
        }
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        self.draft = self.saved.clone();
        self.editing = false;
    }

    /// Commit the draft locally. Returns false outside edit mode.
    pub fn save(&mut self) -> bool {
        if !self.editing {
            return false;
        }
        self.saved = self.draft.clone();
        self.editing = false;
        info!(name = %self.saved.display_name(), "Profile saved");
        true
    }

    pub fn focused(&self) -> ProfileField {
        ProfileField::ALL[self.focus % ProfileField::ALL.len()]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % ProfileField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        let len = ProfileField::ALL.len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Append a typed character to the focused field.
    pub fn push_char(&mut self, c: char) {
        if self.editing {
            self.draft.get_mut(self.focused()).push(c);
        }
    }

    /// Remove the last character of the focused field.
    pub fn pop_char(&mut self) {
        if self.editing {
            self.draft.get_mut(self.focused()).pop();
        }
    }
}
