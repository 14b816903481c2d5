//! Login / signup form.

use secrecy::{ExposeSecret, SecretString};

use super::{RequestState, empty_secret};
use crate::messages::{Command, CommandKind, FIELDS_REQUIRED, Outcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug)]
pub struct LoginForm {
    mode: AuthMode,
    username: String,
    email: String,
    password: SecretString,
    state: RequestState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            email: String::new(),
            password: empty_secret(),
            state: RequestState::Idle,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = SecretString::from(password.to_string());
    }

    /// Switches between login and signup, clearing every field.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.clear_fields();
        self.state = RequestState::Idle;
    }

    /// Label for the submit button.
    pub fn submit_label(&self) -> &'static str {
        match (self.mode, self.state.is_loading()) {
            (AuthMode::Signup, true) => "Signing up...",
            (AuthMode::Login, true) => "Logging in...",
            (AuthMode::Signup, false) => "Sign Up",
            (AuthMode::Login, false) => "Login",
        }
    }

    /// Builds the command for the current mode.
    ///
    /// Returns `None` while a request is in flight or when a required field
    /// is empty.
    pub fn submit(&mut self) -> Option<Command> {
        if self.state.is_loading() {
            return None;
        }

        let email = self.email.trim();
        let missing = email.is_empty()
            || self.password.expose_secret().is_empty()
            || (self.mode == AuthMode::Signup && self.username.trim().is_empty());
        if missing {
            self.state = RequestState::Error(FIELDS_REQUIRED.to_string());
            return None;
        }

        let email = email.to_string();
        let password = SecretString::from(self.password.expose_secret().to_string());
        self.state = RequestState::Loading;

        Some(match self.mode {
            AuthMode::Login => Command::Login { email, password },
            AuthMode::Signup => Command::Signup {
                username: self.username.trim().to_string(),
                email,
                password,
            },
        })
    }

    /// Applies a completion message. Outcomes for other forms are ignored.
    pub fn apply(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::LoggedIn => {
                self.password = empty_secret();
                self.state = RequestState::Success("Logged in".to_string());
            }
            Outcome::SignedUp { message } => {
                self.mode = AuthMode::Login;
                self.clear_fields();
                self.state = RequestState::Success(message.clone());
            }
            Outcome::Failed {
                kind: CommandKind::Login | CommandKind::Signup,
                message,
            } => {
                self.state = RequestState::Error(message.clone());
            }
            _ => {}
        }
    }

    fn clear_fields(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password = empty_secret();
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::SIGNUP_SUCCESS;

    fn filled_login() -> LoginForm {
        let mut form = LoginForm::new();
        form.set_email("ada@example.com");
        form.set_password("secret");
        form
    }

    #[test]
    fn test_submit_login_goes_loading() {
        let mut form = filled_login();
        assert_eq!(form.submit_label(), "Login");

        let command = form.submit().expect("command");
        assert!(matches!(command, Command::Login { ref email, .. } if email == "ada@example.com"));
        assert!(form.state().is_loading());
        assert_eq!(form.submit_label(), "Logging in...");

        // no double submit while loading
        assert!(form.submit().is_none());
    }

    #[test]
    fn test_submit_requires_fields() {
        let mut form = LoginForm::new();
        form.set_email("ada@example.com");
        assert!(form.submit().is_none());
        assert_eq!(form.state().message(), Some(FIELDS_REQUIRED));

        let mut form = filled_login();
        form.toggle_mode();
        form.set_email("ada@example.com");
        form.set_password("secret");
        assert!(form.submit().is_none(), "signup needs a username");

        form.set_username("ada");
        assert!(matches!(form.submit(), Some(Command::Signup { .. })));
        assert_eq!(form.submit_label(), "Signing up...");
    }

    #[test]
    fn test_toggle_clears_fields() {
        let mut form = filled_login();
        form.set_username("ada");
        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::Signup);
        assert_eq!(form.submit_label(), "Sign Up");
        assert!(form.username().is_empty());
        assert!(form.email().is_empty());
        assert!(form.password.expose_secret().is_empty());
    }

    #[test]
    fn test_signup_success_returns_to_login() {
        let mut form = LoginForm::new();
        form.toggle_mode();
        form.set_username("ada");
        form.set_email("ada@example.com");
        form.set_password("secret");
        form.submit().expect("command");

        form.apply(&Outcome::SignedUp {
            message: SIGNUP_SUCCESS.to_string(),
        });
        assert_eq!(form.mode(), AuthMode::Login);
        assert!(form.email().is_empty());
        assert_eq!(form.state(), &RequestState::Success(SIGNUP_SUCCESS.to_string()));
    }

    #[test]
    fn test_failure_sets_error_and_allows_retry() {
        let mut form = filled_login();
        form.submit().expect("command");
        form.apply(&Outcome::failed(CommandKind::Login, "Invalid credentials"));
        assert_eq!(form.state(), &RequestState::Error("Invalid credentials".to_string()));
        assert!(form.submit().is_some());
    }

    #[test]
    fn test_unrelated_outcomes_ignored() {
        let mut form = filled_login();
        form.submit().expect("command");
        form.apply(&Outcome::failed(CommandKind::ChangePassword, "nope"));
        assert!(form.state().is_loading());
    }
}
