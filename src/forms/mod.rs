//! Form state
//!
//! Forms never call the API themselves: `submit` hands back a
//! [`Command`](crate::messages::Command) and `apply` consumes the matching
//! [`Outcome`](crate::messages::Outcome).

mod login;
mod password;
mod profile;

pub use login::{AuthMode, LoginForm};
pub use password::ChangePasswordForm;
pub use profile::ProfilePanel;

use secrecy::SecretString;

pub(crate) fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

/// Where a form is in its request lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Text to show the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            RequestState::Success(m) | RequestState::Error(m) => Some(m),
            RequestState::Idle | RequestState::Loading => None,
        }
    }
}
