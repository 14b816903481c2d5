//! Change-password form.
//!
//! The candidate is re-evaluated on every change; the submit control is
//! enabled only while every policy rule holds.

use secrecy::{ExposeSecret, SecretString};

use super::{RequestState, empty_secret};
use crate::evaluator::evaluate_password_policy;
use crate::messages::{Command, CommandKind, Outcome};
use crate::policy::{PolicyVerdict, RuleResult};

#[derive(Debug)]
pub struct ChangePasswordForm {
    password: SecretString,
    verdict: PolicyVerdict,
    state: RequestState,
}

impl ChangePasswordForm {
    pub fn new() -> Self {
        Self {
            password: empty_secret(),
            verdict: PolicyVerdict::unsatisfied(),
            state: RequestState::Idle,
        }
    }

    /// Replaces the candidate and recomputes the verdict.
    pub fn set_password(&mut self, candidate: &str) {
        self.password = SecretString::from(candidate.to_string());
        self.verdict = evaluate_password_policy(&self.password);
    }

    pub fn verdict(&self) -> &PolicyVerdict {
        &self.verdict
    }

    /// One indicator per rule, in display order.
    pub fn indicators(&self) -> &[RuleResult] {
        self.verdict.results()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.verdict.all_satisfied() && !self.state.is_loading()
    }

    pub fn submit(&mut self) -> Option<Command> {
        if !self.can_submit() {
            return None;
        }
        self.state = RequestState::Loading;
        Some(Command::ChangePassword {
            new_password: SecretString::from(self.password.expose_secret().to_string()),
        })
    }

    /// Resets the form, e.g. when its dialog is closed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn apply(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::PasswordChanged { message } => {
                self.reset();
                self.state = RequestState::Success(message.clone());
            }
            Outcome::Failed {
                kind: CommandKind::ChangePassword,
                message,
            } => {
                self.state = RequestState::Error(message.clone());
            }
            Outcome::SessionExpired { message } => {
                self.reset();
                self.state = RequestState::Error(message.clone());
            }
            _ => {}
        }
    }
}

impl Default for ChangePasswordForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{PASSWORD_CHANGE_FAILED, PASSWORD_CHANGED, PASSWORD_REQUIRED};

    fn marks(form: &ChangePasswordForm) -> Vec<String> {
        form.indicators().iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_empty_form_shows_every_rule_failing() {
        let form = ChangePasswordForm::new();
        assert!(!form.can_submit());
        assert_eq!(
            marks(&form),
            vec![
                "✖ Minimum 8 characters",
                "✖ One uppercase letter",
                "✖ One lowercase letter",
                "✖ One number",
                "✖ One special character",
            ]
        );
    }

    #[test]
    fn test_indicators_follow_keystrokes() {
        let mut form = ChangePasswordForm::new();
        form.set_password("abcdefgh");
        assert_eq!(
            marks(&form),
            vec![
                "✔ Minimum 8 characters",
                "✖ One uppercase letter",
                "✔ One lowercase letter",
                "✖ One number",
                "✖ One special character",
            ]
        );
        assert!(!form.can_submit());

        form.set_password("Abcdefg1!");
        assert!(form.can_submit());

        form.set_password("Abcdefg1");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_submit_disabled_until_compliant() {
        let mut form = ChangePasswordForm::new();
        form.set_password("ABCDEFG1!");
        assert!(form.submit().is_none());
        assert_eq!(form.state(), &RequestState::Idle);

        form.set_password("Abcdefg1!");
        let Some(Command::ChangePassword { new_password }) = form.submit() else {
            panic!("Expected a change-password command");
        };
        assert_eq!(new_password.expose_secret(), "Abcdefg1!");
        assert!(!form.can_submit(), "disabled while loading");
    }

    #[test]
    fn test_success_discards_candidate() {
        let mut form = ChangePasswordForm::new();
        form.set_password("Abcdefg1!");
        form.submit().expect("command");
        form.apply(&Outcome::PasswordChanged {
            message: PASSWORD_CHANGED.to_string(),
        });

        assert_eq!(form.state().message(), Some(PASSWORD_CHANGED));
        assert!(!form.verdict().all_satisfied());
        assert!(!form.can_submit());
    }

    #[test]
    fn test_failure_keeps_candidate_for_retry() {
        let mut form = ChangePasswordForm::new();
        form.set_password("Abcdefg1!");
        form.submit().expect("command");
        form.apply(&Outcome::failed(CommandKind::ChangePassword, PASSWORD_REQUIRED));

        assert_eq!(form.state().message(), Some(PASSWORD_REQUIRED));
        assert!(form.can_submit());
    }

    #[test]
    fn test_session_expiry_resets_form() {
        let mut form = ChangePasswordForm::new();
        form.set_password("Abcdefg1!");
        form.submit().expect("command");
        form.apply(&Outcome::SessionExpired {
            message: PASSWORD_CHANGE_FAILED.to_string(),
        });
        assert_eq!(form.state().message(), Some(PASSWORD_CHANGE_FAILED));
        assert!(!form.can_submit());
    }
}
