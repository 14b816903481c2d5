//! Account controller
//!
//! Turns [`Command`]s into [`Outcome`]s by calling the account API and
//! keeping the [`Session`] in step with the results.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::api::{AccountApi, ApiError};
use crate::evaluator::evaluate_password_policy;
use crate::messages::{
    Command, CommandKind, Outcome, PASSWORD_CHANGE_FAILED, PASSWORD_CHANGED, PASSWORD_REQUIRED,
    PICTURE_UPDATE_FAILED, SESSION_EXPIRED, SIGNUP_SUCCESS,
};
use crate::session::Session;

pub struct AccountController<A> {
    api: A,
    session: Session,
}

impl<A: AccountApi> AccountController<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Executes one command and reports how it ended.
    pub async fn handle(&self, command: Command) -> Outcome {
        let kind = command.kind();

        #[cfg(feature = "tracing")]
        tracing::debug!(?kind, "handling account command");

        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Signup {
                username,
                email,
                password,
            } => match self.api.signup(&username, &email, &password).await {
                Ok(response) => Outcome::SignedUp {
                    message: response
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| SIGNUP_SUCCESS.to_string()),
                },
                Err(e) => Outcome::failed(kind, e.to_string()),
            },
            Command::LoadProfile => {
                let Some(token) = self.session.token() else {
                    return self.expire(SESSION_EXPIRED);
                };
                match self.api.get_profile(&token).await {
                    Ok(profile) => Outcome::ProfileLoaded(profile),
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(error = %_e, "profile fetch failed, clearing session");
                        self.expire(SESSION_EXPIRED)
                    }
                }
            }
            Command::UploadProfilePic(upload) => {
                let Some(token) = self.session.token() else {
                    return self.expire(SESSION_EXPIRED);
                };
                match self.api.update_profile_pic(&upload, &token).await {
                    Ok(response) => Outcome::ProfilePicUpdated {
                        profile_pic: response.profile_pic,
                    },
                    Err(e) => self.authenticated_failure(kind, e, PICTURE_UPDATE_FAILED),
                }
            }
            Command::ChangePassword { new_password } => self.change_password(&new_password).await,
            Command::Logout => {
                if let Err(_e) = self.session.sign_out() {
                    #[cfg(feature = "tracing")]
                    tracing::error!(error = %_e, "failed to clear stored session");
                }
                Outcome::LoggedOut
            }
        }
    }

    async fn login(&self, email: &str, password: &SecretString) -> Outcome {
        let kind = CommandKind::Login;
        let token = match self.api.login(email, password).await {
            Ok(response) => response.token.filter(|t| !t.trim().is_empty()),
            Err(e) => return Outcome::failed(kind, e.to_string()),
        };
        let Some(token) = token else {
            return Outcome::failed(kind, ApiError::MissingToken.to_string());
        };

        match self.session.sign_in(&token) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::info!("login succeeded");
                Outcome::LoggedIn
            }
            Err(e) => Outcome::failed(kind, e.to_string()),
        }
    }

    async fn change_password(&self, new_password: &SecretString) -> Outcome {
        let kind = CommandKind::ChangePassword;
        if new_password.expose_secret().is_empty() {
            return Outcome::failed(kind, PASSWORD_REQUIRED);
        }

        let verdict = evaluate_password_policy(new_password);
        if !verdict.all_satisfied() {
            return Outcome::failed(
                kind,
                format!("Password does not meet: {}", verdict.unmet().join(", ")),
            );
        }

        let Some(token) = self.session.token() else {
            return self.expire(SESSION_EXPIRED);
        };
        match self.api.change_password(new_password, &token).await {
            Ok(response) => Outcome::PasswordChanged {
                message: response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| PASSWORD_CHANGED.to_string()),
            },
            Err(e) => self.authenticated_failure(kind, e, PASSWORD_CHANGE_FAILED),
        }
    }

    /// Any failed authenticated request ends the session. The outcome
    /// carries the server's explanation, or `fallback` when it gave none.
    /// A request that could not even be built leaves the session alone.
    fn authenticated_failure(&self, kind: CommandKind, err: ApiError, fallback: &str) -> Outcome {
        if let ApiError::InvalidRequest(reason) = &err {
            return Outcome::failed(kind, reason.clone());
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            ?kind,
            error = %err,
            auth_failure = err.is_auth_failure(),
            "authenticated request failed, clearing session"
        );

        self.expire(err.server_message().unwrap_or(fallback))
    }

    fn expire(&self, message: &str) -> Outcome {
        if let Err(_e) = self.session.sign_out() {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %_e, "failed to clear stored session");
        }
        Outcome::SessionExpired {
            message: message.to_string(),
        }
    }

    /// Processes commands one at a time until the channel closes or
    /// `token` is cancelled. A command in flight when `token` fires is
    /// abandoned without an outcome.
    #[cfg(feature = "async")]
    pub async fn run(
        &self,
        mut commands: mpsc::Receiver<Command>,
        outcomes: mpsc::Sender<Outcome>,
        token: CancellationToken,
    ) {
        #[cfg(feature = "tracing")]
        tracing::info!("account controller started");

        loop {
            let command = tokio::select! {
                _ = token.cancelled() => break,
                next = commands.recv() => match next {
                    Some(command) => command,
                    None => break,
                },
            };

            let outcome = tokio::select! {
                _ = token.cancelled() => break,
                outcome = self.handle(command) => outcome,
            };

            if outcomes.send(outcome).await.is_err() {
                #[cfg(feature = "tracing")]
                tracing::warn!("outcome receiver dropped");
                break;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!("account controller stopped");
    }
}
