//! Dashboard profile panel.

use super::RequestState;
use crate::api::{PictureUpload, Profile};
use crate::messages::{Command, CommandKind, Outcome, PICTURE_REQUIRED, PICTURE_UPDATED};

#[derive(Debug, Default)]
pub struct ProfilePanel {
    profile: Option<Profile>,
    state: RequestState,
    picture: Option<PictureUpload>,
    upload_state: RequestState,
    needs_login: bool,
}

impl ProfilePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts fetching the profile.
    pub fn load(&mut self) -> Command {
        self.state = RequestState::Loading;
        Command::LoadProfile
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn upload_state(&self) -> &RequestState {
        &self.upload_state
    }

    /// True once the session is gone and the login form should be shown.
    pub fn needs_login(&self) -> bool {
        self.needs_login
    }

    pub fn greeting(&self) -> Option<String> {
        self.profile
            .as_ref()
            .map(|p| format!("Welcome, {}!", p.username))
    }

    pub fn select_picture(&mut self, upload: PictureUpload) {
        self.picture = Some(upload);
        self.upload_state = RequestState::Idle;
    }

    /// Builds the upload command for the selected picture.
    pub fn submit_picture(&mut self) -> Option<Command> {
        if self.upload_state.is_loading() {
            return None;
        }
        let Some(upload) = self.picture.clone() else {
            self.upload_state = RequestState::Error(PICTURE_REQUIRED.to_string());
            return None;
        };
        self.upload_state = RequestState::Loading;
        Some(Command::UploadProfilePic(upload))
    }

    pub fn apply(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::ProfileLoaded(profile) => {
                self.profile = Some(profile.clone());
                self.needs_login = false;
                self.state = RequestState::Idle;
            }
            Outcome::ProfilePicUpdated { profile_pic } => {
                if let Some(profile) = self.profile.as_mut() {
                    profile.profile_pic = profile_pic.clone();
                }
                self.picture = None;
                self.upload_state = RequestState::Success(PICTURE_UPDATED.to_string());
            }
            Outcome::Failed {
                kind: CommandKind::UploadProfilePic,
                message,
            } => {
                self.upload_state = RequestState::Error(message.clone());
            }
            Outcome::SessionExpired { message } => {
                self.sign_out();
                self.state = RequestState::Error(message.clone());
            }
            Outcome::LoggedOut => {
                self.sign_out();
                self.state = RequestState::Idle;
            }
            _ => {}
        }
    }

    fn sign_out(&mut self) {
        self.profile = None;
        self.picture = None;
        self.upload_state = RequestState::Idle;
        self.needs_login = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{PICTURE_UPDATE_FAILED, SESSION_EXPIRED};

    fn ada() -> Profile {
        Profile {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            profile_pic: None,
        }
    }

    #[test]
    fn test_load_then_profile_arrives() {
        let mut panel = ProfilePanel::new();
        assert!(matches!(panel.load(), Command::LoadProfile));
        assert!(panel.state().is_loading());
        assert!(panel.greeting().is_none());

        panel.apply(&Outcome::ProfileLoaded(ada()));
        assert_eq!(panel.state(), &RequestState::Idle);
        assert_eq!(panel.greeting().as_deref(), Some("Welcome, ada!"));
        assert_eq!(panel.profile().unwrap().email, "ada@example.com");
    }

    #[test]
    fn test_upload_requires_selected_file() {
        let mut panel = ProfilePanel::new();
        assert!(panel.submit_picture().is_none());
        assert_eq!(panel.upload_state().message(), Some(PICTURE_REQUIRED));
    }

    #[test]
    fn test_upload_updates_picture() {
        let mut panel = ProfilePanel::new();
        panel.apply(&Outcome::ProfileLoaded(ada()));
        panel.select_picture(PictureUpload::new("me.png", vec![1, 2]));

        assert!(matches!(panel.submit_picture(), Some(Command::UploadProfilePic(_))));
        assert!(panel.submit_picture().is_none(), "no double upload");

        panel.apply(&Outcome::ProfilePicUpdated {
            profile_pic: Some("/media/me.png".to_string()),
        });
        assert_eq!(
            panel.profile().unwrap().profile_pic.as_deref(),
            Some("/media/me.png")
        );
        assert_eq!(panel.upload_state().message(), Some(PICTURE_UPDATED));
    }

    #[test]
    fn test_upload_failure() {
        let mut panel = ProfilePanel::new();
        panel.select_picture(PictureUpload::new("me.png", vec![1]));
        panel.submit_picture().expect("command");
        panel.apply(&Outcome::failed(
            CommandKind::UploadProfilePic,
            "Failed to update profile picture.",
        ));
        assert_eq!(
            panel.upload_state().message(),
            Some("Failed to update profile picture.")
        );
    }

    #[test]
    fn test_session_expired_requires_login() {
        let mut panel = ProfilePanel::new();
        panel.apply(&Outcome::ProfileLoaded(ada()));
        panel.apply(&Outcome::SessionExpired {
            message: SESSION_EXPIRED.to_string(),
        });
        assert!(panel.needs_login());
        assert!(panel.profile().is_none());
        assert_eq!(panel.state().message(), Some(SESSION_EXPIRED));
    }

    #[test]
    fn test_failed_upload_that_ended_session() {
        let mut panel = ProfilePanel::new();
        panel.apply(&Outcome::ProfileLoaded(ada()));
        panel.select_picture(PictureUpload::new("me.png", vec![1]));
        panel.submit_picture().expect("command");
        panel.apply(&Outcome::SessionExpired {
            message: PICTURE_UPDATE_FAILED.to_string(),
        });

        assert!(panel.needs_login());
        assert_eq!(panel.state().message(), Some(PICTURE_UPDATE_FAILED));
        assert_eq!(panel.upload_state(), &RequestState::Idle);
    }

    #[test]
    fn test_logout_requires_login() {
        let mut panel = ProfilePanel::new();
        panel.apply(&Outcome::ProfileLoaded(ada()));
        panel.apply(&Outcome::LoggedOut);
        assert!(panel.needs_login());
        assert_eq!(panel.state(), &RequestState::Idle);
    }
}
