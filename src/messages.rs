//! Request/response messages exchanged between forms and the controller.

use secrecy::SecretString;

use crate::api::{PictureUpload, Profile};

pub const SIGNUP_SUCCESS: &str = "Signup successful! Please login.";
pub const PASSWORD_CHANGED: &str = "Password changed successfully!";
pub const PASSWORD_REQUIRED: &str = "Enter new password!";
pub const PASSWORD_CHANGE_FAILED: &str = "Failed to change password.";
pub const PICTURE_UPDATED: &str = "Profile picture updated!";
pub const PICTURE_REQUIRED: &str = "Select a file first!";
pub const PICTURE_UPDATE_FAILED: &str = "Failed to update profile picture.";
pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";
pub const FIELDS_REQUIRED: &str = "Please fill in all fields.";

/// A request issued by a form.
#[derive(Debug)]
pub enum Command {
    Login {
        email: String,
        password: SecretString,
    },
    Signup {
        username: String,
        email: String,
        password: SecretString,
    },
    LoadProfile,
    UploadProfilePic(PictureUpload),
    ChangePassword {
        new_password: SecretString,
    },
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Login,
    Signup,
    LoadProfile,
    UploadProfilePic,
    ChangePassword,
    Logout,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Login { .. } => CommandKind::Login,
            Command::Signup { .. } => CommandKind::Signup,
            Command::LoadProfile => CommandKind::LoadProfile,
            Command::UploadProfilePic(_) => CommandKind::UploadProfilePic,
            Command::ChangePassword { .. } => CommandKind::ChangePassword,
            Command::Logout => CommandKind::Logout,
        }
    }
}

/// The completion message for a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    LoggedIn,
    SignedUp { message: String },
    ProfileLoaded(Profile),
    ProfilePicUpdated { profile_pic: Option<String> },
    PasswordChanged { message: String },
    /// The session was cleared; the user has to log in again. `message`
    /// says what went wrong.
    SessionExpired { message: String },
    LoggedOut,
    Failed { kind: CommandKind, message: String },
}

impl Outcome {
    pub(crate) fn failed(kind: CommandKind, message: impl Into<String>) -> Self {
        Outcome::Failed {
            kind,
            message: message.into(),
        }
    }
}
