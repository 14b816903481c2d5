//! Account API surface
//!
//! [`AccountApi`] is the seam between the forms/controller and the remote
//! service. The HTTP implementation lives behind the `http` feature.

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::{ApiError, decode_error_body};
#[cfg(feature = "http")]
pub use http::HttpAccountApi;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOGIN_PATH: &str = "/api/login/";
pub const SIGNUP_PATH: &str = "/api/signup/";
pub const PROFILE_PATH: &str = "/api/profile/";
pub const PROFILE_PIC_PATH: &str = "/api/profile/update-pic/";
pub const CHANGE_PASSWORD_PATH: &str = "/api/change-password/";

/// Multipart field carrying the picture.
pub const PROFILE_PIC_FIELD: &str = "profile_pic";

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Flat profile record returned by the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub email: String,
    /// Server-relative path of the picture, e.g. `/media/pics/me.png`.
    #[serde(rename = "profilePic", default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfilePicResponse {
    #[serde(rename = "profilePic", default)]
    pub profile_pic: Option<String>,
}

/// An image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl PictureUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = guess_image_mime(&file_name).map(str::to_string);
        Self {
            file_name,
            bytes,
            mime,
        }
    }

    /// Reads a picture from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_image_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Operations offered by the remote account service.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn login(&self, email: &str, password: &SecretString) -> Result<TokenResponse, ApiError>;

    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<MessageResponse, ApiError>;

    async fn change_password(
        &self,
        new_password: &SecretString,
        token: &SecretString,
    ) -> Result<MessageResponse, ApiError>;

    async fn get_profile(&self, token: &SecretString) -> Result<Profile, ApiError>;

    async fn update_profile_pic(
        &self,
        upload: &PictureUpload,
        token: &SecretString,
    ) -> Result<ProfilePicResponse, ApiError>;
}
