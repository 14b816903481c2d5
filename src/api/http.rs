//! reqwest-backed implementation of [`AccountApi`].

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use super::{
    AccountApi, ApiError, CHANGE_PASSWORD_PATH, ChangePasswordRequest, LOGIN_PATH, LoginRequest,
    MessageResponse, PROFILE_PATH, PROFILE_PIC_FIELD, PROFILE_PIC_PATH, PictureUpload, Profile,
    ProfilePicResponse, SIGNUP_PATH, SignupRequest, TokenResponse,
};
use crate::config::ClientConfig;

pub struct HttpAccountApi {
    client: Client,
    config: ClientConfig,
}

impl HttpAccountApi {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves a server-relative asset path, such as a profile picture,
    /// into an absolute URL. Absolute URLs are returned unchanged.
    pub fn asset_url(&self, path: &str) -> Result<Url, ApiError> {
        self.endpoint(path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.config
            .endpoint(path)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }

    fn authorize(
        &self,
        builder: RequestBuilder,
        token: &SecretString,
    ) -> Result<RequestBuilder, ApiError> {
        let mut value = HeaderValue::from_str(&format!(
            "{} {}",
            self.config.auth_scheme,
            token.expose_secret()
        ))
        .map_err(|_| ApiError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(builder.header(AUTHORIZATION, value))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, "account API request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = status.as_u16(), "account API rejected request");
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    fn profile_pic_request(
        &self,
        upload: &PictureUpload,
        token: &SecretString,
    ) -> Result<RequestBuilder, ApiError> {
        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        if let Some(mime) = &upload.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        }
        let form = Form::new().part(PROFILE_PIC_FIELD, part);

        let builder = self
            .client
            .patch(self.endpoint(PROFILE_PIC_PATH)?)
            .multipart(form);
        self.authorize(builder, token)
    }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn login(&self, email: &str, password: &SecretString) -> Result<TokenResponse, ApiError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let builder = self.client.post(self.endpoint(LOGIN_PATH)?).json(&body);
        self.send(builder).await
    }

    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<MessageResponse, ApiError> {
        let body = SignupRequest {
            username,
            email,
            password: password.expose_secret(),
        };
        let builder = self.client.post(self.endpoint(SIGNUP_PATH)?).json(&body);
        self.send(builder).await
    }

    async fn change_password(
        &self,
        new_password: &SecretString,
        token: &SecretString,
    ) -> Result<MessageResponse, ApiError> {
        let body = ChangePasswordRequest {
            new_password: new_password.expose_secret(),
        };
        let builder = self
            .client
            .post(self.endpoint(CHANGE_PASSWORD_PATH)?)
            .json(&body);
        let builder = self.authorize(builder, token)?;
        self.send(builder).await
    }

    async fn get_profile(&self, token: &SecretString) -> Result<Profile, ApiError> {
        let builder = self.client.get(self.endpoint(PROFILE_PATH)?);
        let builder = self.authorize(builder, token)?;
        self.send(builder).await
    }

    async fn update_profile_pic(
        &self,
        upload: &PictureUpload,
        token: &SecretString,
    ) -> Result<ProfilePicResponse, ApiError> {
        let builder = self.profile_pic_request(upload, token)?;
        self.send(builder).await
    }
}
