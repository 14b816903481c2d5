//! Session management module
//!
//! Holds the bearer token returned at login. A `Session` is an explicit
//! handle passed to whatever issues authenticated calls; clones share the
//! same token.

use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use crate::config::ClientConfig;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Refusing to store an empty token")]
    EmptyToken,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<SecretString>>>,
    store_path: Option<PathBuf>,
}

impl Session {
    /// A session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A session persisted to `path`.
    ///
    /// A token already stored there is loaded; a missing file simply means
    /// signed out.
    pub fn persistent<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let token = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let content = content.trim();
                (!content.is_empty()).then(|| SecretString::from(content.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        #[cfg(feature = "tracing")]
        tracing::info!(path = ?path, restored = token.is_some(), "session opened");

        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            store_path: Some(path),
        })
    }

    /// Opens the session described by `config`: persisted when
    /// `session_path` is set, in memory otherwise.
    pub fn from_config(config: &ClientConfig) -> Result<Self, SessionError> {
        match &config.session_path {
            Some(path) => Self::persistent(path),
            None => Ok(Self::in_memory()),
        }
    }

    /// Stores `token` as the current credential.
    pub fn sign_in(&self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        if let Some(path) = &self.store_path {
            std::fs::write(path, token).map_err(|source| SessionError::Io {
                path: path.clone(),
                source,
            })?;
        }

        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(SecretString::from(token.to_string()));
        Ok(())
    }

    /// Forgets the current credential.
    ///
    /// The in-memory token is dropped even if removing the file fails.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        {
            let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
            *guard = None;
        }

        if let Some(path) = &self.store_path {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(SessionError::Io {
                        path: path.clone(),
                        source,
                    });
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!("session cleared");

        Ok(())
    }

    /// Returns a copy of the current token, if signed in.
    pub fn token(&self) -> Option<SecretString> {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .map(|t| SecretString::from(t.expose_secret().to_string()))
    }

    pub fn is_authenticated(&self) -> bool {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_sign_in_and_out() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());

        session.sign_in("abc123").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().unwrap().expose_secret(), "abc123");

        session.sign_out().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clones_share_token() {
        let session = Session::in_memory();
        let other = session.clone();
        session.sign_in("shared").unwrap();
        assert_eq!(other.token().unwrap().expose_secret(), "shared");
        other.sign_out().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_token_rejected() {
        let session = Session::in_memory();
        assert!(matches!(session.sign_in("  "), Err(SessionError::EmptyToken)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_persistent_missing_file_is_signed_out() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let session = Session::persistent(dir.path().join("token")).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_persistent_round_trip_through_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("token");

        let session = Session::persistent(&path).unwrap();
        session.sign_in("tok-42").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "tok-42");

        let restored = Session::persistent(&path).unwrap();
        assert_eq!(restored.token().unwrap().expose_secret(), "tok-42");

        restored.sign_out().unwrap();
        assert!(!path.exists());
        // signing out twice is fine
        restored.sign_out().unwrap();
    }

    #[test]
    fn test_from_config_uses_session_path() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("token");
        std::fs::write(&path, "stored-tok\n").unwrap();

        let mut config = ClientConfig::new("http://localhost:8000").unwrap();
        let session = Session::from_config(&config).unwrap();
        assert!(!session.is_authenticated());

        config.session_path = Some(path.clone());
        let session = Session::from_config(&config).unwrap();
        assert_eq!(session.token().unwrap().expose_secret(), "stored-tok");

        session.sign_out().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_unwritable_path() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("missing-dir").join("token");
        let session = Session::persistent(&path).unwrap();

        let result = session.sign_in("tok");
        assert!(matches!(result, Err(SessionError::Io { .. })));
        assert!(!session.is_authenticated());
    }
}
