//! Authenticated session state.
//!
//! The session is an explicit value with a defined validity window rather
//! than a bare "token exists" check: a persisted session past its expiry is
//! treated as logged out and removed on load.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// An authenticated session granted by `/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    /// Account the token was issued to
    pub account: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, account: String, ttl_hours: i64) -> Self {
        let issued_at = Utc::now();
        Self {
            token,
            account,
            issued_at,
            expires_at: issued_at + Duration::hours(ttl_hours),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// File-backed session store under a fixed path (the persisted client
/// state of the original app)
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session. An expired session is deleted and
    /// reported as absent.
    pub fn load(&self) -> AppResult<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::SessionStore(e.to_string())),
        };
        let session: Session = serde_json::from_str(&raw)
            .map_err(|e| AppError::SessionStore(format!("corrupt session file: {}", e)))?;
        if !session.is_valid() {
            tracing::debug!("Persisted session expired at {}, clearing", session.expires_at);
            self.clear()?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw).map_err(|e| AppError::SessionStore(e.to_string()))
    }

    pub fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::SessionStore(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn round_trips_a_valid_session() {
        let (_dir, store) = store();
        let session = Session::new("tok-123".into(), "admin".into(), 24);
        store.save(&session).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.account, "admin");
        assert!(loaded.is_valid());
    }

    #[test]
    fn expired_session_is_cleared_on_load() {
        let (_dir, store) = store();
        let mut session = Session::new("tok".into(), "admin".into(), 24);
        session.expires_at = Utc::now() - Duration::hours(1);
        store.save(&session).unwrap();
        assert!(store.load().unwrap().is_none());
        // file removed too
        assert!(!store.path().exists());
    }

    #[test]
    fn missing_file_means_logged_out() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn bearer_header_format() {
        let session = Session::new("abc".into(), "x".into(), 1);
        assert_eq!(session.bearer(), "Bearer abc");
    }
}
