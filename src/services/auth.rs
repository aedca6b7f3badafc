//! Authentication service: login, logout, session restore

use std::sync::Arc;

use crate::api::RestClient;
use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};
use crate::session::{Session, SessionStore};

#[derive(Clone)]
pub struct AuthService {
    rest: Arc<RestClient>,
    store: SessionStore,
    ttl_hours: i64,
}

impl AuthService {
    pub fn new(rest: Arc<RestClient>, config: &SessionConfig) -> Self {
        Self {
            rest,
            store: SessionStore::new(config.token_file.clone()),
            ttl_hours: config.ttl_hours,
        }
    }

    /// Restore a persisted session, if a valid one exists, and install it
    /// on the transport
    pub fn restore(&self) -> AppResult<Option<Session>> {
        let session = self.store.load()?;
        self.rest.set_session(session.clone());
        Ok(session)
    }

    /// Exchange credentials for a session; persists it and installs it on
    /// the transport
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Username and password are required".to_string(),
            ));
        }
        let response = self.rest.login(username, password).await?;
        let session = Session::new(response.token, username.to_string(), self.ttl_hours);
        self.store.save(&session)?;
        self.rest.set_session(Some(session.clone()));
        tracing::info!("Logged in as {} until {}", session.account, session.expires_at);
        Ok(session)
    }

    /// Forget the session locally; the backend keeps no server-side state
    pub fn logout(&self) -> AppResult<()> {
        self.store.clear()?;
        self.rest.set_session(None);
        tracing::info!("Logged out");
        Ok(())
    }

    /// Currently persisted valid session, if any
    pub fn current(&self) -> AppResult<Option<Session>> {
        self.store.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;

    fn service(dir: &tempfile::TempDir) -> AuthService {
        let api = crate::api::ApiClient::new(&crate::config::BackendConfig::default()).unwrap();
        AuthService::new(
            api.rest,
            &SessionConfig {
                token_file: dir.path().join("session.json"),
                ttl_hours: 1,
            },
        )
    }

    #[test]
    fn empty_credentials_fail_before_any_network_call() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        tokio_test::block_on(async {
            let err = svc.login("", "secret").await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            let err = svc.login("admin", "").await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        });
    }

    #[test]
    fn restore_with_no_session_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        assert!(svc.restore().unwrap().is_none());
        assert!(svc.current().unwrap().is_none());
    }
}
