use crate::error::AuthError;
use crate::models::{AuthState, Credentials};
use crate::session_client::{LoginKind, SessionClient};
use crate::store::CredentialStore;
use tokio::sync::{Mutex, RwLock};
use url::Url;

/// Query parameters from the identity provider's redirect back to us.
#[derive(Debug, Clone)]
pub struct CallbackParams {
    pub session_id: String,
    pub session_code: String,
    pub redirect: Option<String>,
}

impl CallbackParams {
    /// Parse a callback URL. Missing `sessionId` or `sessionCode` is an
    /// authentication failure before anything else happens.
    pub fn from_url(callback_url: &str) -> Result<Self, AuthError> {
        let url = Url::parse(callback_url).map_err(|_| AuthError::MissingCallbackParams)?;

        let mut session_id = None;
        let mut session_code = None;
        let mut redirect = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "sessionId" => session_id = Some(value.to_string()),
                "sessionCode" => session_code = Some(value.to_string()),
                "redirect" => redirect = Some(value.to_string()),
                _ => {}
            }
        }

        match (session_id, session_code) {
            (Some(session_id), Some(session_code)) => Ok(Self {
                session_id,
                session_code,
                redirect,
            }),
            _ => Err(AuthError::MissingCallbackParams),
        }
    }
}

/// The authentication state machine.
///
/// One instance owns the process-wide [`AuthState`]; collaborators receive it
/// by injection rather than through a global. Lifecycle:
/// loading on construction, resolved to authenticated or anonymous by
/// [`initialize`](Self::initialize), back to anonymous on sign-out or failed
/// refresh.
pub struct AuthSession {
    store: CredentialStore,
    client: SessionClient,
    state: RwLock<AuthState>,
    // Serializes refresh attempts; refresh tokens rotate, so two racing
    // refreshes would invalidate each other.
    refresh_lock: Mutex<()>,
}

impl AuthSession {
    pub fn new(store: CredentialStore, client: SessionClient) -> Self {
        Self {
            store,
            client,
            state: RwLock::new(AuthState::loading()),
            refresh_lock: Mutex::new(()),
        }
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Resolve stored credentials once at startup: still-valid token →
    /// authenticated, expired token → refresh (clearing storage on failure),
    /// nothing stored → anonymous.
    pub async fn initialize(&self) {
        let resolved = match self.store.load() {
            Some(credentials) if !self.store.is_expired(&credentials.access_token) => {
                AuthState::authenticated(&credentials)
            }
            Some(credentials) => {
                match self
                    .client
                    .refresh_access_token(&credentials.refresh_token)
                    .await
                {
                    Some(fresh) => {
                        if let Err(e) = self.store.save(&fresh) {
                            tracing::warn!("Failed to persist refreshed credentials: {}", e);
                        }
                        AuthState::authenticated(&fresh)
                    }
                    None => {
                        if let Err(e) = self.store.clear() {
                            tracing::warn!("Failed to clear stored credentials: {}", e);
                        }
                        AuthState::anonymous()
                    }
                }
            }
            None => AuthState::anonymous(),
        };

        *self.state.write().await = resolved;
    }

    /// Provider redirect URL for signing in. Does not change state; the
    /// transition happens later through [`handle_callback`](Self::handle_callback).
    pub fn sign_in_url(
        &self,
        callback_url: &str,
        redirect_path: Option<&str>,
    ) -> Result<String, AuthError> {
        self.client
            .build_login_url(&self.store, callback_url, LoginKind::SignIn, redirect_path)
    }

    pub fn sign_up_url(
        &self,
        callback_url: &str,
        redirect_path: Option<&str>,
    ) -> Result<String, AuthError> {
        self.client
            .build_login_url(&self.store, callback_url, LoginKind::SignUp, redirect_path)
    }

    /// Complete the login redirect: verify the session id against the one
    /// stored before the redirect, then exchange the code. The exchange is
    /// never attempted on a mismatch.
    pub async fn handle_callback(&self, params: &CallbackParams) -> Result<(), AuthError> {
        let stored = self
            .store
            .load_login_session()
            .ok_or(AuthError::SessionMismatch)?;
        if params.session_id != stored {
            return Err(AuthError::SessionMismatch);
        }

        let credentials = self
            .client
            .exchange_code_for_tokens(&params.session_id, &params.session_code)
            .await?;

        if let Err(e) = self.store.clear_login_session() {
            tracing::debug!("Failed to clear login session id: {}", e);
        }

        self.set_credentials(credentials).await
    }

    /// Persist credentials and transition to authenticated.
    pub async fn set_credentials(&self, credentials: Credentials) -> Result<(), AuthError> {
        self.store.save(&credentials)?;
        *self.state.write().await = AuthState::authenticated(&credentials);
        Ok(())
    }

    /// Best-effort remote revocation, then unconditional local sign-out. The
    /// anonymous state is reached even when the provider is unreachable.
    pub async fn sign_out(&self) {
        let state = self.state().await;
        if let (Some(access_token), Some(refresh_token)) =
            (state.access_token, state.refresh_token)
        {
            if let Err(e) = self.client.revoke_tokens(&access_token, &refresh_token).await {
                tracing::debug!("Token revocation failed, signing out locally: {}", e);
            }
        }

        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear stored credentials: {}", e);
        }
        *self.state.write().await = AuthState::anonymous();
    }

    /// Rotate the tokens. Returns `false` without a network call when no
    /// refresh token is held; on refresh failure the session degrades to
    /// anonymous.
    ///
    /// Concurrent callers are serialized: whoever waits on the lock re-checks
    /// freshness afterwards and observes the first caller's rotation instead
    /// of spending the already-consumed refresh token.
    pub async fn refresh(&self) -> bool {
        let _guard = self.refresh_lock.lock().await;

        let current = self.state().await;
        if current.is_authenticated {
            if let Some(token) = &current.access_token {
                if !self.store.is_expired(token) {
                    return true;
                }
            }
        }

        let Some(refresh_token) = current.refresh_token else {
            return false;
        };

        match self.client.refresh_access_token(&refresh_token).await {
            Some(fresh) => {
                if let Err(e) = self.store.save(&fresh) {
                    tracing::warn!("Failed to persist refreshed credentials: {}", e);
                }
                *self.state.write().await = AuthState::authenticated(&fresh);
                true
            }
            None => {
                if let Err(e) = self.store.clear() {
                    tracing::warn!("Failed to clear stored credentials: {}", e);
                }
                *self.state.write().await = AuthState::anonymous();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::store::tests::token_expiring_in;
    use chrono::Duration;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "dev@example.com".to_string(),
            name: "Dev".to_string(),
            avatar_url: None,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    fn credentials(access_token: String) -> Credentials {
        Credentials {
            access_token,
            refresh_token: "refresh-1".to_string(),
            user: user(),
        }
    }

    fn user_body_with_headers(server: &mut mockito::Server, path: &str, access_token: &str) -> mockito::Mock {
        server
            .mock("POST", path)
            .with_header("cl-access-token", access_token)
            .with_header("cl-refresh-token", "refresh-2")
            .with_body(
                r#"{"user":{"id":"u1","email":"dev@example.com","name":"Dev","avatar_url":null,"created_at":"2024-01-01T00:00:00Z"}}"#,
            )
    }

    fn session_for(server: &mockito::Server) -> (AuthSession, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().to_path_buf()).unwrap();
        let client = SessionClient::new(server.url(), "https://example.com".to_string());
        (AuthSession::new(store, client), dir)
    }

    #[test]
    fn callback_params_require_both_values() {
        assert!(CallbackParams::from_url("https://example.com/auth/callback").is_err());
        assert!(
            CallbackParams::from_url("https://example.com/auth/callback?sessionId=s").is_err()
        );

        let params = CallbackParams::from_url(
            "https://example.com/auth/callback?sessionId=s&sessionCode=c&redirect=/skills",
        )
        .unwrap();
        assert_eq!(params.session_id, "s");
        assert_eq!(params.session_code, "c");
        assert_eq!(params.redirect.as_deref(), Some("/skills"));
    }

    #[tokio::test]
    async fn initialize_with_valid_token_is_authenticated() {
        let server = mockito::Server::new_async().await;
        let (session, _dir) = session_for(&server);
        session
            .store
            .save(&credentials(token_expiring_in(Duration::hours(1))))
            .unwrap();

        session.initialize().await;

        let state = session.state().await;
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.user.unwrap().email, "dev@example.com");
    }

    #[tokio::test]
    async fn initialize_refreshes_expired_token() {
        let mut server = mockito::Server::new_async().await;
        let fresh_token = token_expiring_in(Duration::hours(1));
        let mock = user_body_with_headers(&mut server, "/refresh-token", &fresh_token)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session
            .store
            .save(&credentials(token_expiring_in(Duration::minutes(-5))))
            .unwrap();

        session.initialize().await;

        let state = session.state().await;
        assert!(state.is_authenticated);
        assert_eq!(state.access_token.unwrap(), fresh_token);
        assert_eq!(state.refresh_token.unwrap(), "refresh-2");
        // Rotated credentials were persisted
        assert_eq!(session.store.load().unwrap().refresh_token, "refresh-2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn initialize_with_failed_refresh_clears_storage() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/refresh-token")
            .with_status(401)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session
            .store
            .save(&credentials(token_expiring_in(Duration::minutes(-5))))
            .unwrap();

        session.initialize().await;

        let state = session.state().await;
        assert_eq!(state, AuthState::anonymous());
        assert!(session.store.load().is_none());
    }

    #[tokio::test]
    async fn initialize_without_credentials_is_anonymous() {
        let server = mockito::Server::new_async().await;
        let (session, _dir) = session_for(&server);

        session.initialize().await;

        assert_eq!(session.state().await, AuthState::anonymous());
    }

    #[tokio::test]
    async fn mismatched_session_id_never_reaches_exchange() {
        let mut server = mockito::Server::new_async().await;
        let exchange = server
            .mock("POST", "/cli/sessions/exchange")
            .expect(0)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session.store.save_login_session("expected").unwrap();

        let params = CallbackParams {
            session_id: "tampered".to_string(),
            session_code: "code".to_string(),
            redirect: None,
        };
        let err = session.handle_callback(&params).await.unwrap_err();

        assert!(matches!(err, AuthError::SessionMismatch));
        exchange.assert_async().await;
    }

    #[tokio::test]
    async fn successful_callback_authenticates_and_clears_session_id() {
        let mut server = mockito::Server::new_async().await;
        let token = token_expiring_in(Duration::hours(1));
        user_body_with_headers(&mut server, "/cli/sessions/exchange", &token)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session.store.save_login_session("sess-1").unwrap();

        let params = CallbackParams {
            session_id: "sess-1".to_string(),
            session_code: "code-1".to_string(),
            redirect: None,
        };
        session.handle_callback(&params).await.unwrap();

        assert!(session.state().await.is_authenticated);
        assert!(session.store.load_login_session().is_none());
    }

    #[tokio::test]
    async fn sign_out_is_local_even_when_revoke_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/revoke-token")
            .with_status(500)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session
            .set_credentials(credentials(token_expiring_in(Duration::hours(1))))
            .await
            .unwrap();

        session.sign_out().await;

        assert_eq!(session.state().await, AuthState::anonymous());
        assert!(session.store.load().is_none());
    }

    #[tokio::test]
    async fn refresh_without_refresh_token_fails_fast() {
        let mut server = mockito::Server::new_async().await;
        let refresh = server
            .mock("POST", "/refresh-token")
            .expect(0)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session.initialize().await;

        assert!(!session.refresh().await);
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn concurrent_refreshes_hit_the_provider_once() {
        let mut server = mockito::Server::new_async().await;
        let fresh_token = token_expiring_in(Duration::hours(1));
        let mock = user_body_with_headers(&mut server, "/refresh-token", &fresh_token)
            .expect(1)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session
            .set_credentials(credentials(token_expiring_in(Duration::minutes(-5))))
            .await
            .unwrap();

        let session = Arc::new(session);
        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.refresh().await })
        };
        let second = {
            let session = session.clone();
            tokio::spawn(async move { session.refresh().await })
        };

        assert!(first.await.unwrap());
        assert!(second.await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_refresh_degrades_to_anonymous() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/refresh-token")
            .with_status(401)
            .create_async()
            .await;

        let (session, _dir) = session_for(&server);
        session
            .set_credentials(credentials(token_expiring_in(Duration::minutes(-5))))
            .await
            .unwrap();

        assert!(!session.refresh().await);
        assert_eq!(session.state().await, AuthState::anonymous());
        assert!(session.store.load().is_none());
    }
}
