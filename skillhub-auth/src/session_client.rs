use crate::error::AuthError;
use crate::models::{Credentials, User};
use crate::store::CredentialStore;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

// Tokens come back in response headers on exchange and refresh; only the user
// profile is in the body.
const ACCESS_TOKEN_HEADER: &str = "cl-access-token";
const REFRESH_TOKEN_HEADER: &str = "cl-refresh-token";

const INITIATOR: &str = "skillhub";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    SignIn,
    SignUp,
}

impl LoginKind {
    fn path(self) -> &'static str {
        match self {
            LoginKind::SignIn => "login",
            LoginKind::SignUp => "signup",
        }
    }
}

/// Client for the external identity provider: login URL construction, code
/// exchange, token refresh, and revocation.
pub struct SessionClient {
    http: reqwest::Client,
    auth_url: String,
    webapp_url: String,
}

impl SessionClient {
    pub fn new(auth_url: String, webapp_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            auth_url: auth_url.trim_end_matches('/').to_string(),
            webapp_url: webapp_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the provider redirect URL for login or signup. Generates a fresh
    /// session id and stores it for the CSRF check on callback; no network
    /// call happens here.
    pub fn build_login_url(
        &self,
        store: &CredentialStore,
        callback_url: &str,
        kind: LoginKind,
        redirect_path: Option<&str>,
    ) -> Result<String, AuthError> {
        let session_id = Uuid::new_v4().to_string();
        store.save_login_session(&session_id)?;

        let mut url = Url::parse(&format!("{}/{}", self.webapp_url, kind.path()))
            .map_err(|e| AuthError::Configuration(format!("Invalid webapp URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("sessionId", &session_id)
            .append_pair("initiator", INITIATOR)
            .append_pair("callback", callback_url);
        if let Some(path) = redirect_path {
            url.query_pairs_mut().append_pair("redirect", path);
        }

        Ok(url.into())
    }

    /// Exchange the callback's session id and code for credentials.
    pub async fn exchange_code_for_tokens(
        &self,
        session_id: &str,
        session_code: &str,
    ) -> Result<Credentials, AuthError> {
        let url = format!("{}/cli/sessions/exchange", self.auth_url);
        let response = self
            .http
            .post(&url)
            .json(&ExchangeRequest {
                session_id,
                session_code,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Exchange(format!(
                "Exchange endpoint returned {}",
                response.status()
            )));
        }

        credentials_from_response(response).await
    }

    /// New credentials, or `None` on any failure. Refresh failure is a
    /// sentinel, never an error, so callers fall back to signed-out.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Option<Credentials> {
        match self.try_refresh(refresh_token).await {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                None
            }
        }
    }

    async fn try_refresh(&self, refresh_token: &str) -> Result<Credentials, AuthError> {
        let url = format!("{}/refresh-token", self.auth_url);
        let response = self
            .http
            .post(&url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Exchange(format!(
                "Refresh endpoint returned {}",
                response.status()
            )));
        }

        credentials_from_response(response).await
    }

    /// Tell the provider the tokens are no longer in use. Callers discard the
    /// result; sign-out succeeds locally regardless.
    pub async fn revoke_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        let url = format!("{}/revoke-token", self.auth_url);
        self.http
            .post(&url)
            .json(&RevokeRequest {
                access_token,
                refresh_token,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

async fn credentials_from_response(response: reqwest::Response) -> Result<Credentials, AuthError> {
    let access_token = header_value(&response, ACCESS_TOKEN_HEADER)?;
    let refresh_token = header_value(&response, REFRESH_TOKEN_HEADER)?;
    let body: ExchangeResponse = response.json().await?;

    Ok(Credentials {
        access_token,
        refresh_token,
        user: body.user,
    })
}

fn header_value(response: &reqwest::Response, name: &str) -> Result<String, AuthError> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| AuthError::Exchange(format!("Missing {} response header", name)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRequest<'a> {
    session_id: &'a str,
    session_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    user: User,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
struct RevokeRequest<'a> {
    access_token: &'a str,
    refresh_token: &'a str,
}
