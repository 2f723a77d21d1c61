use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile snapshot received from the identity provider at login or refresh
/// time. Not edited by this application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The persisted session: both tokens and the user profile, always saved and
/// cleared as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Process-wide authentication state owned by [`crate::AuthSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl AuthState {
    /// Initial state before stored credentials have been resolved.
    pub fn loading() -> Self {
        Self {
            user: None,
            access_token: None,
            refresh_token: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_loading: false,
            ..Self::loading()
        }
    }

    pub fn authenticated(credentials: &Credentials) -> Self {
        Self {
            user: Some(credentials.user.clone()),
            access_token: Some(credentials.access_token.clone()),
            refresh_token: Some(credentials.refresh_token.clone()),
            is_authenticated: true,
            is_loading: false,
        }
    }
}
