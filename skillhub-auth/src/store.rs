use crate::error::AuthError;
use crate::models::Credentials;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

// Treat tokens as expired slightly early so requests in flight don't cross
// the real expiry.
const EXPIRY_BUFFER: Duration = Duration::minutes(5);

const CREDENTIALS_FILE: &str = "credentials.json";
const LOGIN_SESSION_FILE: &str = "login_session";

/// File-backed persistence of the current session.
///
/// The two tokens and the user profile live in a single JSON document so they
/// are written and removed together; there is no state where one exists
/// without the others. A separate short-lived file holds the pending login
/// session id used for the CSRF check during login.
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new() -> Result<Self, AuthError> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Storage("Could not find cache directory".to_string()))?
            .join("skillhub");
        Self::at(dir)
    }

    /// Open a store rooted at an explicit directory.
    pub fn at(dir: PathBuf) -> Result<Self, AuthError> {
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                AuthError::Storage(format!("Failed to create credential directory: {}", e))
            })?;
        }
        Ok(Self { dir })
    }

    fn credentials_path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE)
    }

    fn login_session_path(&self) -> PathBuf {
        self.dir.join(LOGIN_SESSION_FILE)
    }

    pub fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(credentials)?;
        write_private(&self.credentials_path(), &json)
    }

    /// The persisted credentials, or `None` when the file is missing,
    /// unreadable, or corrupt. A corrupt blob is the same as no session.
    pub fn load(&self) -> Option<Credentials> {
        let json = fs::read_to_string(self.credentials_path()).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Remove the credentials and any pending login session id.
    pub fn clear(&self) -> Result<(), AuthError> {
        remove_if_exists(&self.credentials_path())?;
        remove_if_exists(&self.login_session_path())?;
        Ok(())
    }

    pub fn save_login_session(&self, session_id: &str) -> Result<(), AuthError> {
        write_private(&self.login_session_path(), session_id)
    }

    pub fn load_login_session(&self) -> Option<String> {
        let session_id = fs::read_to_string(self.login_session_path()).ok()?;
        let session_id = session_id.trim();
        if session_id.is_empty() {
            None
        } else {
            Some(session_id.to_string())
        }
    }

    pub fn clear_login_session(&self) -> Result<(), AuthError> {
        remove_if_exists(&self.login_session_path())
    }

    /// Whether the access token is expired or about to expire. Tokens whose
    /// payload cannot be decoded are treated as expired.
    pub fn is_expired(&self, token: &str) -> bool {
        match token_expiry(token) {
            Some(expires_at) => expires_at <= Utc::now() + EXPIRY_BUFFER,
            None => true,
        }
    }
}

fn write_private(path: &PathBuf, contents: &str) -> Result<(), AuthError> {
    fs::write(path, contents)
        .map_err(|e| AuthError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .map_err(|e| AuthError::Storage(format!("Failed to read file permissions: {}", e)))?
            .permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)
            .map_err(|e| AuthError::Storage(format!("Failed to set file permissions: {}", e)))?;
    }

    Ok(())
}

fn remove_if_exists(path: &PathBuf) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| AuthError::Storage(format!("Failed to remove {}: {}", path.display(), e)))?;
    }
    Ok(())
}

#[derive(Deserialize)]
struct Claims {
    exp: i64,
}

/// Expiry claim of a JWT, read from the payload without signature
/// verification. The server remains the authority; this only schedules
/// refreshes client-side.
fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Utc.timestamp_opt(claims.exp, 0).single()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::User;

    pub(crate) fn token_expiring_in(duration: Duration) -> String {
        let exp = (Utc::now() + duration).timestamp();
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    fn credentials() -> Credentials {
        Credentials {
            access_token: token_expiring_in(Duration::hours(1)),
            refresh_token: "refresh-1".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "dev@example.com".to_string(),
                name: "Dev".to_string(),
                avatar_url: None,
                created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            },
        }
    }

    fn store() -> (CredentialStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().to_path_buf()).unwrap();
        (store, dir)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (store, _dir) = store();
        let creds = credentials();
        store.save(&creds).unwrap();
        assert_eq!(store.load().unwrap(), creds);
    }

    #[test]
    fn load_returns_none_without_saved_credentials() {
        let (store, _dir) = store();
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_credentials_are_treated_as_absent() {
        let (store, _dir) = store();
        fs::write(store.credentials_path(), "{not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn missing_field_is_treated_as_absent() {
        let (store, _dir) = store();
        fs::write(
            store.credentials_path(),
            r#"{"access_token":"a","refresh_token":"b"}"#,
        )
        .unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_removes_credentials_and_login_session() {
        let (store, _dir) = store();
        store.save(&credentials()).unwrap();
        store.save_login_session("sess-1").unwrap();

        store.clear().unwrap();

        assert!(store.load().is_none());
        assert!(store.load_login_session().is_none());
    }

    #[test]
    fn login_session_round_trips() {
        let (store, _dir) = store();
        store.save_login_session("sess-1").unwrap();
        assert_eq!(store.load_login_session().unwrap(), "sess-1");
        store.clear_login_session().unwrap();
        assert!(store.load_login_session().is_none());
    }

    #[test]
    fn fresh_token_is_not_expired() {
        let (store, _dir) = store();
        assert!(!store.is_expired(&token_expiring_in(Duration::hours(1))));
    }

    #[test]
    fn token_inside_buffer_is_expired() {
        let (store, _dir) = store();
        assert!(store.is_expired(&token_expiring_in(Duration::minutes(3))));
        assert!(store.is_expired(&token_expiring_in(Duration::minutes(-10))));
    }

    #[test]
    fn undecodable_token_is_expired() {
        let (store, _dir) = store();
        assert!(store.is_expired("not-a-jwt"));
        assert!(store.is_expired("a.b.c"));
        assert!(store.is_expired(""));
    }
}
