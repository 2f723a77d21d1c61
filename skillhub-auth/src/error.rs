use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Missing sessionId or sessionCode in callback")]
    MissingCallbackParams,

    /// The callback's session id did not match the one stored before the
    /// redirect. Token exchange is never attempted in this case.
    #[error("Login session mismatch, refusing token exchange")]
    SessionMismatch,

    #[error("Token exchange failed: {0}")]
    Exchange(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
