use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx answer from the registry, with the message pulled out of the
    /// error envelope when one was present and the raw body kept for caller
    /// inspection.
    Api {
        status: StatusCode,
        message: String,
        body: String,
    },
    /// Network-level failure before a status code was available.
    Transport(reqwest::Error),
}

impl ApiError {
    pub(crate) fn from_response(status: StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error)
            .map(|detail| detail.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        ApiError::Api {
            status,
            message,
            body,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Api {
                status, message, ..
            } => write!(f, "({}) {}", status, message),
            ApiError::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value)
    }
}

/// Error body shape used by the registry: `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}
