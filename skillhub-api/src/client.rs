use crate::error::ApiError;
use reqwest::header::CONTENT_TYPE;
pub use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::sync::Mutex;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Payload carried by a request: none, query string, or JSON body.
pub enum RequestData<T> {
    None,
    Query(T),
    Json(T),
}

/// A typed registry request: an endpoint path, a payload, and the response
/// shape it deserializes into.
pub trait Request {
    type Data: Serialize;
    type Response: DeserializeOwned;

    fn endpoint(&self) -> Cow<'_, str>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::None
    }

    /// The registry requires authentication on every endpoint today; requests
    /// can opt out if a public surface appears.
    fn requires_auth(&self) -> bool {
        true
    }
}

/// Thin stateless transport for the registry API.
///
/// Adds the JSON content type, attaches the bearer token when a request wants
/// auth and a token is present, and translates non-2xx responses into
/// [`ApiError::Api`]. No retry and no caching; polling/backoff policy belongs
/// to callers.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    access_token: Mutex<Option<String>>,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            http,
            base_url,
            access_token: Mutex::new(None),
        }
    }

    pub fn bearer_auth(self, token: impl Into<String>) -> Self {
        self.set_access_token(Some(token.into()));
        self
    }

    /// Swap the bearer token, e.g. after a refresh rotated it.
    pub fn set_access_token(&self, token: Option<String>) {
        let mut guard = self
            .access_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }

    fn access_token(&self) -> Option<String> {
        self.access_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: Request,
    {
        let url = format!("{}{}", self.base_url, request.endpoint());
        let mut builder = self
            .http
            .request(request.method(), &url)
            .header(CONTENT_TYPE, "application/json");

        match request.data() {
            RequestData::Query(query) => builder = builder.query(query),
            RequestData::Json(body) => builder = builder.json(body),
            RequestData::None => {}
        }

        if request.requires_auth() {
            if let Some(token) = self.access_token() {
                builder = builder.bearer_auth(token);
            }
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, body));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pong {
        ok: bool,
    }

    struct Ping {
        authenticated: bool,
    }

    impl Request for Ping {
        type Data = ();
        type Response = Pong;

        fn endpoint(&self) -> Cow<'_, str> {
            "/ping".into()
        }

        fn requires_auth(&self) -> bool {
            self.authenticated
        }
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_required() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("authorization", "Bearer tok-123")
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = Client::new(server.url()).bearer_auth("tok-123");
        let pong = client.send(Ping { authenticated: true }).await.unwrap();

        assert!(pong.ok);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn omits_bearer_token_when_not_required() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = Client::new(server.url()).bearer_auth("tok-123");
        client
            .send(Ping {
                authenticated: false,
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn extracts_message_from_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ping")
            .with_status(404)
            .with_body(r#"{"error":{"message":"skill not found"}}"#)
            .create_async()
            .await;

        let client = Client::new(server.url());
        let err = client
            .send(Ping {
                authenticated: false,
            })
            .await
            .unwrap_err();

        match err {
            ApiError::Api {
                status, message, ..
            } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(message, "skill not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn falls_back_to_status_text_without_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ping")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let client = Client::new(server.url());
        let err = client
            .send(Ping {
                authenticated: false,
            })
            .await
            .unwrap_err();

        match err {
            ApiError::Api {
                status,
                message,
                body,
            } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "Internal Server Error");
                assert_eq!(body, "oops");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
