//! HTTP client for the GoldGPT backend.
//!
//! One method per endpoint the client relies on. Every call either yields the
//! decoded body or an [`ApiError`]; there are no retries.

mod errors;
pub mod types;

use std::time::Duration;

pub use errors::{ApiError, ApiErrorKind};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
pub use types::*;
use url::Url;

/// Standard User-Agent header for backend requests.
pub const USER_AGENT: &str = concat!("goldgpt/", env!("CARGO_PKG_VERSION"));

/// Backend client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` with an optional request timeout.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or not http(s), or if the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/chat/history`
    pub async fn chat_history(&self) -> Result<HistoryMap, ApiError> {
        let request = self.request(Method::GET, &["api", "chat", "history"]);
        decode(send(request).await?).await
    }

    /// `POST /api/chat`
    pub async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let request = self.request(Method::POST, &["api", "chat"]).json(request);
        decode(send(request).await?).await
    }

    /// `POST /api/chat/session/{id}`
    ///
    /// Any 2xx counts as saved; the body is not inspected.
    pub async fn save_session(
        &self,
        session_id: &str,
        body: &SaveSessionRequest,
    ) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, &["api", "chat", "session", session_id])
            .json(body);
        send(request).await.map(|_| ())
    }

    /// `GET /api/chat/session/{id}`
    pub async fn load_session(&self, session_id: &str) -> Result<SessionPayload, ApiError> {
        let request = self.request(Method::GET, &["api", "chat", "session", session_id]);
        decode(send(request).await?).await
    }

    /// `DELETE /api/chat/session/{id}`
    pub async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &["api", "chat", "session", session_id]);
        send(request).await.map(|_| ())
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let request = self.request(Method::GET, &["api", "health"]);
        decode(send(request).await?).await
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = endpoint(&self.base_url, segments);
        tracing::debug!(%method, %url, "backend request");
        self.http.request(method, url)
    }
}

/// Validates a base URL.
///
/// # Errors
/// Returns an error if the URL does not parse or is not http(s).
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| anyhow::anyhow!("Invalid backend URL '{raw}': {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Invalid backend URL '{raw}': scheme must be http or https");
    }
    Ok(url)
}

/// Appends path segments to the base URL, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // http(s) URLs always have a path, validated in `parse_base_url`.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::from_reqwest(&e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::http_status(status.as_u16(), &body));
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::from_reqwest(&e))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(format!("Invalid response body: {e}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn endpoint_joins_and_encodes_segments() {
        let base = parse_base_url("http://127.0.0.1:5003").unwrap();
        assert_eq!(
            endpoint(&base, &["api", "chat", "session", "a b/c"]).as_str(),
            "http://127.0.0.1:5003/api/chat/session/a%20b%2Fc"
        );

        let prefixed = parse_base_url("https://example.com/goldgpt/").unwrap();
        assert_eq!(
            endpoint(&prefixed, &["api", "health"]).as_str(),
            "https://example.com/goldgpt/api/health"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn send_chat_posts_message_and_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"message": "Hello", "session_id": "abc"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Hi",
                "session_id": "abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let response = client
            .send_chat(&ChatRequest {
                message: "Hello".to_string(),
                session_id: Some("abc".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(response.response, "Hi");
        assert_eq!(response.session_id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/session/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let err = client.load_session("missing").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 404: Session not found");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/history"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let err = client.chat_history().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_connection_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ApiClient::new(&format!("http://127.0.0.1:{port}"), None).unwrap();
        let err = client.health().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Connection);
    }
}
