//! The HTTP client shared by every endpoint group.

use meditrack_core::{ClientConfig, GatewayError, GatewayResult};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Remote data gateway over the Medi-Track REST API.
///
/// One instance per process; cloning shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    /// Builds the client from the startup configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Network` if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::Network(Box::new(e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url().as_str().trim_end_matches('/').to_owned(),
            token: None,
        })
    }

    /// Attach the session token as a bearer credential on every request.
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_owned);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        self.fetch(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> GatewayResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.fetch(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> GatewayResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.fetch(self.request(method, path).json(body)).await
    }

    /// Like [`send_json`](Self::send_json) for endpoints whose response the client ignores.
    pub(crate) async fn send_json_ignoring_body<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> GatewayResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.request(method, path).json(body))
            .await
            .map(drop)
    }

    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> GatewayResult<T> {
        self.fetch(self.request(method, path)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> GatewayResult<()> {
        self.execute(self.request(Method::DELETE, path))
            .await
            .map(drop)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");
        let request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("response does not match its schema: {}", e);
            GatewayError::Decode(e)
        })
    }

    async fn execute(&self, request: RequestBuilder) -> GatewayResult<Vec<u8>> {
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            let error = status_error(status, &body);
            tracing::warn!(status = status.as_u16(), "api request failed: {}", error);
            Err(error)
        }
    }
}

fn network_error(e: reqwest::Error) -> GatewayError {
    tracing::warn!("api unreachable: {}", e);
    GatewayError::Network(Box::new(e))
}

/// Error payload the backend sends with a rejection. Either field may carry the text.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::Unauthorized { status: code }
        }
        s if s.is_client_error() => GatewayError::Validation {
            status: code,
            message: error_message(body),
        },
        _ => GatewayError::Server { status: code },
    }
}

fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::get;
    use axum::{Json, Router};
    use meditrack_core::error::GENERIC_REJECTION_MESSAGE;
    use serde_json::{json, Value};

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, b""),
            GatewayError::Unauthorized { status: 403 }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, b"{}"),
            GatewayError::Server { status: 502 }
        ));

        let err = status_error(StatusCode::CONFLICT, br#"{ "error": "Slot already booked" }"#);
        assert_eq!(err.user_message(), "Slot already booked");

        let err = status_error(StatusCode::BAD_REQUEST, b"<html>oops</html>");
        assert_eq!(err.user_message(), GENERIC_REJECTION_MESSAGE);
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent_when_present() {
        async fn echo(headers: HeaderMap) -> Json<Value> {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_owned();
            Json(json!({ "auth": auth }))
        }
        let gateway = serve(Router::new().route("/echo", get(echo))).await;

        let anonymous: Value = gateway.get("/echo").await.unwrap();
        assert_eq!(anonymous["auth"], "");

        let signed_in: Value = gateway.with_token(Some("tok")).get("/echo").await.unwrap();
        assert_eq!(signed_in["auth"], "Bearer tok");
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_a_decode_error() {
        let gateway = serve(Router::new().route(
            "/list",
            get(|| async { Json(json!({ "rows": [] })) }),
        ))
        .await;

        let err = gateway.get::<Vec<Value>>("/list").await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        let config = ClientConfig::from_env_values(Some("http://127.0.0.1:9".into()), None, None)
            .unwrap();
        let gateway = HttpGateway::new(&config).unwrap();

        let err = gateway.get::<Value>("/doctors").await.unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let gateway = serve(Router::new().route(
            "/boom",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;

        let err = gateway.get::<Value>("/boom").await.unwrap_err();
        assert!(matches!(err, GatewayError::Server { status: 500 }));
    }
}
