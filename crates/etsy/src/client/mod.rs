//! HTTP client for the Etsy Open API v3.

pub mod listings;
pub mod shops;
pub mod users;

use serde::de::DeserializeOwned;

use crate::error::{EtsyError, Result};

/// Production base URL of the Open API v3 application endpoints.
pub const DEFAULT_API_BASE_URL: &str = "https://openapi.etsy.com/v3/application";

/// Authenticated-call client for the Etsy API.
///
/// Every request carries the app keystring in `x-api-key` and the user's
/// OAuth access token as a bearer token.
#[derive(Debug, Clone)]
pub struct EtsyClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EtsyClient {
    /// Create a new client with the given base URL and app keystring.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client sharing an existing `reqwest::Client`.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start an authenticated GET request.
    fn get(&self, path: &str, access_token: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .header("x-api-key", &self.api_key)
            .bearer_auth(access_token)
    }

    /// Decode a success body or turn the response into an `Upstream` error.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes)
                .map_err(|e| EtsyError::InvalidResponse(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let body = if text.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
        };

        tracing::debug!(status = status.as_u16(), "Etsy API returned an error status");
        Err(EtsyError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = EtsyClient::new("http://localhost:1234/v3/application/", "key");
        assert_eq!(client.url("/users/me"), "http://localhost:1234/v3/application/users/me");
    }

    #[tokio::test]
    async fn requests_carry_api_key_and_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("x-api-key", "keystring"))
            .and(header("Authorization", "Bearer access-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": 5})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = EtsyClient::new(mock_server.uri(), "keystring");
        let me = client.get_me("access-1").await.unwrap();
        assert_eq!(me.user_id, 5);
    }

    #[tokio::test]
    async fn error_status_is_reported_with_json_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "insufficient scope"})),
            )
            .mount(&mock_server)
            .await;

        let client = EtsyClient::new(mock_server.uri(), "keystring");
        let err = client.get_me("token").await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.detail(), Some(json!({"error": "insufficient scope"})));
    }

    #[tokio::test]
    async fn error_status_with_text_body_keeps_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let client = EtsyClient::new(mock_server.uri(), "keystring");
        let err = client.get_me("token").await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.detail(), Some(json!("bad gateway")));
    }

    #[tokio::test]
    async fn malformed_success_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = EtsyClient::new(mock_server.uri(), "keystring");
        let err = client.get_me("token").await.unwrap_err();
        assert!(matches!(err, EtsyError::InvalidResponse(_)));
        assert_eq!(err.status(), None);
    }
}
