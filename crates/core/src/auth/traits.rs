use async_trait::async_trait;
use url::Url;

use super::{AuthError, SessionId, SessionRecord, TokenGrant};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Abstraction over the upstream OAuth 2.0 authorization server.
#[async_trait]
pub trait OAuthProviderClient: Send + Sync {
    /// Build the authorization URL the browser is sent to.
    async fn authorization_url(&self, state: &str, pkce_challenge: &str) -> Result<Url>;

    /// Exchange an authorization code plus PKCE verifier for tokens.
    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<TokenGrant>;
}

/// Session storage abstraction, keyed by the cookie-carried session id.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Retrieve a session record. Expired records are reported as absent.
    async fn get_session(&self, id: &SessionId) -> Result<Option<SessionRecord>>;

    /// Insert or replace a session record.
    async fn put_session(&self, id: &SessionId, record: &SessionRecord) -> Result<()>;

    /// Delete a session record. Deleting an unknown id is not an error.
    async fn delete_session(&self, id: &SessionId) -> Result<()>;
}
