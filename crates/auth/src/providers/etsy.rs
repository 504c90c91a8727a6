//! Etsy OAuth 2.0 provider (authorization code + PKCE).

use async_trait::async_trait;
use oauth2::{
    basic::BasicClient, reqwest, AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret,
    CsrfToken, EndpointNotSet, EndpointSet, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse,
    TokenUrl,
};
use shopkeep_core::auth::{AuthError, OAuthProviderClient, Result, TokenGrant};
use url::Url;

use crate::config::AuthConfig;

/// Scopes requested on every authorization.
pub const ETSY_SCOPES: [&str; 11] = [
    "listings_r",
    "listings_w",
    "shops_r",
    "shops_w",
    "transactions_r",
    "transactions_w",
    "address_r",
    "address_w",
    "email_r",
    "profile_r",
    "profile_w",
];

/// A `BasicClient` with authorization and token endpoints set.
type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Etsy OAuth provider.
///
/// Endpoint URLs are validated when a flow uses them rather than at startup,
/// so a misconfigured deployment still boots and reports the problem per request.
pub struct EtsyProvider {
    client_id: String,
    client_secret: Option<String>,
    redirect_uri: String,
    authorize_url: String,
    token_url: String,
    http_client: reqwest::Client,
}

impl EtsyProvider {
    /// Create a new Etsy provider from the auth configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        // Build HTTP client without redirect following (security requirement)
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        let client_secret = if config.send_client_secret {
            config.shared_secret.clone()
        } else {
            None
        };

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret,
            redirect_uri: config.redirect_uri.clone(),
            authorize_url: config.authorize_url.clone(),
            token_url: config.token_url.clone(),
            http_client,
        })
    }

    fn client(&self) -> Result<ConfiguredClient> {
        if self.client_id.is_empty() {
            return Err(AuthError::Provider("client id is not configured".to_string()));
        }

        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_auth_uri(
                AuthUrl::new(self.authorize_url.clone())
                    .map_err(|e| AuthError::Provider(format!("authorize url: {e}")))?,
            )
            .set_token_uri(
                TokenUrl::new(self.token_url.clone())
                    .map_err(|e| AuthError::Provider(format!("token url: {e}")))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(self.redirect_uri.clone())
                    .map_err(|e| AuthError::Provider(format!("redirect uri: {e}")))?,
            )
            // Public client: client_id travels in the form body, not in Basic auth.
            .set_auth_type(AuthType::RequestBody);

        Ok(match &self.client_secret {
            Some(secret) => client.set_client_secret(ClientSecret::new(secret.clone())),
            None => client,
        })
    }
}

#[async_trait]
impl OAuthProviderClient for EtsyProvider {
    async fn authorization_url(&self, state: &str, pkce_challenge: &str) -> Result<Url> {
        let client = self.client()?;

        // Clone state and pkce_challenge to avoid lifetime issues with closures
        let state_owned = state.to_string();
        let pkce_challenge_owned = pkce_challenge.to_string();

        let (auth_url, _csrf_token) = client
            .authorize_url(move || CsrfToken::new(state_owned))
            .add_scopes(ETSY_SCOPES.iter().map(|scope| Scope::new(scope.to_string())))
            .add_extra_param("code_challenge", pkce_challenge_owned)
            .add_extra_param("code_challenge_method", "S256")
            .url();

        Ok(auth_url)
    }

    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<TokenGrant> {
        let client = self.client()?;

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        Ok(TokenGrant {
            access_token: token_response.access_token().secret().clone(),
            refresh_token: token_response
                .refresh_token()
                .map(|token| token.secret().clone()),
            expires_in: token_response.expires_in().map(|d| d.as_secs()),
        })
    }
}
