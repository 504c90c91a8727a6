use std::time::Duration;

/// Default Etsy authorization endpoint.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://www.etsy.com/oauth/connect";
/// Default Etsy token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.etsy.com/v3/public/oauth/token";

/// Complete auth configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// Public client identifier (the app keystring).
    pub client_id: String,
    /// Shared secret issued with the keystring.
    pub shared_secret: Option<String>,
    /// Present `shared_secret` in the token request body.
    pub send_client_secret: bool,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
    /// Key material for signing the session cookie. Random per process when unset.
    pub session_secret: Option<String>,
    pub session_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// Where the browser lands after a successful callback.
    pub success_redirect: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("shared_secret", &self.shared_secret.as_ref().map(|_| "[redacted]"))
            .field("send_client_secret", &self.send_client_secret)
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("session_secret", &self.session_secret.as_ref().map(|_| "[redacted]"))
            .field("session_ttl", &self.session_ttl)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("success_redirect", &self.success_redirect)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            shared_secret: None,
            send_client_secret: false,
            redirect_uri: "http://localhost:3001/api/auth/etsy/callback".to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            session_secret: None,
            session_ttl: Duration::from_secs(24 * 60 * 60),
            cookie_name: "shopkeep.sid".to_string(),
            cookie_secure: false,
            success_redirect: "http://localhost:3000".to_string(),
        }
    }
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ETSY_API_KEY`: Etsy app keystring, used as the OAuth client id
    /// - `ETSY_SHARED_SECRET`: Etsy shared secret (optional)
    /// - `ETSY_SEND_CLIENT_SECRET`: send the shared secret at token exchange (default: false)
    /// - `ETSY_REDIRECT_URI`: OAuth redirect URI (default: `http://localhost:3001/api/auth/etsy/callback`)
    /// - `ETSY_AUTH_URL`: authorization endpoint (default: Etsy's)
    /// - `ETSY_TOKEN_URL`: token endpoint (default: Etsy's)
    /// - `SESSION_SECRET`: cookie signing secret (default: random per process)
    /// - `SESSION_TTL_HOURS`: session lifetime in hours (default: 24)
    /// - `COOKIE_SECURE`: whether to set secure flag on cookies (default: false)
    /// - `AUTH_SUCCESS_REDIRECT`: landing page after login (default: `CLIENT_URL`)
    ///
    /// Missing credentials are not an error here; they surface when the flow is used.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let success_redirect = std::env::var("AUTH_SUCCESS_REDIRECT")
            .or_else(|_| std::env::var("CLIENT_URL"))
            .unwrap_or(defaults.success_redirect);

        let session_ttl = std::env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|hours| *hours > 0)
            .map(|hours| Duration::from_secs(hours * 60 * 60))
            .unwrap_or(defaults.session_ttl);

        Self {
            client_id: std::env::var("ETSY_API_KEY").unwrap_or_default(),
            shared_secret: non_empty_var("ETSY_SHARED_SECRET"),
            send_client_secret: flag_var("ETSY_SEND_CLIENT_SECRET").unwrap_or(false),
            redirect_uri: std::env::var("ETSY_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            authorize_url: std::env::var("ETSY_AUTH_URL").unwrap_or(defaults.authorize_url),
            token_url: std::env::var("ETSY_TOKEN_URL").unwrap_or(defaults.token_url),
            session_secret: non_empty_var("SESSION_SECRET"),
            session_ttl,
            cookie_name: defaults.cookie_name,
            cookie_secure: flag_var("COOKIE_SECURE").unwrap_or(defaults.cookie_secure),
            success_redirect,
        }
    }

    /// Names of settings the OAuth flow cannot work without that are unset.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.is_empty() {
            missing.push("ETSY_API_KEY");
        }
        if self.redirect_uri.is_empty() {
            missing.push("ETSY_REDIRECT_URI");
        }
        if self.session_secret.is_none() {
            missing.push("SESSION_SECRET");
        }
        missing
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn flag_var(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| v == "true" || v == "1")
}
