use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cryptographically random session identifier carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side state of one browser session.
///
/// `code_verifier` and `state` only live between the start of the OAuth flow
/// and its callback. The token fields live until expiry or logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub code_verifier: Option<String>,
    pub state: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Last time the record was written. Drives idle expiry in the store.
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// An empty record, as created on first contact.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            code_verifier: None,
            state: None,
            access_token: None,
            refresh_token: None,
            expires_at: None,
            updated_at: now,
        }
    }

    /// Seeds the transient PKCE material for a new authorization flow.
    ///
    /// A flow started again before the callback replaces the previous pair.
    pub fn begin_flow(&mut self, code_verifier: String, state: String, now: DateTime<Utc>) {
        self.code_verifier = Some(code_verifier);
        self.state = Some(state);
        self.updated_at = now;
    }

    /// Stores the granted tokens and drops the single-use flow material.
    pub fn complete_flow(&mut self, grant: TokenGrant, expires_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.access_token = Some(grant.access_token);
        self.refresh_token = grant.refresh_token;
        self.expires_at = Some(expires_at);
        self.code_verifier = None;
        self.state = None;
        self.updated_at = now;
    }
}

/// Tokens returned by the upstream token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime in seconds as reported by the upstream, if any.
    pub expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[redacted]"))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Outcome of checking a session's access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Missing,
    Expired,
    Valid,
}
