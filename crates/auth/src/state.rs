//! Application state for auth.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use shopkeep_core::auth::{OAuthProviderClient, SessionRepository};
use shopkeep_core::events::EventSink;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::events::TracingSink;
use crate::providers::EtsyProvider;
use crate::sessions::SessionStore;

/// Shared state for auth handlers.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub provider: Arc<dyn OAuthProviderClient>,
    pub events: Arc<dyn EventSink>,
    pub config: AuthConfig,
    cookie_key: Key,
}

impl AuthState {
    /// Creates the production state: Etsy provider, in-memory sessions, tracing sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's HTTP client cannot be built.
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let provider = EtsyProvider::new(&config)?;
        let sessions = SessionStore::new(config.session_ttl);

        Ok(Self::from_parts(
            Arc::new(sessions),
            Arc::new(provider),
            Arc::new(TracingSink),
            config,
        ))
    }

    /// Creates the state from explicit collaborators.
    pub fn from_parts(
        sessions: Arc<dyn SessionRepository>,
        provider: Arc<dyn OAuthProviderClient>,
        events: Arc<dyn EventSink>,
        config: AuthConfig,
    ) -> Self {
        let cookie_key = match &config.session_secret {
            Some(secret) => derive_cookie_key(secret),
            None => Key::generate(),
        };

        Self {
            sessions,
            provider,
            events,
            config,
            cookie_key,
        }
    }

    /// Key signing the session cookie.
    pub fn cookie_key(&self) -> &Key {
        &self.cookie_key
    }
}

/// Derives the 64-byte cookie signing key from a secret of any length.
fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
