//! Shared application state.

use std::sync::Arc;

use shopkeep_auth::{AuthConfig, AuthState};
use shopkeep_core::events::EventSink;
use shopkeep_etsy::EtsyClient;

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each request handler. Auth handlers see only the embedded
/// [`AuthState`] through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub etsy: EtsyClient,
    /// Same sink the auth layer reports to.
    pub events: Arc<dyn EventSink>,
    pub config: Config,
}

impl AppState {
    pub fn new(auth: AuthState, etsy: EtsyClient, config: Config) -> Self {
        let events = auth.events.clone();
        Self {
            auth,
            etsy,
            events,
            config,
        }
    }

    /// Creates the production state from configuration.
    pub fn from_config(config: Config, auth_config: AuthConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let etsy = EtsyClient::with_client(http, &config.api_base_url, &auth_config.client_id);
        let auth = AuthState::new(auth_config)?;

        Ok(Self::new(auth, etsy, config))
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}
