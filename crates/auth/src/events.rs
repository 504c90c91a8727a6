//! `tracing`-backed event sink.

use shopkeep_core::events::{EventSink, RelayEvent};

/// Forwards relay events to `tracing` as structured events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &RelayEvent<'_>) {
        match event {
            RelayEvent::SessionCreated { session_id } => {
                tracing::debug!(session_id = %session_id, "Session created");
            }
            RelayEvent::AuthorizationStarted { session_id } => {
                tracing::info!(session_id = %session_id, "Etsy authorization started");
            }
            RelayEvent::StateMismatch => {
                tracing::warn!("OAuth state mismatch");
            }
            RelayEvent::AuthorizationDenied { error } => {
                tracing::warn!(error = %error, "OAuth2 error from Etsy");
            }
            RelayEvent::TokenExchanged {
                session_id,
                expires_at,
            } => {
                tracing::info!(
                    session_id = %session_id,
                    expires_at = %expires_at,
                    "Etsy OAuth2 login successful"
                );
            }
            RelayEvent::TokenExchangeFailed { reason } => {
                tracing::error!(error = %reason, "Token exchange failed");
            }
            RelayEvent::LoggedOut { session_id } => {
                tracing::info!(session_id = %session_id, "Session destroyed");
            }
            RelayEvent::AccessDenied { reason } => {
                tracing::debug!(reason = %reason, "Request rejected by auth guard");
            }
            RelayEvent::UpstreamFailed {
                operation,
                status,
                message,
            } => {
                tracing::error!(
                    operation = %operation,
                    status = ?status,
                    error = %message,
                    "Etsy API call failed"
                );
            }
            RelayEvent::NoShop { user_id } => {
                tracing::warn!(user_id = user_id, "Etsy account has no shop");
            }
            RelayEvent::ListingsTransformed { shop_id, count } => {
                tracing::info!(shop_id = shop_id, count = count, "Listings fetched");
            }
        }
    }
}
