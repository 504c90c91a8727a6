//! Diagnostic events emitted by the relay at defined points.
//!
//! Handlers report what happened through an [`EventSink`] instead of logging
//! inline. Events never carry tokens, verifiers, or authorization codes.

use chrono::{DateTime, Utc};

use crate::auth::SessionId;

#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent<'a> {
    /// A session was created for a browser that had none.
    SessionCreated { session_id: &'a SessionId },
    /// PKCE material was stored and an authorization URL handed out.
    AuthorizationStarted { session_id: &'a SessionId },
    /// The callback `state` did not match the session.
    StateMismatch,
    /// The upstream redirected back with an error instead of a code.
    AuthorizationDenied { error: &'a str },
    /// Tokens were stored in the session.
    TokenExchanged {
        session_id: &'a SessionId,
        expires_at: DateTime<Utc>,
    },
    /// The token endpoint call failed; the session was left untouched.
    TokenExchangeFailed { reason: &'a str },
    /// A session was destroyed on logout.
    LoggedOut { session_id: &'a SessionId },
    /// The auth guard rejected a request.
    AccessDenied { reason: &'a str },
    /// An upstream data call failed.
    UpstreamFailed {
        operation: &'a str,
        status: Option<u16>,
        message: &'a str,
    },
    /// The connected account has no shop.
    NoShop { user_id: u64 },
    /// A listings page was fetched and reshaped.
    ListingsTransformed { shop_id: u64, count: usize },
}

/// Receiver of [`RelayEvent`]s.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &RelayEvent<'_>);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: &RelayEvent<'_>) {}
}
