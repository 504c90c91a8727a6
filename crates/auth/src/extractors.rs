//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chrono::Utc;
use shopkeep_core::auth::{token_status, AuthError as CoreError, SessionId, TokenStatus};
use shopkeep_core::events::RelayEvent;

use crate::cookies;
use crate::error::AuthError;
use crate::AuthState;

/// Auth guard for upstream-data routes.
///
/// Resolves the session from the signed cookie and yields its access token.
/// Rejects with 401 `not_authenticated` when there is no token and with 401
/// `token_expired` once the token's expiry has passed. No refresh is attempted.
#[derive(Debug, Clone)]
pub struct CurrentToken {
    pub session_id: SessionId,
    pub access_token: String,
}

impl<S> FromRequestParts<S> for CurrentToken
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let jar = cookies::signed_jar(&auth_state, &parts.headers);

        let Some(session_id) = cookies::session_id(&auth_state, &jar) else {
            return Err(reject(&auth_state, CoreError::NotAuthenticated));
        };

        let record = auth_state.sessions.get_session(&session_id).await?;

        match token_status(record.as_ref(), Utc::now()) {
            TokenStatus::Missing => Err(reject(&auth_state, CoreError::NotAuthenticated)),
            TokenStatus::Expired => Err(reject(&auth_state, CoreError::TokenExpired)),
            TokenStatus::Valid => {
                let access_token = record
                    .and_then(|r| r.access_token)
                    .ok_or_else(|| reject(&auth_state, CoreError::NotAuthenticated))?;
                Ok(CurrentToken {
                    session_id,
                    access_token,
                })
            }
        }
    }
}

fn reject(state: &AuthState, err: CoreError) -> AuthError {
    let reason = match err {
        CoreError::TokenExpired => "token_expired",
        _ => "not_authenticated",
    };
    state.events.record(&RelayEvent::AccessDenied { reason });
    err.into()
}
