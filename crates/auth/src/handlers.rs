//! HTTP handlers for auth routes.

use axum::{
    extract::{FromRef, Query, State},
    http::{header::LOCATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::SignedCookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shopkeep_core::auth::{
    calculate_expiry, generate_challenge, generate_session_id, generate_state, generate_verifier,
    token_status, validate_callback_state, AuthError as CoreError, SessionRecord, TokenStatus,
};
use shopkeep_core::events::RelayEvent;

use crate::cookies;
use crate::error::AuthError;
use crate::AuthState;

/// Query parameters of the OAuth callback.
#[derive(Deserialize, Default)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by Etsy instead of `code` when the user declines.
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub authenticated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Creates the auth router with all authentication routes.
///
/// Routes:
/// - `GET /api/auth/etsy` - Start the Etsy OAuth flow, returns `{ authUrl }`
/// - `GET /api/auth/etsy/callback` - Finish the flow and redirect to the app
/// - `GET /api/auth/status` - Report whether the session holds a live token
/// - `POST /api/auth/logout` - Destroy the current session
pub fn auth_routes<S>() -> Router<S>
where
    AuthState: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/auth/etsy", get(start_authorization))
        .route("/api/auth/etsy/callback", get(callback))
        .route("/api/auth/status", get(status))
        .route("/api/auth/logout", post(logout))
}

async fn start_authorization(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<(SignedCookieJar, Json<AuthUrlResponse>), AuthError> {
    let now = Utc::now();
    let jar = cookies::signed_jar(&state, &headers);

    let existing = match cookies::session_id(&state, &jar) {
        Some(id) => state
            .sessions
            .get_session(&id)
            .await?
            .map(|record| (id, record)),
        None => None,
    };

    let (session_id, mut record) = match existing {
        Some(found) => found,
        None => {
            let id = generate_session_id();
            state
                .events
                .record(&RelayEvent::SessionCreated { session_id: &id });
            (id, SessionRecord::new(now))
        }
    };

    let code_verifier = generate_verifier();
    let csrf_state = generate_state();
    let code_challenge = generate_challenge(&code_verifier);

    let auth_url = state
        .provider
        .authorization_url(&csrf_state, &code_challenge)
        .await?;

    record.begin_flow(code_verifier, csrf_state, now);
    state.sessions.put_session(&session_id, &record).await?;

    state.events.record(&RelayEvent::AuthorizationStarted {
        session_id: &session_id,
    });

    let jar = jar.add(cookies::session_cookie(&state, &session_id));
    Ok((
        jar,
        Json(AuthUrlResponse {
            auth_url: auth_url.to_string(),
        }),
    ))
}

async fn callback(
    State(state): State<AuthState>,
    headers: HeaderMap,
    Query(params): Query<CallbackQuery>,
) -> Result<Response, AuthError> {
    let jar = cookies::signed_jar(&state, &headers);

    let session = match cookies::session_id(&state, &jar) {
        Some(id) => state
            .sessions
            .get_session(&id)
            .await?
            .map(|record| (id, record)),
        None => None,
    };

    // CSRF check comes before anything touches the network.
    if let Err(err) = validate_callback_state(
        session.as_ref().map(|(_, record)| record),
        params.state.as_deref(),
    ) {
        state.events.record(&RelayEvent::StateMismatch);
        return Err(err.into());
    }
    let Some((session_id, mut record)) = session else {
        return Err(CoreError::InvalidState.into());
    };

    if let Some(error) = &params.error {
        state
            .events
            .record(&RelayEvent::AuthorizationDenied { error });
        let description = params.error_description.as_deref().unwrap_or(error);
        return Err(CoreError::AuthorizationDenied(description.to_string()).into());
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(CoreError::MissingCode)?;
    let code_verifier = record
        .code_verifier
        .clone()
        .ok_or(CoreError::PkceNotFound)?;

    let grant = match state.provider.exchange_code(&code, &code_verifier).await {
        Ok(grant) => grant,
        Err(err) => {
            state.events.record(&RelayEvent::TokenExchangeFailed {
                reason: &err.to_string(),
            });
            return Err(err.into());
        }
    };

    let now = Utc::now();
    let expires_at = calculate_expiry(now, grant.expires_in);
    record.complete_flow(grant, expires_at, now);
    state.sessions.put_session(&session_id, &record).await?;

    state.events.record(&RelayEvent::TokenExchanged {
        session_id: &session_id,
        expires_at,
    });

    Ok((
        StatusCode::FOUND,
        [(LOCATION, state.config.success_redirect.clone())],
    )
        .into_response())
}

async fn status(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, AuthError> {
    let jar = cookies::signed_jar(&state, &headers);

    let record = match cookies::session_id(&state, &jar) {
        Some(id) => state.sessions.get_session(&id).await?,
        None => None,
    };

    Ok(Json(StatusResponse {
        authenticated: token_status(record.as_ref(), Utc::now()) == TokenStatus::Valid,
    }))
}

async fn logout(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> (SignedCookieJar, Json<LogoutResponse>) {
    let jar = cookies::signed_jar(&state, &headers);

    if let Some(session_id) = cookies::session_id(&state, &jar) {
        match state.sessions.delete_session(&session_id).await {
            Ok(()) => state.events.record(&RelayEvent::LoggedOut {
                session_id: &session_id,
            }),
            Err(e) => tracing::warn!(error = %e, "Session deletion failed during logout"),
        }
    }

    let jar = jar.remove(cookies::clear_session_cookie(&state));
    (jar, Json(LogoutResponse { success: true }))
}
