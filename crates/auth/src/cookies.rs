//! Session cookie helpers.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::SignedCookieJar;
use shopkeep_core::auth::SessionId;

use crate::state::AuthState;

/// Signed cookie jar for the request. Cookies failing verification are invisible.
pub(crate) fn signed_jar(state: &AuthState, headers: &HeaderMap) -> SignedCookieJar {
    SignedCookieJar::from_headers(headers, state.cookie_key().clone())
}

/// Session id carried by the request, if any.
pub(crate) fn session_id(state: &AuthState, jar: &SignedCookieJar) -> Option<SessionId> {
    jar.get(&state.config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .map(SessionId::new)
}

/// Session cookie pointing at `session_id`.
pub(crate) fn session_cookie(state: &AuthState, session_id: &SessionId) -> Cookie<'static> {
    let max_age = i64::try_from(state.config.session_ttl.as_secs()).unwrap_or(i64::MAX);

    Cookie::build((state.config.cookie_name.clone(), session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Removal cookie for the session cookie.
pub(crate) fn clear_session_cookie(state: &AuthState) -> Cookie<'static> {
    Cookie::build(state.config.cookie_name.clone())
        .path("/")
        .build()
}
