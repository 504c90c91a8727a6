use chrono::{DateTime, Duration, Utc};
use rand::{distr::Alphanumeric, Rng};

use super::{AuthError, SessionId, SessionRecord, TokenStatus};

/// Token lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Generate a cryptographically random session ID.
pub fn generate_session_id() -> SessionId {
    let id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    SessionId::new(id)
}

/// Absolute expiry of a token granted at `now`.
pub fn calculate_expiry(now: DateTime<Utc>, expires_in: Option<u64>) -> DateTime<Utc> {
    let secs = expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    now.checked_add_signed(Duration::seconds(secs))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A token is expired once `now` reaches its expiry.
pub fn is_token_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at <= now
}

/// Classifies the access token held by a session.
///
/// A token without a recorded expiry is treated as expired.
pub fn token_status(record: Option<&SessionRecord>, now: DateTime<Utc>) -> TokenStatus {
    let Some(record) = record else {
        return TokenStatus::Missing;
    };
    if record.access_token.is_none() {
        return TokenStatus::Missing;
    }
    match record.expires_at {
        Some(expires_at) if !is_token_expired(expires_at, now) => TokenStatus::Valid,
        _ => TokenStatus::Expired,
    }
}

/// Checks the `state` echoed by the upstream against the one stored in the session.
///
/// Fails when either side is missing or the two differ.
pub fn validate_callback_state(
    record: Option<&SessionRecord>,
    received: Option<&str>,
) -> Result<(), AuthError> {
    let stored = record
        .and_then(|r| r.state.as_deref())
        .ok_or(AuthError::InvalidState)?;
    let received = received.ok_or(AuthError::InvalidState)?;

    if received.is_empty() || stored != received {
        return Err(AuthError::InvalidState);
    }
    Ok(())
}
