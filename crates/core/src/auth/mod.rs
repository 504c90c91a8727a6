mod error;
mod functions;
mod pkce;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::{
    calculate_expiry, generate_session_id, is_token_expired, token_status, validate_callback_state,
    DEFAULT_TOKEN_LIFETIME_SECS,
};
pub use pkce::{generate_challenge, generate_state, generate_verifier};
pub use traits::{OAuthProviderClient, Result, SessionRepository};
pub use types::{SessionId, SessionRecord, TokenGrant, TokenStatus};
