use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid OAuth state parameter")]
    InvalidState,

    #[error("PKCE verifier not found in session")]
    PkceNotFound,

    #[error("authorization code missing from callback")]
    MissingCode,

    #[error("authorization denied by upstream: {0}")]
    AuthorizationDenied(String),

    #[error("failed to exchange authorization code: {0}")]
    CodeExchange(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("token expired")]
    TokenExpired,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("provider error: {0}")]
    Provider(String),
}
