use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Auth errors for the shopkeep_auth crate.
///
/// Wraps the core `AuthError` and maps it onto HTTP responses.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (state validation, guard, exchange, storage).
    #[error(transparent)]
    Core(#[from] shopkeep_core::auth::AuthError),
}

impl AuthError {
    fn status_and_body(&self) -> (StatusCode, &'static str, String) {
        use shopkeep_core::auth::AuthError as CoreError;

        match self {
            AuthError::Core(core_err) => match core_err {
                CoreError::InvalidState => (
                    StatusCode::BAD_REQUEST,
                    "invalid_state",
                    "Invalid state parameter".to_string(),
                ),
                CoreError::PkceNotFound | CoreError::MissingCode => {
                    (StatusCode::BAD_REQUEST, "invalid_request", self.to_string())
                }
                CoreError::AuthorizationDenied(_) => (
                    StatusCode::BAD_REQUEST,
                    "authorization_denied",
                    self.to_string(),
                ),
                CoreError::NotAuthenticated => (
                    StatusCode::UNAUTHORIZED,
                    "not_authenticated",
                    "Not authenticated".to_string(),
                ),
                CoreError::TokenExpired => (
                    StatusCode::UNAUTHORIZED,
                    "token_expired",
                    "Token expired".to_string(),
                ),
                CoreError::CodeExchange(_) => {
                    tracing::error!("Auth error: {}", self);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "token_exchange_failed",
                        "Authentication failed".to_string(),
                    )
                }
                CoreError::Storage(_) | CoreError::Provider(_) => {
                    tracing::error!("Auth error: {}", self);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_error",
                        "Internal server error".to_string(),
                    )
                }
            },
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.status_and_body();
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
