//! Liveness probe.

use axum::http::StatusCode;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Does not touch Etsy or the session store.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
