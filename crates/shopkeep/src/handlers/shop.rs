use axum::{extract::State, Json};
use shopkeep_auth::CurrentToken;

use crate::{handlers::AppError, state::AppState};

const SHOP_FAILED: &str = "Failed to fetch shop data";

/// Get the connected user's shops, unmodified (GET /api/shop).
pub async fn get_shop(
    State(state): State<AppState>,
    token: CurrentToken,
) -> Result<Json<serde_json::Value>, AppError> {
    let profile = state
        .etsy
        .get_me(&token.access_token)
        .await
        .map_err(|e| AppError::upstream(&*state.events, SHOP_FAILED, e))?;

    let shops = state
        .etsy
        .get_user_shops(&token.access_token, profile.user_id)
        .await
        .map_err(|e| AppError::upstream(&*state.events, SHOP_FAILED, e))?;

    Ok(Json(shops))
}
