//! Listing handlers.
//!
//! `GET /api/listings` resolves the user's shop and reshapes its active
//! listings. `GET /api/listings/{id}` relays a single listing untouched.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use shopkeep_auth::CurrentToken;
use shopkeep_core::events::RelayEvent;
use shopkeep_core::listings::{transform_listings, ListingsPage};
use shopkeep_core::shop::{resolve_shop_id, ShopLookup};

use crate::{handlers::AppError, state::AppState};

const LISTINGS_FAILED: &str = "Failed to fetch listings";
const LISTING_FAILED: &str = "Failed to fetch listing";

/// List the shop's active listings (GET /api/listings).
pub async fn list_listings(
    State(state): State<AppState>,
    token: CurrentToken,
) -> Result<Json<ListingsPage>, AppError> {
    let access_token = token.access_token.as_str();
    let events = &*state.events;

    let profile = state
        .etsy
        .get_me(access_token)
        .await
        .map_err(|e| AppError::upstream(events, LISTINGS_FAILED, e))?;

    // The shops endpoint is only consulted when the profile has no inline shop.
    let lookup = match profile.shop_id {
        Some(_) => None,
        None => {
            let raw = state
                .etsy
                .get_user_shops(access_token, profile.user_id)
                .await
                .map_err(|e| AppError::upstream(events, LISTINGS_FAILED, e))?;
            ShopLookup::decode(&raw)
        }
    };

    let Some(shop_id) = resolve_shop_id(&profile, lookup.as_ref()) else {
        events.record(&RelayEvent::NoShop {
            user_id: profile.user_id,
        });
        return Err(AppError::NoShop);
    };

    let listings = state
        .etsy
        .get_active_listings(access_token, shop_id)
        .await
        .map_err(|e| AppError::upstream(events, LISTINGS_FAILED, e))?;

    let page = transform_listings(listings);
    events.record(&RelayEvent::ListingsTransformed {
        shop_id,
        count: page.count,
    });

    Ok(Json(page))
}

/// Get a single listing, unmodified (GET /api/listings/{id}).
pub async fn get_listing(
    State(state): State<AppState>,
    token: CurrentToken,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::InvalidListingId(rejection.body_text()))?;

    let listing = state
        .etsy
        .get_listing(&token.access_token, id)
        .await
        .map_err(|e| AppError::upstream(&*state.events, LISTING_FAILED, e))?;

    Ok(Json(listing))
}
