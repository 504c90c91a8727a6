//! Listing API operations.

use shopkeep_core::listings::UpstreamListings;

use super::EtsyClient;
use crate::error::Result;

/// Expansions requested with every listing read.
const LISTING_INCLUDES: &str = "Images,Inventory";

/// Maximum page size accepted by the listings endpoint.
pub const LISTINGS_LIMIT: u32 = 100;

impl EtsyClient {
    /// `GET /shops/{shop_id}/listings` - active listings with images and inventory.
    pub async fn get_active_listings(
        &self,
        access_token: &str,
        shop_id: u64,
    ) -> Result<UpstreamListings> {
        let limit = LISTINGS_LIMIT.to_string();
        let response = self
            .get(&format!("/shops/{shop_id}/listings"), access_token)
            .query(&[
                ("state", "active"),
                ("includes", LISTING_INCLUDES),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// `GET /listings/{listing_id}` - raw payload with images and inventory.
    pub async fn get_listing(
        &self,
        access_token: &str,
        listing_id: u64,
    ) -> Result<serde_json::Value> {
        let response = self
            .get(&format!("/listings/{listing_id}"), access_token)
            .query(&[("includes", LISTING_INCLUDES)])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
