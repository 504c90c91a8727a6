use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Upstream shapes (Etsy Open API v3, `includes=Images,Inventory`)
// ============================================================================

/// Integer money amount; the decimal value is `amount / divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Money {
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub divisor: i64,
}

impl Money {
    /// Decimal value, or `None` when the divisor is zero.
    pub fn to_decimal(self) -> Option<f64> {
        if self.divisor == 0 {
            return None;
        }
        Some(self.amount as f64 / self.divisor as f64)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingImage {
    #[serde(default)]
    pub url_fullxfull: Option<String>,
    #[serde(default, rename = "url_570xN")]
    pub url_570x_n: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Offering {
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub quantity: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub property_values: Option<Vec<PropertyValue>>,
    #[serde(default)]
    pub offerings: Option<Vec<Offering>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamListing {
    pub listing_id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<ListingImage>>,
    #[serde(default)]
    pub inventory: Option<Inventory>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// `GET /shops/{shop_id}/listings` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamListings {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Option<Vec<UpstreamListing>>,
}

// ============================================================================
// Output shapes
// ============================================================================

/// One purchasable variant of a listing.
///
/// `options` is flattened next to `price` and `quantity`, so a variant with a
/// colour serializes as `{ "color": "red", "price": 25.0, "quantity": 3 }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationRecord {
    #[serde(flatten)]
    pub options: BTreeMap<String, String>,
    pub price: f64,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: u64,
    pub title: Option<String>,
    pub price: f64,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub photos: Vec<String>,
    pub variations: Vec<VariationRecord>,
    /// No backup subsystem exists; always `null`.
    pub last_backup: Option<String>,
    pub etsy_url: Option<String>,
    pub state: Option<String>,
}

/// Response body of `GET /api/listings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingsPage {
    pub count: usize,
    pub results: Vec<ListingRecord>,
}

impl ListingsPage {
    pub fn empty() -> Self {
        Self {
            count: 0,
            results: Vec::new(),
        }
    }
}
