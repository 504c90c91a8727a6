//! Resolution of the connected user's shop id.
//!
//! The upstream reports the shop inline on the profile for most accounts. When
//! it does not, the user's shop collection is consulted. That endpoint has been
//! observed to answer in three shapes, which [`ShopLookup`] enumerates in the
//! order they are tried.

use serde::Deserialize;

/// The `GET /users/me` payload, reduced to what the relay needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub user_id: u64,
    #[serde(default)]
    pub shop_id: Option<u64>,
}

/// A shop entry; only its id matters here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShopRef {
    #[serde(default)]
    pub shop_id: Option<u64>,
}

/// Shapes of the `GET /users/{user_id}/shops` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ShopLookup {
    /// `{ "count": n, "results": [ ... ] }`
    Collection { results: Vec<ShopRef> },
    /// `[ ... ]`
    List(Vec<ShopRef>),
    /// A single shop object.
    Single(ShopRef),
}

impl ShopLookup {
    /// Decodes a raw shop lookup. Payloads matching no shape (scalars, null) yield `None`.
    pub fn decode(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// The first shop id present in the lookup.
    pub fn first_shop_id(&self) -> Option<u64> {
        match self {
            Self::Collection { results } | Self::List(results) => {
                results.iter().find_map(|shop| shop.shop_id)
            }
            Self::Single(shop) => shop.shop_id,
        }
    }
}

/// Picks the shop id, preferring the profile's inline `shop_id`.
pub fn resolve_shop_id(profile: &UserProfile, lookup: Option<&ShopLookup>) -> Option<u64> {
    profile
        .shop_id
        .or_else(|| lookup.and_then(ShopLookup::first_shop_id))
}
