mod transform;
mod types;

pub use transform::{transform_listing, transform_listings, variations_for};
pub use types::{
    Inventory, ListingImage, ListingRecord, ListingsPage, Money, Offering, Product,
    PropertyValue, UpstreamListing, UpstreamListings, VariationRecord,
};
