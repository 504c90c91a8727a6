//! Reshape of upstream listings into [`ListingRecord`]s.

use std::collections::BTreeMap;

use super::types::{
    ListingImage, ListingRecord, ListingsPage, Product, UpstreamListing, UpstreamListings,
    VariationRecord,
};

/// Keys owned by `VariationRecord` itself; properties with these names are dropped.
const RESERVED_KEYS: [&str; 2] = ["price", "quantity"];

/// Transforms a listings collection. An absent or empty `results` is an empty page.
pub fn transform_listings(listings: UpstreamListings) -> ListingsPage {
    let results: Vec<ListingRecord> = listings
        .results
        .unwrap_or_default()
        .into_iter()
        .map(transform_listing)
        .collect();

    if results.is_empty() {
        return ListingsPage::empty();
    }

    ListingsPage {
        count: results.len(),
        results,
    }
}

pub fn transform_listing(listing: UpstreamListing) -> ListingRecord {
    let price = listing
        .price
        .and_then(|money| money.to_decimal())
        .unwrap_or(0.0);
    let quantity = listing.quantity.unwrap_or(0);

    let products = listing
        .inventory
        .and_then(|inventory| inventory.products)
        .unwrap_or_default();

    ListingRecord {
        id: listing.listing_id,
        title: listing.title,
        price,
        description: listing.description,
        tags: listing.tags.unwrap_or_default(),
        photos: photo_urls(listing.images.as_deref().unwrap_or_default()),
        variations: variations_for(&products, price, quantity),
        last_backup: None,
        etsy_url: listing.url,
        state: listing.state,
    }
}

/// Builds the variations of a listing from its inventory products.
///
/// Never returns an empty list: without any product carrying a property, a
/// single `Default` variation with the listing's own price and quantity is
/// returned.
pub fn variations_for(
    products: &[Product],
    listing_price: f64,
    listing_quantity: u64,
) -> Vec<VariationRecord> {
    let variations: Vec<VariationRecord> = products
        .iter()
        .filter_map(|product| variation_for(product, listing_price))
        .collect();

    if !variations.is_empty() {
        return variations;
    }

    vec![VariationRecord {
        options: BTreeMap::from([("option".to_string(), "Default".to_string())]),
        price: listing_price,
        quantity: listing_quantity,
    }]
}

fn variation_for(product: &Product, listing_price: f64) -> Option<VariationRecord> {
    let mut options = BTreeMap::new();
    for property in product.property_values.iter().flatten() {
        let Some(name) = property.property_name.as_deref() else {
            continue;
        };
        let Some(value) = property.values.as_ref().and_then(|v| v.first()) else {
            continue;
        };
        let key = name.trim().to_lowercase();
        if key.is_empty() || RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        options
            .entry(key)
            .or_insert_with(|| value.to_lowercase());
    }

    if options.is_empty() {
        return None;
    }

    let offering = product.offerings.as_ref().and_then(|o| o.first());
    let price = offering
        .and_then(|o| o.price)
        .and_then(|money| money.to_decimal())
        .filter(|price| *price != 0.0)
        .unwrap_or(listing_price);
    let quantity = offering.and_then(|o| o.quantity).unwrap_or(0);

    Some(VariationRecord {
        options,
        price,
        quantity,
    })
}

fn photo_urls(images: &[ListingImage]) -> Vec<String> {
    images
        .iter()
        .filter_map(|image| {
            image
                .url_fullxfull
                .clone()
                .or_else(|| image.url_570x_n.clone())
        })
        .collect()
}
