//! Functional core for shopkeep.
//!
//! Everything in here is free of network and HTTP-framework I/O:
//! - `auth`: session records, PKCE material, and the repository/provider seams
//! - `shop`: decoding of profile and shop lookups into a shop id
//! - `listings`: upstream listing shapes and the reshape into `ListingRecord`
//! - `events`: typed diagnostic events and the sink they are reported to

pub mod auth;
pub mod events;
pub mod listings;
pub mod shop;
