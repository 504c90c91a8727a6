//! shopkeep_etsy - HTTP client for the Etsy Open API v3.

pub mod client;
pub mod error;

pub use client::{EtsyClient, DEFAULT_API_BASE_URL};
pub use error::{EtsyError, Result};
