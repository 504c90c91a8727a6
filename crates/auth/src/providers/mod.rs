//! OAuth provider implementations.

mod etsy;

pub use etsy::{EtsyProvider, ETSY_SCOPES};
