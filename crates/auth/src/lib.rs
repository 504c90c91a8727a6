//! Etsy OAuth 2.0 + PKCE authentication for shopkeep.
//!
//! This crate provides:
//! - The authorization and callback handlers (`auth_routes`)
//! - The Etsy OAuth client used for the code exchange
//! - In-memory session storage behind a signed session cookie
//! - The `CurrentToken` extractor guarding upstream-data routes

mod config;
mod cookies;
mod error;
mod events;
mod extractors;
mod handlers;
mod providers;
mod sessions;
mod state;

pub use config::AuthConfig;
pub use error::AuthError;
pub use events::TracingSink;
pub use extractors::CurrentToken;
pub use handlers::auth_routes;
pub use providers::{EtsyProvider, ETSY_SCOPES};
pub use sessions::SessionStore;
pub use state::AuthState;
