//! Client error types.

use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, EtsyError>;

/// Errors that can occur while calling the Etsy API.
#[derive(Error, Debug)]
pub enum EtsyError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Etsy returned {status}")]
    Upstream {
        status: u16,
        /// Error body reported by Etsy, if it sent one.
        body: Option<serde_json::Value>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl EtsyError {
    /// Upstream HTTP status, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidResponse(_) => None,
        }
    }

    /// Upstream error detail suitable for relaying to the browser.
    pub fn detail(&self) -> Option<serde_json::Value> {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            Self::Request(_) | Self::InvalidResponse(_) => None,
        }
    }
}
