use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shopkeep_core::events::{EventSink, RelayEvent};
use shopkeep_etsy::EtsyError;
use thiserror::Error;

/// Failures of the upstream-data routes.
#[derive(Debug, Error)]
pub enum AppError {
    /// An Etsy call failed. `message` is the generic text shown to the browser.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: EtsyError,
    },

    #[error("No shop found for this Etsy account")]
    NoShop,

    /// A path parameter did not parse; the rejection text is relayed as detail.
    #[error("Invalid listing id")]
    InvalidListingId(String),
}

impl AppError {
    /// Wraps an Etsy failure and reports it to `events`.
    pub fn upstream(events: &dyn EventSink, message: &'static str, source: EtsyError) -> Self {
        events.record(&RelayEvent::UpstreamFailed {
            operation: message,
            status: source.status(),
            message: &source.to_string(),
        });
        Self::Upstream { message, source }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream { source, .. } => source
                .status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::NoShop => StatusCode::NOT_FOUND,
            Self::InvalidListingId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            Self::Upstream { source, .. } => source.detail(),
            Self::NoShop => None,
            Self::InvalidListingId(reason) => Some(serde_json::Value::String(reason.clone())),
        };

        (
            status,
            Json(json!({ "error": self.to_string(), "details": details })),
        )
            .into_response()
    }
}
