// ── Host-facing error types ──
//
// Errors from huelink-core are NOT API-specific -- the host never sees
// HTTP status codes or JSON parse failures directly. The
// `From<huelink_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the adapter crate.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Transport failure reaching the bridge. During enumeration this is
    /// fatal to the call; during a write it only surfaces through the
    /// write's [`WriteOutcome`](crate::WriteOutcome).
    #[error("Cannot connect to bridge at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The bridge rejected the access token.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The bridge reported an application-level error.
    #[error("Bridge error: {message}")]
    Bridge { message: String },

    /// Deserialization or task failure -- a bug or a very odd bridge.
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<huelink_api::Error> for AdapterError {
    fn from(err: huelink_api::Error) -> Self {
        match err {
            huelink_api::Error::Unauthorized => AdapterError::AuthenticationFailed {
                message: "access token rejected by bridge".into(),
            },
            huelink_api::Error::Transport(ref e) => AdapterError::ConnectionFailed {
                url: e
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: e.to_string(),
            },
            huelink_api::Error::InvalidUrl(e) => AdapterError::ConnectionFailed {
                url: String::new(),
                reason: format!("invalid URL: {e}"),
            },
            huelink_api::Error::Bridge {
                code,
                address,
                description,
            } => AdapterError::Bridge {
                message: format!("{description} (type {code} at {address})"),
            },
            huelink_api::Error::Deserialization { message, body: _ } => {
                AdapterError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
