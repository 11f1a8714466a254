use thiserror::Error;

/// Top-level error type for the `huelink-api` crate.
///
/// Covers every failure mode of the bridge's local REST API:
/// transport, authorization, bridge-reported errors, and response parsing.
/// `huelink-core` maps these into host-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Bridge API ──────────────────────────────────────────────────
    /// The bridge rejected the access token (error type 1, "unauthorized user").
    #[error("Unauthorized: access token rejected by bridge")]
    Unauthorized,

    /// Structured error from the bridge (parsed from the `{"error": {...}}`
    /// entries the bridge returns with HTTP 200).
    #[error("Bridge error {code} at {address}: {description}")]
    Bridge {
        code: i32,
        address: String,
        description: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the configured token is unusable
    /// and re-pairing with the bridge is required.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns `true` if this is a transient transport error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
