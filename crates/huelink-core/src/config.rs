// ── Runtime connection configuration ──
//
// Describes *how* to reach a Hue bridge. Carries the credential and
// connection tuning, but never touches disk -- the host constructs a
// `BridgeConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for connecting to a single bridge.
///
/// Built by the host, passed to [`HueBridgeAdapter`](crate::HueBridgeAdapter).
/// Neither field is validated at construction: a bad address or token
/// surfaces as a connection/authorization failure on the first
/// enumeration attempt.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Bridge URL (e.g. `http://192.168.1.5`).
    pub url: Url,
    /// Pre-issued access token (the bridge "username").
    pub access_token: SecretString,
    /// Request timeout, bounding hung calls to an unreachable bridge.
    pub timeout: Duration,
}

impl BridgeConfig {
    /// Config with the default 30 s timeout.
    pub fn new(url: Url, access_token: SecretString) -> Self {
        Self {
            url,
            access_token,
            timeout: Duration::from_secs(30),
        }
    }
}
