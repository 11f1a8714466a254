// Bridge HTTP client
//
// Wraps `reqwest::Client` with Hue-specific URL construction and
// success/error envelope unwrapping. The bridge reports application-level
// failures as HTTP 200 bodies containing `{"error": {...}}` entries, so
// every response goes through the envelope check before the caller sees it.

use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{BridgeErrorBody, LightInfo, LightStateUpdate, StatusEntry};
use crate::transport::TransportConfig;

/// Bridge error type 1: the access token is not a whitelisted user.
const ERROR_UNAUTHORIZED: i32 = 1;

/// Raw HTTP client for the Hue bridge's local REST API.
///
/// All calls are scoped under `/api/{token}/`. The token is a pre-issued
/// credential; neither it nor the base URL is validated at construction --
/// a bad value surfaces as a transport or authorization failure on the
/// first call.
pub struct HueClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl HueClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the bridge root (e.g. `http://192.168.1.5`).
    /// No network I/O happens here.
    pub fn new(
        base_url: Url,
        token: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, token: SecretString) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// The bridge base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List all lights known to the bridge.
    ///
    /// `GET /api/{token}/lights`
    ///
    /// The response maps light id to descriptor. Iteration order of the
    /// returned map is the bridge's reported order.
    pub async fn list_lights(&self) -> Result<IndexMap<String, LightInfo>, Error> {
        let url = self.api_url("lights")?;
        debug!("listing lights");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        self.parse_body(resp).await
    }

    /// Apply a state update to a single light.
    ///
    /// `PUT /api/{token}/lights/{id}/state`
    ///
    /// The bridge answers with one success/error entry per field; any
    /// error entry fails the whole call.
    pub async fn set_light_state(&self, id: &str, state: &LightStateUpdate) -> Result<(), Error> {
        let url = self.api_url(&format!("lights/{id}/state"))?;
        debug!(light = id, "setting light state");

        let resp = self
            .http
            .put(url)
            .json(state)
            .send()
            .await
            .map_err(Error::Transport)?;

        let entries: Vec<StatusEntry> = self.parse_body(resp).await?;
        check_entries(entries)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for a token-scoped API path:
    /// `{base}/api/{token}/{path}`
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let mut base = self.base_url.clone();
        // `join` drops a final segment that lacks a trailing slash, so a
        // base like `http://host/bridge` must become `.../bridge/` first.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let url = base.join(&format!("api/{}/{}", self.token.expose_secret(), path))?;
        Ok(url)
    }

    // ── Envelope handling ────────────────────────────────────────────

    /// Read the response body and deserialize it, first checking whether
    /// the bridge answered with an error envelope instead of the payload.
    async fn parse_body<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let resp = resp.error_for_status().map_err(Error::Transport)?;
        let body = resp.text().await.map_err(Error::Transport)?;

        // Error envelopes come back with HTTP 200, so sniff for them before
        // parsing the expected payload shape.
        if let Ok(entries) = serde_json::from_str::<Vec<StatusEntry>>(&body) {
            if let Some(err) = entries.into_iter().find_map(|e| e.error) {
                return Err(bridge_error(err));
            }
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Fail on the first error entry; success entries are discarded.
fn check_entries(entries: Vec<StatusEntry>) -> Result<(), Error> {
    match entries.into_iter().find_map(|e| e.error) {
        Some(err) => Err(bridge_error(err)),
        None => Ok(()),
    }
}

fn bridge_error(err: BridgeErrorBody) -> Error {
    if err.code == ERROR_UNAUTHORIZED {
        Error::Unauthorized
    } else {
        Error::Bridge {
            code: err.code,
            address: err.address,
            description: err.description,
        }
    }
}
