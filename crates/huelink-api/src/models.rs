// Bridge API wire types
//
// Models for the Hue bridge's local JSON API. Fields use `#[serde(default)]`
// liberally because bridges vary in field presence across firmware versions.
// Application-level failures arrive as HTTP 200 with an array of
// `{"error": {...}}` entries; `StatusEntry` models that envelope.

use serde::{Deserialize, Serialize};

// ── Light descriptor ─────────────────────────────────────────────────

/// Full light object from `GET /api/{token}/lights`, keyed by light id.
///
/// The bridge can return a dozen-plus fields per light. We model the
/// commonly needed ones explicitly; everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightInfo {
    pub name: String,
    #[serde(default)]
    pub modelid: Option<String>,
    #[serde(default, rename = "type")]
    pub light_type: Option<String>,
    #[serde(default)]
    pub swversion: Option<String>,
    #[serde(default)]
    pub uniqueid: Option<String>,
    #[serde(default)]
    pub manufacturername: Option<String>,
    #[serde(default)]
    pub state: Option<LightStateInfo>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Current state nested inside [`LightInfo`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightStateInfo {
    #[serde(default)]
    pub on: bool,
    /// Brightness in bridge units, 0-255.
    #[serde(default)]
    pub bri: u8,
    /// Hue, 0-65535.
    #[serde(default)]
    pub hue: Option<u16>,
    /// Saturation in bridge units, 0-255.
    #[serde(default)]
    pub sat: Option<u8>,
    #[serde(default)]
    pub alert: Option<String>,
    #[serde(default)]
    pub reachable: Option<bool>,
}

// ── State update ─────────────────────────────────────────────────────

/// Body for `PUT /api/{token}/lights/{id}/state`.
///
/// Every field is optional; only the fields present in the JSON are
/// applied by the bridge. `bri` and `sat` are bridge units (0-255),
/// not percentages -- conversion happens upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightStateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,
    /// `"select"` triggers a single identify blink.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

impl LightStateUpdate {
    /// `true` if no field is set (nothing to transmit).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Response envelope ────────────────────────────────────────────────

/// One entry of the success/error array the bridge returns for writes
/// (and for reads that fail at the application level):
/// ```json
/// [{"success": {"/lights/1/state/bri": 128}}]
/// [{"error": {"type": 1, "address": "/", "description": "unauthorized user"}}]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StatusEntry {
    #[serde(default)]
    pub success: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<BridgeErrorBody>,
}

/// Structured error body from the bridge. `type` 1 is "unauthorized user".
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeErrorBody {
    #[serde(rename = "type")]
    pub code: i32,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}
