// ── Characteristic writes ──
//
// The five controllable characteristics as a closed enum, matched
// exhaustively -- no string-keyed dispatch past the `parse` boundary.
// A write is constructed per call and never stored.

use serde::Serialize;
use tokio::task::JoinHandle;

use huelink_api::models::LightStateUpdate;

use crate::convert::percent_to_bridge;
use crate::error::AdapterError;

/// The controllable characteristics, without values. Carried by
/// accessory descriptors so the host knows which write a field maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacteristicKind {
    Identify,
    Power,
    Hue,
    Brightness,
    Saturation,
}

impl CharacteristicKind {
    /// Case-insensitive lookup of a host-supplied kind string.
    ///
    /// `"on"` is accepted as an alias for power, matching how
    /// accessory-server hosts name the power-state field.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "identify" => Some(Self::Identify),
            "power" | "on" => Some(Self::Power),
            "hue" => Some(Self::Hue),
            "brightness" => Some(Self::Brightness),
            "saturation" => Some(Self::Saturation),
            _ => None,
        }
    }
}

/// A (kind, value) pair ready for transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicWrite {
    /// Trigger the bridge's attention blink. Value-free.
    Identify,
    Power(bool),
    /// Bridge-native units already, 0-65535. Passed through unchanged.
    Hue(u16),
    /// Percentage, 0-100. Converted before transmission.
    Brightness(u8),
    /// Percentage, 0-100. Converted before transmission.
    Saturation(u8),
}

impl CharacteristicWrite {
    /// Parse a host-supplied (kind string, JSON value) pair.
    ///
    /// The kind lookup is case-insensitive. Unknown kinds and recognized
    /// kinds with values of the wrong shape are both rejected here so the
    /// caller can decide how loudly to drop them.
    pub fn parse(kind: &str, value: &serde_json::Value) -> Result<Self, WriteParseError> {
        let Some(kind) = CharacteristicKind::parse(kind) else {
            return Err(WriteParseError::UnknownKind(kind.to_string()));
        };

        let invalid = || WriteParseError::InvalidValue {
            kind,
            value: value.clone(),
        };

        match kind {
            // The identify trigger's value is ignored: the host sends a
            // bool, but the blink is the point.
            CharacteristicKind::Identify => Ok(Self::Identify),
            CharacteristicKind::Power => value.as_bool().map(Self::Power).ok_or_else(invalid),
            CharacteristicKind::Hue => value
                .as_u64()
                .and_then(|v| u16::try_from(v).ok())
                .map(Self::Hue)
                .ok_or_else(invalid),
            CharacteristicKind::Brightness => parse_percent(value)
                .map(Self::Brightness)
                .ok_or_else(invalid),
            CharacteristicKind::Saturation => parse_percent(value)
                .map(Self::Saturation)
                .ok_or_else(invalid),
        }
    }

    /// The kind of this write.
    pub fn kind(&self) -> CharacteristicKind {
        match self {
            Self::Identify => CharacteristicKind::Identify,
            Self::Power(_) => CharacteristicKind::Power,
            Self::Hue(_) => CharacteristicKind::Hue,
            Self::Brightness(_) => CharacteristicKind::Brightness,
            Self::Saturation(_) => CharacteristicKind::Saturation,
        }
    }

    /// Build the bridge-native state body, converting percentages to
    /// bridge units. Exactly one field is set per write.
    pub(crate) fn to_state(self) -> LightStateUpdate {
        let mut state = LightStateUpdate::default();
        match self {
            Self::Identify => state.alert = Some("select".into()),
            Self::Power(on) => state.on = Some(on),
            Self::Hue(v) => state.hue = Some(v),
            Self::Brightness(pct) => state.bri = Some(percent_to_bridge(pct)),
            Self::Saturation(pct) => state.sat = Some(percent_to_bridge(pct)),
        }
        state
    }
}

/// A JSON value that is an integer percentage in 0-100.
fn parse_percent(value: &serde_json::Value) -> Option<u8> {
    value
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .filter(|&v| v <= 100)
}

/// Why a host-supplied write could not be turned into a
/// [`CharacteristicWrite`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum WriteParseError {
    #[error("unknown characteristic kind: {0:?}")]
    UnknownKind(String),

    #[error("invalid value for {kind:?}: {value}")]
    InvalidValue {
        kind: CharacteristicKind,
        value: serde_json::Value,
    },
}

// ── Write completion ─────────────────────────────────────────────────

/// Why a write produced no outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The target light has not been resolved by an enumeration.
    UnresolvedLight,
    /// The kind string matched none of the five characteristics.
    UnknownCharacteristic,
    /// The kind was recognized but the value had the wrong shape.
    InvalidValue,
}

/// Terminal state of a characteristic write.
///
/// `Failed` is only ever observable through the handle (and the log) --
/// the write call itself never raises.
#[derive(Debug)]
pub enum WriteOutcome {
    /// One request was sent and the bridge acknowledged it.
    Sent,
    /// No request was made.
    Skipped(SkipReason),
    /// The request was sent (or attempted) and did not succeed.
    Failed(AdapterError),
}

impl WriteOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Handle to an in-flight characteristic write.
///
/// Dropping the handle is fire-and-forget: the spawned request keeps
/// running and its completion is reported through a tracing event.
/// Awaiting [`outcome`](Self::outcome) surfaces the result instead.
#[derive(Debug)]
pub struct WriteHandle {
    inner: HandleInner,
}

#[derive(Debug)]
enum HandleInner {
    /// The write was resolved without spawning (skip paths).
    Immediate(WriteOutcome),
    Pending(JoinHandle<WriteOutcome>),
}

impl WriteHandle {
    pub(crate) fn immediate(outcome: WriteOutcome) -> Self {
        Self {
            inner: HandleInner::Immediate(outcome),
        }
    }

    pub(crate) fn pending(task: JoinHandle<WriteOutcome>) -> Self {
        Self {
            inner: HandleInner::Pending(task),
        }
    }

    /// Wait for the write to finish and return its outcome.
    pub async fn outcome(self) -> WriteOutcome {
        match self.inner {
            HandleInner::Immediate(outcome) => outcome,
            HandleInner::Pending(task) => task.await.unwrap_or_else(|e| {
                WriteOutcome::Failed(AdapterError::Internal(format!("write task failed: {e}")))
            }),
        }
    }
}
