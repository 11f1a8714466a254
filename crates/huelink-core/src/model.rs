// ── Light domain types ──
//
// Canonical representations of bridge lights, normalized from the wire
// types in `huelink_api::models`. A snapshot is taken per enumeration
// and never mutated; the bridge itself is the source of truth between
// enumerations.

use serde::{Deserialize, Serialize};

use huelink_api::models::LightInfo;

/// One light as reported by the bridge during enumeration.
///
/// Plain data: id, display name, and model string, copied verbatim from
/// the bridge. Not persisted -- discarded and re-fetched on each
/// enumeration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightRecord {
    /// Bridge-assigned identifier (the key in the enumeration response).
    pub id: String,
    pub name: String,
    pub model: Option<String>,
}

impl LightRecord {
    pub(crate) fn from_wire(id: String, info: LightInfo) -> Self {
        Self {
            id,
            name: info.name,
            model: info.modelid,
        }
    }
}

/// Immutable collection of lights from a single enumeration call,
/// in the bridge's reported order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightSnapshot {
    lights: Vec<LightRecord>,
}

impl LightSnapshot {
    pub(crate) fn new(lights: Vec<LightRecord>) -> Self {
        Self { lights }
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightRecord> {
        self.lights.iter()
    }

    /// Look up a light by bridge id.
    pub fn get(&self, id: &str) -> Option<&LightRecord> {
        self.lights.iter().find(|l| l.id == id)
    }

    /// A [`LightRef`] for the given id: `Resolved` if the snapshot knows
    /// the light, `Unresolved` otherwise.
    pub fn resolve(&self, id: &str) -> LightRef {
        match self.get(id) {
            Some(record) => LightRef::Resolved(record.clone()),
            None => LightRef::Unresolved { name: id.into() },
        }
    }
}

impl IntoIterator for LightSnapshot {
    type Item = LightRecord;
    type IntoIter = std::vec::IntoIter<LightRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.lights.into_iter()
    }
}

/// Write target for the adapter.
///
/// The host wires each accessory against a `LightRef`. Before enumeration
/// completes (or after a light disappears from the bridge) the reference
/// is `Unresolved`; writes against it are logged no-ops, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightRef {
    Resolved(LightRecord),
    Unresolved {
        /// Whatever name the host knows the accessory by, for log context.
        name: String,
    },
}

impl LightRef {
    /// Display name for log lines, whichever variant.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Resolved(record) => &record.name,
            Self::Unresolved { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> LightRecord {
        LightRecord {
            id: id.into(),
            name: name.into(),
            model: None,
        }
    }

    #[test]
    fn snapshot_resolve() {
        let snapshot = LightSnapshot::new(vec![record("1", "Lamp"), record("2", "Strip")]);

        assert_eq!(
            snapshot.resolve("2"),
            LightRef::Resolved(record("2", "Strip"))
        );
        assert_eq!(
            snapshot.resolve("7"),
            LightRef::Unresolved { name: "7".into() }
        );
    }

    #[test]
    fn snapshot_preserves_order() {
        let snapshot = LightSnapshot::new(vec![record("2", "Strip"), record("1", "Lamp")]);
        let names: Vec<&str> = snapshot.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Strip", "Lamp"]);
    }
}
