// ── Accessory descriptors ──
//
// Static metadata the accessory-server host uses to register each light
// and validate incoming values. The field set, bounds, and step sizes
// are a contract: hosts build UI and validation from them, so they must
// not drift.

use serde::Serialize;

use crate::model::LightRecord;
use crate::write::CharacteristicKind;

/// Manufacturer reported for every bridged light.
pub const MANUFACTURER: &str = "Philips";

/// Wire format of a characteristic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Bool,
    Int,
    String,
}

/// Display unit for numeric characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Percent,
    ArcDegrees,
}

/// Access permissions from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Perms {
    pub read: bool,
    pub write: bool,
    pub events: bool,
}

impl Perms {
    pub const READ_ONLY: Self = Self {
        read: true,
        write: false,
        events: false,
    };
    pub const WRITE_ONLY: Self = Self {
        read: false,
        write: true,
        events: false,
    };
    pub const READ_WRITE_EVENTS: Self = Self {
        read: true,
        write: true,
        events: true,
    };
}

/// Inclusive bounds and step size for an integer characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

/// Which field of the accessory this characteristic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharacteristicField {
    Name,
    Manufacturer,
    Model,
    Identify,
    Power,
    Hue,
    Brightness,
    Saturation,
}

/// One characteristic within a service.
///
/// `writes` names the [`CharacteristicKind`] an external write to this
/// field maps to; read-only fields carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacteristicDescriptor {
    pub field: CharacteristicField,
    pub format: Format,
    pub perms: Perms,
    pub initial: Option<String>,
    pub range: Option<ValueRange>,
    pub unit: Option<Unit>,
    pub writes: Option<CharacteristicKind>,
}

impl CharacteristicDescriptor {
    fn read_only_string(field: CharacteristicField, initial: &str) -> Self {
        Self {
            field,
            format: Format::String,
            perms: Perms::READ_ONLY,
            initial: Some(initial.to_string()),
            range: None,
            unit: None,
            writes: None,
        }
    }
}

/// Service grouping within an accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceKind {
    AccessoryInformation,
    Lightbulb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub kind: ServiceKind,
    pub characteristics: Vec<CharacteristicDescriptor>,
}

/// The complete, fixed descriptor for one bridged light: an identity
/// group and a lighting-control group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessoryDescriptor {
    pub services: Vec<ServiceDescriptor>,
}

/// Build the descriptor for a light record.
///
/// Field set, ranges, and steps are fixed: hue 0-65535 step 1,
/// brightness and saturation 0-100 step 1.
pub fn descriptor_for(light: &LightRecord) -> AccessoryDescriptor {
    let information = ServiceDescriptor {
        kind: ServiceKind::AccessoryInformation,
        characteristics: vec![
            CharacteristicDescriptor::read_only_string(CharacteristicField::Name, &light.name),
            CharacteristicDescriptor::read_only_string(
                CharacteristicField::Manufacturer,
                MANUFACTURER,
            ),
            CharacteristicDescriptor::read_only_string(
                CharacteristicField::Model,
                light.model.as_deref().unwrap_or(""),
            ),
            CharacteristicDescriptor {
                field: CharacteristicField::Identify,
                format: Format::Bool,
                perms: Perms::WRITE_ONLY,
                initial: None,
                range: None,
                unit: None,
                writes: Some(CharacteristicKind::Identify),
            },
        ],
    };

    let lightbulb = ServiceDescriptor {
        kind: ServiceKind::Lightbulb,
        characteristics: vec![
            CharacteristicDescriptor::read_only_string(CharacteristicField::Name, &light.name),
            CharacteristicDescriptor {
                field: CharacteristicField::Power,
                format: Format::Bool,
                perms: Perms::READ_WRITE_EVENTS,
                initial: None,
                range: None,
                unit: None,
                writes: Some(CharacteristicKind::Power),
            },
            CharacteristicDescriptor {
                field: CharacteristicField::Hue,
                format: Format::Int,
                perms: Perms::READ_WRITE_EVENTS,
                initial: None,
                range: Some(ValueRange {
                    min: 0,
                    max: 65535,
                    step: 1,
                }),
                unit: Some(Unit::ArcDegrees),
                writes: Some(CharacteristicKind::Hue),
            },
            CharacteristicDescriptor {
                field: CharacteristicField::Brightness,
                format: Format::Int,
                perms: Perms::READ_WRITE_EVENTS,
                initial: None,
                range: Some(ValueRange {
                    min: 0,
                    max: 100,
                    step: 1,
                }),
                unit: Some(Unit::Percent),
                writes: Some(CharacteristicKind::Brightness),
            },
            CharacteristicDescriptor {
                field: CharacteristicField::Saturation,
                format: Format::Int,
                perms: Perms::READ_WRITE_EVENTS,
                initial: None,
                range: Some(ValueRange {
                    min: 0,
                    max: 100,
                    step: 1,
                }),
                unit: Some(Unit::Percent),
                writes: Some(CharacteristicKind::Saturation),
            },
        ],
    };

    AccessoryDescriptor {
        services: vec![information, lightbulb],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> LightRecord {
        LightRecord {
            id: "1".into(),
            name: "Lamp".into(),
            model: Some("LCT007".into()),
        }
    }

    fn find<'a>(
        service: &'a ServiceDescriptor,
        field: CharacteristicField,
    ) -> &'a CharacteristicDescriptor {
        service
            .characteristics
            .iter()
            .find(|c| c.field == field)
            .expect("characteristic present")
    }

    #[test]
    fn descriptor_has_both_services() {
        let desc = descriptor_for(&lamp());
        let kinds: Vec<ServiceKind> = desc.services.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![ServiceKind::AccessoryInformation, ServiceKind::Lightbulb]
        );
    }

    #[test]
    fn information_service_fields() {
        let desc = descriptor_for(&lamp());
        let info = &desc.services[0];

        assert_eq!(
            find(info, CharacteristicField::Name).initial.as_deref(),
            Some("Lamp")
        );
        assert_eq!(
            find(info, CharacteristicField::Manufacturer)
                .initial
                .as_deref(),
            Some("Philips")
        );
        assert_eq!(
            find(info, CharacteristicField::Model).initial.as_deref(),
            Some("LCT007")
        );

        let identify = find(info, CharacteristicField::Identify);
        assert_eq!(identify.perms, Perms::WRITE_ONLY);
        assert_eq!(identify.writes, Some(CharacteristicKind::Identify));
    }

    #[test]
    fn lightbulb_ranges_and_steps() {
        let desc = descriptor_for(&lamp());
        let bulb = &desc.services[1];

        let hue = find(bulb, CharacteristicField::Hue);
        assert_eq!(
            hue.range,
            Some(ValueRange {
                min: 0,
                max: 65535,
                step: 1
            })
        );
        assert_eq!(hue.unit, Some(Unit::ArcDegrees));

        for field in [
            CharacteristicField::Brightness,
            CharacteristicField::Saturation,
        ] {
            let c = find(bulb, field);
            assert_eq!(
                c.range,
                Some(ValueRange {
                    min: 0,
                    max: 100,
                    step: 1
                })
            );
            assert_eq!(c.unit, Some(Unit::Percent));
            assert_eq!(c.perms, Perms::READ_WRITE_EVENTS);
        }
    }

    #[test]
    fn writable_fields_name_their_write_kind() {
        let desc = descriptor_for(&lamp());
        let bulb = &desc.services[1];

        assert_eq!(
            find(bulb, CharacteristicField::Power).writes,
            Some(CharacteristicKind::Power)
        );
        assert_eq!(
            find(bulb, CharacteristicField::Hue).writes,
            Some(CharacteristicKind::Hue)
        );
        assert!(find(bulb, CharacteristicField::Name).writes.is_none());
    }
}
