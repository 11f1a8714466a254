// huelink-core: Adapter layer between huelink-api and an accessory-server host.

pub mod accessory;
pub mod adapter;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod write;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::HueBridgeAdapter;
pub use config::BridgeConfig;
pub use error::AdapterError;

pub use model::{LightRecord, LightRef, LightSnapshot};
pub use write::{
    CharacteristicKind, CharacteristicWrite, SkipReason, WriteHandle, WriteOutcome,
    WriteParseError,
};

pub use accessory::{
    descriptor_for, AccessoryDescriptor, CharacteristicDescriptor, CharacteristicField, Format,
    Perms, ServiceDescriptor, ServiceKind, Unit, ValueRange, MANUFACTURER,
};
