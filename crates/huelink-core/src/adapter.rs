// ── Bridge adapter ──
//
// The surface the accessory-server host consumes. Stateless between
// calls: enumeration produces a fresh snapshot each time, and every
// characteristic write is a single fire-and-forget request. The only
// shared state is the immutable client, so no locks exist. Two writes
// issued back-to-back race at the bridge; the adapter does not order
// them and callers must not assume sequencing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use huelink_api::transport::TransportConfig;
use huelink_api::HueClient;

use crate::config::BridgeConfig;
use crate::error::AdapterError;
use crate::model::{LightRecord, LightRef, LightSnapshot};
use crate::write::{
    CharacteristicWrite, SkipReason, WriteHandle, WriteOutcome, WriteParseError,
};

/// Adapter between a Hue bridge and an accessory-server host.
///
/// Cheaply cloneable (`Arc<HueClient>` inside). The host calls
/// [`enumerate`](Self::enumerate) at startup or on refresh and wires each
/// light's writable descriptor fields to
/// [`write_named`](Self::write_named) /
/// [`write_characteristic`](Self::write_characteristic). The adapter
/// never initiates contact with the host.
#[derive(Clone)]
pub struct HueBridgeAdapter {
    client: Arc<HueClient>,
}

impl HueBridgeAdapter {
    /// Create an adapter from configuration. No network I/O: a bad
    /// address or token surfaces on the first enumeration, not here.
    pub fn new(config: BridgeConfig) -> Result<Self, AdapterError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = HueClient::new(config.url, config.access_token, &transport)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Fetch the bridge's light list and wrap it as a snapshot.
    ///
    /// Exactly one enumeration request. On success the snapshot holds one
    /// record per reported light, in the bridge's order, with (id, name,
    /// model) copied verbatim. On failure the error propagates
    /// immediately -- no retry, no partial snapshot.
    pub async fn enumerate(&self) -> Result<LightSnapshot, AdapterError> {
        debug!("enumerating bridge lights");

        let lights = self.client.list_lights().await?;
        let records: Vec<LightRecord> = lights
            .into_iter()
            .map(|(id, info)| LightRecord::from_wire(id, info))
            .collect();

        info!(count = records.len(), "bridge enumeration complete");
        Ok(LightSnapshot::new(records))
    }

    /// Issue a characteristic write against a light.
    ///
    /// Fire-and-forget: one request is spawned and control returns before
    /// the response arrives. Dropping the returned handle detaches the
    /// write; awaiting [`WriteHandle::outcome`] surfaces the result. The
    /// call itself never errors or panics -- a transport failure is logged
    /// and reported as [`WriteOutcome::Failed`], a write against an
    /// [`Unresolved`](LightRef::Unresolved) reference is a logged no-op
    /// that produces no request at all, and calling from outside a tokio
    /// runtime resolves the handle to `Failed` without spawning.
    pub fn write_characteristic(
        &self,
        light: &LightRef,
        write: CharacteristicWrite,
    ) -> WriteHandle {
        let record = match light {
            LightRef::Resolved(record) => record.clone(),
            LightRef::Unresolved { name } => {
                warn!(light = %name, "light not resolved yet; dropping write");
                return WriteHandle::immediate(WriteOutcome::Skipped(SkipReason::UnresolvedLight));
            }
        };

        // `spawn` panics without a runtime; fail the write instead.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            let err = AdapterError::Internal("characteristic writes require a tokio runtime".into());
            warn!(light = %record.name, error = %err, "dropping write");
            return WriteHandle::immediate(WriteOutcome::Failed(err));
        };

        let client = Arc::clone(&self.client);
        let kind = write.kind();
        let state = write.to_state();

        let task = runtime.spawn(async move {
            match client.set_light_state(&record.id, &state).await {
                Ok(()) => {
                    debug!(light = %record.name, ?kind, "characteristic write applied");
                    WriteOutcome::Sent
                }
                Err(e) => {
                    let err = AdapterError::from(e);
                    warn!(light = %record.name, ?kind, error = %err, "characteristic write failed");
                    WriteOutcome::Failed(err)
                }
            }
        });

        WriteHandle::pending(task)
    }

    /// String-keyed entry point for hosts that dispatch by field name.
    ///
    /// Kind lookup is case-insensitive over the five supported
    /// characteristics. An unrecognized kind produces zero requests and
    /// never errors; the drop is logged at debug level. A recognized kind
    /// with a malformed value is likewise a logged no-op.
    pub fn write_named(
        &self,
        light: &LightRef,
        kind: &str,
        value: &serde_json::Value,
    ) -> WriteHandle {
        match CharacteristicWrite::parse(kind, value) {
            Ok(write) => self.write_characteristic(light, write),
            Err(WriteParseError::UnknownKind(k)) => {
                debug!(kind = %k, light = %light.display_name(), "unrecognized characteristic; dropping");
                WriteHandle::immediate(WriteOutcome::Skipped(SkipReason::UnknownCharacteristic))
            }
            Err(err @ WriteParseError::InvalidValue { .. }) => {
                warn!(light = %light.display_name(), error = %err, "malformed characteristic value; dropping");
                WriteHandle::immediate(WriteOutcome::Skipped(SkipReason::InvalidValue))
            }
        }
    }
}
