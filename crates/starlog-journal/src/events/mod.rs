//! Typed decoded events
//!
//! One decoder per known discriminator, each a pure function of the raw
//! record. Decoded events carry typed, normalized fields only; the raw
//! dynamic forms never leak past this module (except inside the generic
//! passthrough, whose whole job is to preserve them).

pub mod cargo;
pub mod organic;
pub mod scan;
pub mod signals;
pub mod travel;

pub use cargo::{CargoEvent, CargoItem, CargoVessel};
pub use organic::{OrganicScanEvent, OrganicScanStage};
pub use scan::{MaterialShare, ScanEvent, ScanKind};
pub use signals::SignalDiscoveredEvent;
pub use travel::FsdJumpEvent;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::record::RawRecord;

/// The closed union over all known event kinds.
///
/// Adding a kind means adding a variant here and an arm in
/// [`crate::dispatch::decode`]; the compiler flags every match that needs
/// updating.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum EventPayload {
    Scan(ScanEvent),
    FsdJump(FsdJumpEvent),
    SignalDiscovered(SignalDiscoveredEvent),
    OrganicScan(OrganicScanEvent),
    Cargo(CargoEvent),
    Unknown(GenericEvent),
}

impl EventPayload {
    /// Stable name of the payload kind, for logging and host routing.
    pub fn kind_name(&self) -> &'static str {
        match self {
            EventPayload::Scan(_) => "Scan",
            EventPayload::FsdJump(_) => "FsdJump",
            EventPayload::SignalDiscovered(_) => "SignalDiscovered",
            EventPayload::OrganicScan(_) => "OrganicScan",
            EventPayload::Cargo(_) => "Cargo",
            EventPayload::Unknown(_) => "Unknown",
        }
    }

    /// Companion file the host must read and re-feed when the event's
    /// authoritative list fields were truncated by an older journal format.
    pub fn sidecar_file(&self) -> Option<&'static str> {
        match self {
            EventPayload::Cargo(cargo) => cargo.sidecar_file(),
            _ => None,
        }
    }
}

/// A decoded event: the payload plus its ingestion envelope.
///
/// `seq` is assigned monotonically by the pipeline at ingestion; together
/// with `timestamp` it gives downstream consumers a total order even when
/// the journal writes several records in the same second.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedEvent {
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

/// Generic passthrough for unknown discriminators.
///
/// Future or unrecognized event kinds stay representable and inspectable:
/// the discriminator and the untouched raw field map ride along unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericEvent {
    pub event: String,
    pub fields: Map<String, Value>,
}

impl GenericEvent {
    pub fn from_record(record: &RawRecord) -> Self {
        Self {
            event: record.event().to_string(),
            fields: record.fields().clone(),
        }
    }
}
