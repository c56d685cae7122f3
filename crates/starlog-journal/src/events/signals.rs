//! Signal discovery decoder

use serde::Serialize;

use crate::classify::{signal, SignalClass, UssType};
use crate::localize::{self, NameStyle};
use crate::record::RawRecord;

/// Decoded signal sighting.
///
/// `name` is the canonical token (stable across localizations, used for
/// aggregate identity); `display_name` is the resolved human-readable form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalDiscoveredEvent {
    pub name: String,
    pub display_name: String,
    pub is_station: bool,
    pub uss_type: Option<UssType>,
    pub spawning_faction: Option<String>,
    pub spawning_state: Option<String>,
    pub threat_level: u32,
    pub seconds_remaining: Option<f64>,
    pub system_address: Option<u64>,
    pub classification: SignalClass,
}

/// Decode an `FSSSignalDiscovered` record.
pub fn decode(record: &RawRecord) -> SignalDiscoveredEvent {
    let name: String = record.get("SignalName", String::new());
    let display_name = localize::resolve_field(record.fields(), "SignalName", NameStyle::Plain);
    let is_station = record.flag("IsStation");

    let uss_type = record
        .get_opt::<String>("USSType")
        .filter(|raw| !raw.is_empty())
        .map(|raw| signal::classify_uss(&raw));

    let classification = signal::classify_signal(&name, is_station, uss_type);

    SignalDiscoveredEvent {
        name,
        display_name,
        is_station,
        uss_type,
        spawning_faction: spawn_field(record, "SpawningFaction"),
        spawning_state: spawn_field(record, "SpawningState"),
        threat_level: record.get("ThreatLevel", 0u32),
        seconds_remaining: record.get_opt("TimeRemaining"),
        system_address: record.get_opt("SystemAddress"),
        classification,
    }
}

/// Faction/state fields use an explicit none-token rather than omission in
/// some eras; both shapes normalize to `None`.
fn spawn_field(record: &RawRecord, key: &str) -> Option<String> {
    let raw: String = record.get(key, String::new());
    if raw.is_empty() {
        return None;
    }

    // "$faction_none;", "$FactionState_None;" and plain "None" all mean
    // "no spawning faction/state"
    let normalized = crate::classify::normalize(&raw);
    if normalized == "none" || normalized.ends_with(" none") {
        return None;
    }

    Some(localize::resolve_field(record.fields(), key, NameStyle::Plain))
}
