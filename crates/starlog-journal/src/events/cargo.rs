//! Cargo manifest decoder
//!
//! An older journal-format variant writes the full inventory list only to a
//! companion `Cargo.json` file and leaves the embedded list out of the
//! event. Decoding still succeeds; the event then reports which side-car
//! file the host must read and re-feed through the same decode path.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields;
use crate::localize::{self, NameStyle};
use crate::record::RawRecord;

/// Name of the companion file holding the full inventory.
pub const CARGO_SIDECAR: &str = "Cargo.json";

/// Which hold the manifest describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CargoVessel {
    Ship,
    Srv,
    Unknown,
}

impl CargoVessel {
    fn classify(text: &str) -> Self {
        match text {
            "Ship" | "" => CargoVessel::Ship,
            "SRV" => CargoVessel::Srv,
            _ => CargoVessel::Unknown,
        }
    }
}

/// One commodity stack in the hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoItem {
    pub name: String,
    pub display_name: String,
    pub count: i64,
    pub stolen: i64,
}

/// Decoded cargo manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoEvent {
    pub vessel: CargoVessel,
    pub count: i64,
    pub inventory: Option<Vec<CargoItem>>,
}

impl CargoEvent {
    /// True when the embedded list was absent and the side-car file holds
    /// the authoritative state.
    pub fn needs_sidecar(&self) -> bool {
        self.inventory.is_none()
    }

    /// The companion file to read when [`Self::needs_sidecar`] is true.
    pub fn sidecar_file(&self) -> Option<&'static str> {
        self.needs_sidecar().then_some(CARGO_SIDECAR)
    }
}

/// Decode a `Cargo` record.
pub fn decode(record: &RawRecord) -> CargoEvent {
    let vessel = CargoVessel::classify(&record.get("Vessel", String::new()));

    let inventory = record.array("Inventory").map(|entries| {
        entries
            .iter()
            .filter_map(Value::as_object)
            .map(|entry| CargoItem {
                name: fields::get(entry, "Name", String::new()),
                display_name: localize::resolve_field(entry, "Name", NameStyle::Title),
                count: fields::get(entry, "Count", 0i64),
                stolen: fields::get(entry, "Stolen", 0i64),
            })
            .filter(|item| !item.name.is_empty())
            .collect::<Vec<_>>()
    });

    let count = record.get_opt("Count").unwrap_or_else(|| {
        inventory
            .as_deref()
            .map(|items| items.iter().map(|item| item.count).sum())
            .unwrap_or(0)
    });

    CargoEvent {
        vessel,
        count,
        inventory,
    }
}
