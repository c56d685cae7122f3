//! Hyperspace jump decoder

use serde::Serialize;

use crate::record::RawRecord;

/// Decoded hyperspace jump.
///
/// The jump distance field has been renamed once and, in the oldest era,
/// written as a `"292.9 LY"` string; the alias chain and lenient numeric
/// coercion make all three shapes decode identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FsdJumpEvent {
    pub star_system: String,
    pub system_address: Option<u64>,
    pub star_pos: Option<(f64, f64, f64)>,
    pub jump_distance_ly: f64,
    pub fuel_used: f64,
    pub fuel_level: f64,
    pub boost_used: bool,
}

/// Decode an `FSDJump` record.
pub fn decode(record: &RawRecord) -> FsdJumpEvent {
    FsdJumpEvent {
        star_system: record.get("StarSystem", String::new()),
        system_address: record.get_opt("SystemAddress"),
        star_pos: star_pos(record),
        jump_distance_ly: record.get_alias(&["JumpDist", "JumpDistance"], 0.0),
        fuel_used: record.get("FuelUsed", 0.0),
        fuel_level: record.get("FuelLevel", 0.0),
        boost_used: record.flag("BoostUsed"),
    }
}

fn star_pos(record: &RawRecord) -> Option<(f64, f64, f64)> {
    let coords = record.array("StarPos")?;
    match coords.as_slice() {
        [x, y, z] => Some((x.as_f64()?, y.as_f64()?, z.as_f64()?)),
        _ => None,
    }
}
