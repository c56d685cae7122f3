//! Body scan decoder
//!
//! The scan record is the schema-drift champion: materials flipped from an
//! object map to an array of objects, atmosphere moved between free text and
//! identifier fields, and half the numeric fields are simply absent on old
//! records. Everything here degrades to defaults rather than erroring.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{atmosphere, volcanism, AtmosphereClass, VolcanismClass};
use crate::fields;
use crate::localize::{self, NameStyle};
use crate::record::RawRecord;

/// How the scan was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanKind {
    AutoScan,
    Basic,
    Detailed,
    NavBeacon,
    Unknown,
}

impl ScanKind {
    fn classify(text: &str) -> Self {
        match text {
            "AutoScan" => ScanKind::AutoScan,
            "Basic" => ScanKind::Basic,
            "Detailed" => ScanKind::Detailed,
            "NavBeacon" | "NavBeaconDetail" => ScanKind::NavBeacon,
            _ => ScanKind::Unknown,
        }
    }
}

/// One named share of a material or composition breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialShare {
    pub name: String,
    pub percent: f64,
}

/// Decoded body scan.
///
/// Star fields are `None` for planets and vice versa; a body that is
/// neither (asteroid cluster scans) carries only the common fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEvent {
    pub scan_kind: ScanKind,
    pub body_name: String,
    pub body_id: Option<i64>,
    pub distance_from_arrival_ls: f64,

    pub star_class: Option<String>,
    pub stellar_mass: Option<f64>,

    pub planet_class: Option<String>,
    pub terraform_state: Option<String>,
    pub atmosphere: AtmosphereClass,
    pub volcanism: VolcanismClass,
    pub surface_gravity: f64,
    pub surface_temperature: f64,
    pub landable: bool,
    pub materials: Vec<MaterialShare>,
    pub composition: Vec<MaterialShare>,

    pub was_discovered: bool,
    pub was_mapped: bool,
}

/// Decode a `Scan` record.
pub fn decode(record: &RawRecord) -> ScanEvent {
    let scan_kind = ScanKind::classify(&record.get("ScanType", String::new()));

    let planet_class_raw: String = record.get("PlanetClass", String::new());
    let planet_class = if planet_class_raw.is_empty() {
        None
    } else {
        Some(localize::resolve_field(
            record.fields(),
            "PlanetClass",
            NameStyle::Title,
        ))
    };

    let terraform_state: Option<String> = record
        .get_opt::<String>("TerraformState")
        .filter(|s| !s.is_empty())
        .map(|s| localize::resolve(&s, None, NameStyle::Title));

    let atmosphere_text: String = record.get_alias(&["Atmosphere", "AtmosphereType"], String::new());
    let atmosphere_composition = shares(record, "AtmosphereComposition");
    let atmosphere = atmosphere::classify_with_composition(
        &atmosphere_text,
        &atmosphere_composition
            .iter()
            .map(|s| (s.name.clone(), s.percent))
            .collect::<Vec<_>>(),
    );

    ScanEvent {
        scan_kind,
        body_name: record.get("BodyName", String::new()),
        body_id: record.get_opt("BodyID"),
        distance_from_arrival_ls: record.get_alias(
            &["DistanceFromArrivalLS", "DistanceFromArrivalLs"],
            0.0,
        ),
        star_class: record.get_opt::<String>("StarType").filter(|s| !s.is_empty()),
        stellar_mass: record.get_opt("StellarMass"),
        planet_class,
        terraform_state,
        atmosphere,
        volcanism: volcanism::classify(&record.get("Volcanism", String::new())),
        surface_gravity: record.get("SurfaceGravity", 0.0),
        surface_temperature: record.get("SurfaceTemperature", 0.0),
        landable: record.flag("Landable"),
        materials: shares(record, "Materials"),
        composition: shares(record, "Composition"),
        was_discovered: record.flag("WasDiscovered"),
        was_mapped: record.flag("WasMapped"),
    }
}

/// Read a share breakdown in either journal encoding: the modern array of
/// `{Name, Percent}` objects, or the legacy flat `{name: percent}` map.
fn shares(record: &RawRecord, key: &str) -> Vec<MaterialShare> {
    if let Some(entries) = record.array(key) {
        return entries
            .iter()
            .filter_map(Value::as_object)
            .map(|entry| MaterialShare {
                name: fields::get(entry, "Name", String::new()),
                percent: fields::get(entry, "Percent", 0.0),
            })
            .filter(|share| !share.name.is_empty())
            .collect();
    }

    if let Some(map) = record.object(key) {
        return map
            .iter()
            .filter_map(|(name, value)| {
                <f64 as fields::FromField>::from_field(value).map(|percent| MaterialShare {
                    name: name.clone(),
                    percent,
                })
            })
            .collect();
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{AtmosphereType, VolcanismIntensity, VolcanismType};

    fn decode_line(line: &str) -> ScanEvent {
        decode(&RawRecord::from_line(line).unwrap())
    }

    #[test]
    fn test_planet_scan() {
        let scan = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"Scan","ScanType":"Detailed",
                "BodyName":"Tollan 4 a","BodyID":14,"DistanceFromArrivalLS":1204.5,
                "PlanetClass":"HighMetalContent","TerraformState":"Terraformable",
                "Atmosphere":"hot thick carbon dioxide atmosphere",
                "Volcanism":"minor rocky magma volcanism",
                "SurfaceGravity":9.3,"SurfaceTemperature":734.2,"Landable":false,
                "Materials":[{"Name":"iron","Percent":21.1},{"Name":"nickel","Percent":16.2}],
                "WasDiscovered":true,"WasMapped":false}"#,
        );

        assert_eq!(scan.scan_kind, ScanKind::Detailed);
        assert_eq!(scan.body_name, "Tollan 4 a");
        assert_eq!(scan.body_id, Some(14));
        assert_eq!(scan.planet_class.as_deref(), Some("High Metal Content"));
        assert_eq!(scan.terraform_state.as_deref(), Some("Terraformable"));
        assert_eq!(scan.atmosphere.kind, AtmosphereType::CarbonDioxide);
        assert!(scan.atmosphere.properties.hot);
        assert_eq!(scan.volcanism.kind, VolcanismType::RockyMagma);
        assert_eq!(scan.volcanism.intensity, VolcanismIntensity::Minor);
        assert_eq!(scan.materials.len(), 2);
        assert_eq!(scan.materials[0].name, "iron");
        assert!(scan.was_discovered);
        assert!(!scan.was_mapped);
        assert!(scan.star_class.is_none());
    }

    #[test]
    fn test_star_scan() {
        let scan = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"Scan","ScanType":"AutoScan",
                "BodyName":"Tollan","BodyID":0,"DistanceFromArrivalLS":0.0,
                "StarType":"K","StellarMass":0.76,"SurfaceTemperature":4941.0}"#,
        );

        assert_eq!(scan.scan_kind, ScanKind::AutoScan);
        assert_eq!(scan.star_class.as_deref(), Some("K"));
        assert_eq!(scan.stellar_mass, Some(0.76));
        assert!(scan.planet_class.is_none());
        assert_eq!(scan.atmosphere.kind, AtmosphereType::NoAtmosphere);
    }

    #[test]
    fn test_legacy_materials_map() {
        let scan = decode_line(
            r#"{"timestamp":"2016-11-01T09:00:00Z","event":"Scan","BodyName":"Old World",
                "Materials":{"iron":19.6,"sulphur":12.4}}"#,
        );

        assert_eq!(scan.materials.len(), 2);
        assert!(scan
            .materials
            .iter()
            .any(|share| share.name == "iron" && share.percent == 19.6));
    }

    #[test]
    fn test_atmosphere_derived_from_composition() {
        let scan = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"Scan","BodyName":"Tollan 5",
                "Atmosphere":"",
                "AtmosphereComposition":[{"Name":"Nitrogen","Percent":91.5},{"Name":"Oxygen","Percent":8.5}]}"#,
        );

        assert_eq!(scan.atmosphere.kind, AtmosphereType::Nitrogen);
    }

    #[test]
    fn test_missing_everything_defaults() {
        let scan = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"Scan","BodyName":"Bare"}"#,
        );

        assert_eq!(scan.scan_kind, ScanKind::Unknown);
        assert_eq!(scan.body_id, None);
        assert_eq!(scan.distance_from_arrival_ls, 0.0);
        assert!(!scan.landable);
        assert!(scan.materials.is_empty());
        assert_eq!(scan.volcanism.kind, VolcanismType::NoVolcanism);
    }
}
