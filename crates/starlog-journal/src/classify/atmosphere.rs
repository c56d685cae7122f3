//! Atmosphere classification
//!
//! The journal describes planetary atmospheres as free text ("hot thick
//! sulphur dioxide atmosphere"), as camel-cased identifiers
//! ("CarbonDioxideRich"), or not at all, with only a composition-by-percent
//! breakdown to go on. This classifier folds all three encodings into one
//! closed vocabulary plus density/heat property flags.

use serde::{Deserialize, Serialize};

use super::normalize;

/// Closed atmosphere vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtmosphereType {
    NoAtmosphere,
    Ammonia,
    AmmoniaAndOxygen,
    AmmoniaRich,
    Argon,
    ArgonRich,
    CarbonDioxide,
    CarbonDioxideRich,
    EarthLike,
    Helium,
    MetallicVapour,
    Methane,
    MethaneRich,
    Neon,
    NeonRich,
    Nitrogen,
    Oxygen,
    SilicateVapour,
    SulphurDioxide,
    SuitableForWaterBasedLife,
    Venusian,
    Water,
    WaterRich,
    Unknown,
}

/// Density/heat qualifiers carried alongside the type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmosphereProperties {
    pub thin: bool,
    pub thick: bool,
    pub hot: bool,
    pub rich: bool,
}

/// Classification result: a concrete type (possibly `Unknown`) plus
/// property flags. Never empty, never an Option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmosphereClass {
    pub kind: AtmosphereType,
    pub properties: AtmosphereProperties,
}

impl AtmosphereClass {
    pub fn none() -> Self {
        Self {
            kind: AtmosphereType::NoAtmosphere,
            properties: AtmosphereProperties::default(),
        }
    }
}

/// Lookup table, in priority order. Compound names come before their
/// single-word prefixes ("carbon dioxide rich" before "carbon dioxide")
/// so the substring pass cannot short-circuit on the shorter match.
const ATMOSPHERE_TABLE: &[(&str, AtmosphereType)] = &[
    ("none", AtmosphereType::NoAtmosphere),
    ("ammonia and oxygen", AtmosphereType::AmmoniaAndOxygen),
    ("ammonia rich", AtmosphereType::AmmoniaRich),
    ("ammonia", AtmosphereType::Ammonia),
    ("argon rich", AtmosphereType::ArgonRich),
    ("argon", AtmosphereType::Argon),
    ("carbon dioxide rich", AtmosphereType::CarbonDioxideRich),
    ("carbon dioxide", AtmosphereType::CarbonDioxide),
    ("earth like", AtmosphereType::EarthLike),
    ("helium", AtmosphereType::Helium),
    ("metallic vapour", AtmosphereType::MetallicVapour),
    ("methane rich", AtmosphereType::MethaneRich),
    ("methane", AtmosphereType::Methane),
    ("neon rich", AtmosphereType::NeonRich),
    ("neon", AtmosphereType::Neon),
    ("nitrogen", AtmosphereType::Nitrogen),
    ("oxygen", AtmosphereType::Oxygen),
    ("silicate vapour", AtmosphereType::SilicateVapour),
    ("sulphur dioxide", AtmosphereType::SulphurDioxide),
    ("sulfur dioxide", AtmosphereType::SulphurDioxide),
    (
        "suitable for water based life",
        AtmosphereType::SuitableForWaterBasedLife,
    ),
    ("venusian", AtmosphereType::Venusian),
    ("water rich", AtmosphereType::WaterRich),
    ("water", AtmosphereType::Water),
];

/// Classify an atmosphere description.
///
/// An empty description means "no atmosphere" (the journal omits the field
/// for airless bodies); anything unrecognizable is `Unknown` with whatever
/// property words were still readable.
pub fn classify(text: &str) -> AtmosphereClass {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return AtmosphereClass::none();
    }

    let mut properties = AtmosphereProperties::default();
    let mut body_words: Vec<&str> = Vec::new();

    for word in normalized.split_whitespace() {
        match word {
            "thin" => properties.thin = true,
            "thick" => properties.thick = true,
            "hot" => properties.hot = true,
            "rich" => {
                properties.rich = true;
                // "rich" is also part of compound type names
                body_words.push(word);
            },
            "atmosphere" => {},
            other => body_words.push(other),
        }
    }

    let body = body_words.join(" ");

    // "No atmosphere" reduces to just "no" once the filler word is dropped
    if body.is_empty() || body == "no" {
        return AtmosphereClass::none();
    }

    for (pattern, kind) in ATMOSPHERE_TABLE {
        if body == *pattern {
            return AtmosphereClass { kind: *kind, properties };
        }
    }
    for (pattern, kind) in ATMOSPHERE_TABLE {
        if body.contains(pattern) {
            return AtmosphereClass { kind: *kind, properties };
        }
    }

    AtmosphereClass {
        kind: AtmosphereType::Unknown,
        properties,
    }
}

/// Derivational fallback: classify from a composition-by-percent breakdown
/// when the descriptive field is blank.
///
/// The dominant component (highest percentage, first occurrence on a tie)
/// stands in for the primary field, so downstream consumers never see an
/// empty classification when derivable data exists.
pub fn classify_with_composition(text: &str, composition: &[(String, f64)]) -> AtmosphereClass {
    if !normalize(text).is_empty() {
        return classify(text);
    }

    let dominant = composition
        .iter()
        .fold(None::<&(String, f64)>, |best, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        });

    match dominant {
        Some((name, _)) => classify(name),
        None => AtmosphereClass::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_with_properties() {
        let class = classify("hot thick sulphur dioxide atmosphere");
        assert_eq!(class.kind, AtmosphereType::SulphurDioxide);
        assert!(class.properties.hot);
        assert!(class.properties.thick);
        assert!(!class.properties.thin);
    }

    #[test]
    fn test_camel_case_identifier() {
        assert_eq!(classify("CarbonDioxide").kind, AtmosphereType::CarbonDioxide);

        let rich = classify("CarbonDioxideRich");
        assert_eq!(rich.kind, AtmosphereType::CarbonDioxideRich);
        assert!(rich.properties.rich);
    }

    #[test]
    fn test_compound_beats_prefix() {
        assert_eq!(
            classify("thin ammonia and oxygen atmosphere").kind,
            AtmosphereType::AmmoniaAndOxygen
        );
        assert_eq!(classify("water rich atmosphere").kind, AtmosphereType::WaterRich);
    }

    #[test]
    fn test_empty_is_airless() {
        assert_eq!(classify("").kind, AtmosphereType::NoAtmosphere);
        assert_eq!(classify("No atmosphere").kind, AtmosphereType::NoAtmosphere);
    }

    #[test]
    fn test_unrecognized_is_unknown_sentinel() {
        let class = classify("hot chlorine soup");
        assert_eq!(class.kind, AtmosphereType::Unknown);
        assert!(class.properties.hot);
    }

    #[test]
    fn test_spelling_variant() {
        assert_eq!(
            classify("thin sulfur dioxide atmosphere").kind,
            AtmosphereType::SulphurDioxide
        );
    }

    #[test]
    fn test_derivational_from_composition() {
        let composition = vec![
            ("Nitrogen".to_string(), 22.5),
            ("CarbonDioxide".to_string(), 70.1),
            ("Oxygen".to_string(), 7.4),
        ];
        let class = classify_with_composition("", &composition);
        assert_eq!(class.kind, AtmosphereType::CarbonDioxide);
    }

    #[test]
    fn test_derivational_tie_takes_first() {
        let composition = vec![
            ("Argon".to_string(), 50.0),
            ("Neon".to_string(), 50.0),
        ];
        let class = classify_with_composition("", &composition);
        assert_eq!(class.kind, AtmosphereType::Argon);
    }

    #[test]
    fn test_descriptive_text_beats_composition() {
        let composition = vec![("Argon".to_string(), 100.0)];
        let class = classify_with_composition("thin water atmosphere", &composition);
        assert_eq!(class.kind, AtmosphereType::Water);
    }

    #[test]
    fn test_idempotent_and_deterministic() {
        let a = classify("hot thick carbon dioxide rich atmosphere");
        let b = classify("hot thick carbon dioxide rich atmosphere");
        assert_eq!(a, b);
        assert_eq!(a.kind, AtmosphereType::CarbonDioxideRich);
    }
}
