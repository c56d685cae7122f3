//! Volcanism classification
//!
//! Journal volcanism strings read like "minor silicate vapour geysers
//! volcanism" or "major rocky magma volcanism"; airless dead bodies carry an
//! empty string. The vocabulary is two families (magma and geysers) crossed
//! with a material, plus an intensity qualifier.

use serde::{Deserialize, Serialize};

use super::normalize;

/// Closed volcanism vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolcanismType {
    NoVolcanism,
    AmmoniaMagma,
    CarbonDioxideGeysers,
    AmmoniaGeysers,
    HeliumGeysers,
    MetallicMagma,
    MethaneMagma,
    MethaneGeysers,
    NitrogenMagma,
    NitrogenGeysers,
    RockyMagma,
    SilicateMagma,
    SilicateVapourGeysers,
    SulphurDioxideMagma,
    WaterMagma,
    WaterGeysers,
    Unknown,
}

/// Reported eruption intensity. The journal only qualifies the extremes;
/// an unqualified string is the standard case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolcanismIntensity {
    Minor,
    #[default]
    Standard,
    Major,
}

/// Classification result: type plus intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolcanismClass {
    pub kind: VolcanismType,
    pub intensity: VolcanismIntensity,
}

impl VolcanismClass {
    pub fn none() -> Self {
        Self {
            kind: VolcanismType::NoVolcanism,
            intensity: VolcanismIntensity::Standard,
        }
    }
}

/// Lookup table, in priority order. "silicate vapour geysers" precedes
/// "silicate magma" so the substring pass keys on the longer phrase first.
const VOLCANISM_TABLE: &[(&str, VolcanismType)] = &[
    ("none", VolcanismType::NoVolcanism),
    ("ammonia magma", VolcanismType::AmmoniaMagma),
    ("ammonia geysers", VolcanismType::AmmoniaGeysers),
    ("carbon dioxide geysers", VolcanismType::CarbonDioxideGeysers),
    ("helium geysers", VolcanismType::HeliumGeysers),
    ("metallic magma", VolcanismType::MetallicMagma),
    ("methane magma", VolcanismType::MethaneMagma),
    ("methane geysers", VolcanismType::MethaneGeysers),
    ("nitrogen magma", VolcanismType::NitrogenMagma),
    ("nitrogen geysers", VolcanismType::NitrogenGeysers),
    ("rocky magma", VolcanismType::RockyMagma),
    ("silicate vapour geysers", VolcanismType::SilicateVapourGeysers),
    ("silicate magma", VolcanismType::SilicateMagma),
    ("sulphur dioxide magma", VolcanismType::SulphurDioxideMagma),
    ("sulfur dioxide magma", VolcanismType::SulphurDioxideMagma),
    ("water magma", VolcanismType::WaterMagma),
    ("water geysers", VolcanismType::WaterGeysers),
];

/// Classify a volcanism description. Empty means no volcanism.
pub fn classify(text: &str) -> VolcanismClass {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return VolcanismClass::none();
    }

    let mut intensity = VolcanismIntensity::Standard;
    let mut body_words: Vec<&str> = Vec::new();

    for word in normalized.split_whitespace() {
        match word {
            "minor" => intensity = VolcanismIntensity::Minor,
            "major" => intensity = VolcanismIntensity::Major,
            "volcanism" => {},
            other => body_words.push(other),
        }
    }

    let body = body_words.join(" ");
    if body.is_empty() || body == "no" {
        return VolcanismClass::none();
    }

    for (pattern, kind) in VOLCANISM_TABLE {
        if body == *pattern {
            return VolcanismClass { kind: *kind, intensity };
        }
    }
    for (pattern, kind) in VOLCANISM_TABLE {
        if body.contains(pattern) {
            return VolcanismClass { kind: *kind, intensity };
        }
    }

    VolcanismClass {
        kind: VolcanismType::Unknown,
        intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_free_text() {
        let class = classify("minor silicate vapour geysers volcanism");
        assert_eq!(class.kind, VolcanismType::SilicateVapourGeysers);
        assert_eq!(class.intensity, VolcanismIntensity::Minor);
    }

    #[test]
    fn test_unqualified_is_standard() {
        let class = classify("rocky magma volcanism");
        assert_eq!(class.kind, VolcanismType::RockyMagma);
        assert_eq!(class.intensity, VolcanismIntensity::Standard);
    }

    #[test]
    fn test_major_intensity() {
        let class = classify("major water geysers volcanism");
        assert_eq!(class.kind, VolcanismType::WaterGeysers);
        assert_eq!(class.intensity, VolcanismIntensity::Major);
    }

    #[test]
    fn test_empty_is_dead_body() {
        assert_eq!(classify("").kind, VolcanismType::NoVolcanism);
        assert_eq!(classify("No volcanism").kind, VolcanismType::NoVolcanism);
    }

    #[test]
    fn test_vapour_beats_plain_silicate() {
        assert_eq!(
            classify("silicate vapour geysers").kind,
            VolcanismType::SilicateVapourGeysers
        );
        assert_eq!(classify("silicate magma").kind, VolcanismType::SilicateMagma);
    }

    #[test]
    fn test_unrecognized_keeps_intensity() {
        let class = classify("major lava lamp volcanism");
        assert_eq!(class.kind, VolcanismType::Unknown);
        assert_eq!(class.intensity, VolcanismIntensity::Major);
    }

    #[test]
    fn test_spelling_variant() {
        assert_eq!(
            classify("sulfur dioxide magma volcanism").kind,
            VolcanismType::SulphurDioxideMagma
        );
    }
}
