//! Organic scan decoder

use serde::{Deserialize, Serialize};

use crate::localize::{self, NameStyle};
use crate::record::RawRecord;

/// Which step of the three-scan sampling loop this record reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganicScanStage {
    Log,
    Sample,
    Analyse,
    Unknown,
}

impl OrganicScanStage {
    fn classify(text: &str) -> Self {
        match text {
            "Log" => OrganicScanStage::Log,
            "Sample" => OrganicScanStage::Sample,
            "Analyse" | "Analyze" => OrganicScanStage::Analyse,
            _ => OrganicScanStage::Unknown,
        }
    }
}

/// Decoded organic sample scan.
///
/// `genus`/`species` are canonical tokens (aggregate identity);
/// `genus_name`/`species_name` are resolved display forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganicScanEvent {
    pub stage: OrganicScanStage,
    pub genus: String,
    pub genus_name: String,
    pub species: String,
    pub species_name: String,
    pub variant: Option<String>,
    pub system_address: Option<u64>,
    pub body_id: Option<i64>,
}

/// Decode a `ScanOrganic` record.
pub fn decode(record: &RawRecord) -> OrganicScanEvent {
    OrganicScanEvent {
        stage: OrganicScanStage::classify(&record.get("ScanType", String::new())),
        genus: record.get("Genus", String::new()),
        genus_name: localize::resolve_field(record.fields(), "Genus", NameStyle::Title),
        species: record.get("Species", String::new()),
        species_name: localize::resolve_field(record.fields(), "Species", NameStyle::Title),
        variant: record
            .get_opt::<String>("Variant")
            .filter(|raw| !raw.is_empty())
            .map(|_| localize::resolve_field(record.fields(), "Variant", NameStyle::Title)),
        system_address: record.get_opt("SystemAddress"),
        body_id: record.get_opt("Body"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_line(line: &str) -> OrganicScanEvent {
        decode(&RawRecord::from_line(line).unwrap())
    }

    #[test]
    fn test_full_record() {
        let sample = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"ScanOrganic","ScanType":"Sample",
                "Genus":"$Codex_Ent_Stratum_Genus_Name;","Genus_Localised":"Stratum",
                "Species":"$Codex_Ent_Stratum_02_Name;","Species_Localised":"Stratum Paleas",
                "Variant":"$Codex_Ent_Stratum_02_F_Name;","Variant_Localised":"Stratum Paleas - Emerald",
                "SystemAddress":3932277478106,"Body":14}"#,
        );

        assert_eq!(sample.stage, OrganicScanStage::Sample);
        assert_eq!(sample.genus, "$Codex_Ent_Stratum_Genus_Name;");
        assert_eq!(sample.genus_name, "Stratum");
        assert_eq!(sample.species_name, "Stratum Paleas");
        assert_eq!(sample.variant.as_deref(), Some("Stratum Paleas - Emerald"));
        assert_eq!(sample.body_id, Some(14));
    }

    #[test]
    fn test_unlocalised_names_are_synthesized() {
        let sample = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"ScanOrganic","ScanType":"Log",
                "Genus":"$Codex_Ent_Bacterial_Genus_Name;",
                "Species":"$Codex_Ent_Bacterial_01_Name;"}"#,
        );

        assert_eq!(sample.stage, OrganicScanStage::Log);
        assert_eq!(sample.genus_name, "Codex Ent Bacterial Genus");
        assert_eq!(sample.variant, None);
    }

    #[test]
    fn test_spelling_variant_and_unknown_stage() {
        let analyse = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"ScanOrganic","ScanType":"Analyze",
                "Genus":"g","Species":"s"}"#,
        );
        assert_eq!(analyse.stage, OrganicScanStage::Analyse);

        let odd = decode_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"ScanOrganic","ScanType":"Harvest",
                "Genus":"g","Species":"s"}"#,
        );
        assert_eq!(odd.stage, OrganicScanStage::Unknown);
    }
}
