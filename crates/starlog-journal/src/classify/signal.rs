//! Signal-source classification
//!
//! Discovered signals arrive as opaque name tokens plus a handful of hint
//! fields (station flag, USS type, threat level). Classification decides
//! which closed class a sighting belongs to; the aggregator keys its dedupe
//! and expiry rules on that class.

use serde::{Deserialize, Serialize};

use super::normalize;

/// Unidentified-signal-source subtypes, from `$USS_Type_*;` tokens.
///
/// The salvage tokens map onto the emission grades the scanner actually
/// reports; the raw token names lag several schema eras behind the display
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UssType {
    Aftermath,
    Anomaly,
    Ceremonial,
    Convoy,
    DegradedEmissions,
    DistressSignal,
    EncodedEmissions,
    HighGradeEmissions,
    MissionTarget,
    NonHuman,
    TradingBeacon,
    WeaponsFire,
    Unknown,
}

/// Exact token table for USS subtypes.
const USS_TABLE: &[(&str, UssType)] = &[
    ("$USS_Type_Aftermath;", UssType::Aftermath),
    ("$USS_Type_Anomaly;", UssType::Anomaly),
    ("$USS_Type_Ceremonial;", UssType::Ceremonial),
    ("$USS_Type_Convoy;", UssType::Convoy),
    ("$USS_Type_DistressSignal;", UssType::DistressSignal),
    ("$USS_Type_MissionTarget;", UssType::MissionTarget),
    ("$USS_Type_NonHuman;", UssType::NonHuman),
    ("$USS_Type_Salvage;", UssType::DegradedEmissions),
    ("$USS_Type_ValuableSalvage;", UssType::EncodedEmissions),
    ("$USS_Type_VeryValuableSalvage;", UssType::HighGradeEmissions),
    ("$USS_Type_TradingBeacon;", UssType::TradingBeacon),
    ("$USS_Type_WeaponsFire;", UssType::WeaponsFire),
];

/// Substring fallback, in priority order: longer salvage grades first so
/// "very valuable salvage" never stops at plain "salvage".
const USS_HEURISTICS: &[(&str, UssType)] = &[
    ("very valuable salvage", UssType::HighGradeEmissions),
    ("valuable salvage", UssType::EncodedEmissions),
    ("high grade emissions", UssType::HighGradeEmissions),
    ("encoded emissions", UssType::EncodedEmissions),
    ("degraded emissions", UssType::DegradedEmissions),
    ("salvage", UssType::DegradedEmissions),
    ("aftermath", UssType::Aftermath),
    ("anomaly", UssType::Anomaly),
    ("ceremonial", UssType::Ceremonial),
    ("convoy", UssType::Convoy),
    ("distress", UssType::DistressSignal),
    ("mission", UssType::MissionTarget),
    ("non human", UssType::NonHuman),
    ("nonhuman", UssType::NonHuman),
    ("trading beacon", UssType::TradingBeacon),
    ("weapons fire", UssType::WeaponsFire),
];

/// Classify a USS type token.
pub fn classify_uss(token: &str) -> UssType {
    if token.trim().is_empty() {
        return UssType::Unknown;
    }

    for (pattern, kind) in USS_TABLE {
        if token == *pattern {
            return *kind;
        }
    }

    let normalized = normalize(token);
    for (pattern, kind) in USS_HEURISTICS {
        if normalized.contains(pattern) {
            return *kind;
        }
    }

    UssType::Unknown
}

/// Closed vocabulary for what a discovered signal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalClass {
    FleetCarrier,
    Station,
    Megaship,
    Installation,
    UnidentifiedSignalSource,
    NavBeacon,
    ResourceExtraction,
    ConflictZone,
    TouristBeacon,
    NotableStellarPhenomena,
    Unknown,
}

impl SignalClass {
    /// Carrier signals are synthetic identities inferred from a name
    /// heuristic; the aggregator gives them an override expiry.
    pub fn is_carrier(self) -> bool {
        self == SignalClass::FleetCarrier
    }
}

/// Exact scenario-token table for named signal kinds.
const SIGNAL_TOKEN_TABLE: &[(&str, SignalClass)] = &[
    ("$MULTIPLAYER_SCENARIO42_TITLE;", SignalClass::NavBeacon),
    ("$MULTIPLAYER_SCENARIO14_TITLE;", SignalClass::ResourceExtraction),
    ("$MULTIPLAYER_SCENARIO77_TITLE;", SignalClass::ResourceExtraction),
    ("$MULTIPLAYER_SCENARIO78_TITLE;", SignalClass::ResourceExtraction),
    ("$MULTIPLAYER_SCENARIO79_TITLE;", SignalClass::ResourceExtraction),
    ("$MULTIPLAYER_SCENARIO80_TITLE;", SignalClass::ResourceExtraction),
    ("$Warzone_PointRace_Low;", SignalClass::ConflictZone),
    ("$Warzone_PointRace_Med;", SignalClass::ConflictZone),
    ("$Warzone_PointRace_High;", SignalClass::ConflictZone),
    ("$Fixed_Event_Life_Cloud;", SignalClass::NotableStellarPhenomena),
    ("$Fixed_Event_Life_Ring;", SignalClass::NotableStellarPhenomena),
    ("$Fixed_Event_Life_Belt;", SignalClass::NotableStellarPhenomena),
];

/// Substring fallback over the resolved name, in priority order.
const SIGNAL_HEURISTICS: &[(&str, SignalClass)] = &[
    ("installation", SignalClass::Installation),
    ("megaship", SignalClass::Megaship),
    ("tourist", SignalClass::TouristBeacon),
    ("resource extraction", SignalClass::ResourceExtraction),
    ("conflict zone", SignalClass::ConflictZone),
    ("warzone", SignalClass::ConflictZone),
    ("nav beacon", SignalClass::NavBeacon),
    ("notable stellar phenomena", SignalClass::NotableStellarPhenomena),
];

/// Classify one signal sighting.
///
/// Priority: carrier callsign, exact name tokens, USS hint, substring
/// heuristics, then the station flag, then `Unknown`. The callsign check
/// runs first because carriers also fly the station flag.
pub fn classify_signal(name: &str, is_station: bool, uss_type: Option<UssType>) -> SignalClass {
    if has_carrier_callsign(name) {
        return SignalClass::FleetCarrier;
    }

    for (pattern, class) in SIGNAL_TOKEN_TABLE {
        if name == *pattern {
            return *class;
        }
    }

    if uss_type.is_some() {
        return SignalClass::UnidentifiedSignalSource;
    }

    let normalized = normalize(name);
    for (pattern, class) in SIGNAL_HEURISTICS {
        if normalized.contains(pattern) {
            return *class;
        }
    }

    if is_station {
        return SignalClass::Station;
    }

    SignalClass::Unknown
}

/// Carrier callsign heuristic: the name ends in an `XXX-XXX` suffix of
/// alphanumerics, standing alone or preceded by a space.
pub fn has_carrier_callsign(name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    let n = chars.len();
    if n < 7 {
        return false;
    }

    let suffix = &chars[n - 7..];
    let alnum = |c: &char| c.is_ascii_alphanumeric();

    suffix[3] == '-'
        && suffix[..3].iter().all(alnum)
        && suffix[4..].iter().all(alnum)
        && (n == 7 || chars[n - 8] == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uss_exact_tokens() {
        assert_eq!(classify_uss("$USS_Type_Salvage;"), UssType::DegradedEmissions);
        assert_eq!(
            classify_uss("$USS_Type_VeryValuableSalvage;"),
            UssType::HighGradeEmissions
        );
        assert_eq!(classify_uss("$USS_Type_NonHuman;"), UssType::NonHuman);
    }

    #[test]
    fn test_uss_heuristic_fallback() {
        // renamed identifier from a later schema era
        assert_eq!(
            classify_uss("$USS_SalvageHaulageWreckage;"),
            UssType::DegradedEmissions
        );
        assert_eq!(classify_uss("High Grade Emissions"), UssType::HighGradeEmissions);
        assert_eq!(classify_uss("$USS_Type_Abandoned_Probe;"), UssType::Unknown);
        assert_eq!(classify_uss(""), UssType::Unknown);
    }

    #[test]
    fn test_carrier_callsign() {
        assert!(has_carrier_callsign("K7Q-BQL"));
        assert!(has_carrier_callsign("MALLORY VENTURE K7Q-BQL"));
        assert!(!has_carrier_callsign("K7Q-BQ"));
        assert!(!has_carrier_callsign("VENTUREK7Q-BQL"));
        assert!(!has_carrier_callsign("K7Q_BQL"));
        assert!(!has_carrier_callsign("Nav Beacon"));
    }

    #[test]
    fn test_classify_carrier_beats_station_flag() {
        assert_eq!(
            classify_signal("MALLORY VENTURE K7Q-BQL", true, None),
            SignalClass::FleetCarrier
        );
    }

    #[test]
    fn test_classify_scenario_tokens() {
        assert_eq!(
            classify_signal("$MULTIPLAYER_SCENARIO42_TITLE;", false, None),
            SignalClass::NavBeacon
        );
        assert_eq!(
            classify_signal("$MULTIPLAYER_SCENARIO77_TITLE;", false, None),
            SignalClass::ResourceExtraction
        );
        assert_eq!(
            classify_signal("$Fixed_Event_Life_Cloud;", false, None),
            SignalClass::NotableStellarPhenomena
        );
    }

    #[test]
    fn test_classify_uss_hint() {
        assert_eq!(
            classify_signal("$USS;", false, Some(UssType::Convoy)),
            SignalClass::UnidentifiedSignalSource
        );
    }

    #[test]
    fn test_classify_station_flag() {
        assert_eq!(
            classify_signal("Jameson Memorial", true, None),
            SignalClass::Station
        );
    }

    #[test]
    fn test_classify_substring_heuristics() {
        assert_eq!(
            classify_signal("$Installation_Comms;", false, None),
            SignalClass::Installation
        );
        assert_eq!(
            classify_signal("Pearl Tourist Beacon 0191", false, None),
            SignalClass::TouristBeacon
        );
    }

    #[test]
    fn test_classify_unknown_sentinel() {
        assert_eq!(
            classify_signal("Mysterious Contact", false, None),
            SignalClass::Unknown
        );
    }
}
