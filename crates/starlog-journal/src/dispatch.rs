//! Event dispatch registry
//!
//! Discriminator string → decoder, closed at build time. The match arms are
//! the registry: adding an event kind is a compiler-enforced change here and
//! in [`EventPayload`], not a runtime registration. Lookup is exact-match
//! and case-sensitive; a miss degrades to the generic passthrough so
//! unknown and future event kinds never fail ingestion.

use crate::events::{cargo, organic, scan, signals, travel, EventPayload, GenericEvent};
use crate::record::RawRecord;

/// Discriminators with a registered typed decoder, sorted.
pub const KNOWN_EVENTS: &[&str] = &[
    "Cargo",
    "FSDJump",
    "FSSSignalDiscovered",
    "Scan",
    "ScanOrganic",
];

/// True when the discriminator has a typed decoder.
pub fn is_known(discriminator: &str) -> bool {
    KNOWN_EVENTS.binary_search(&discriminator).is_ok()
}

/// Decode one record. Pure: the same record always produces the same
/// payload.
pub fn decode(record: &RawRecord) -> EventPayload {
    match record.event() {
        "Cargo" => EventPayload::Cargo(cargo::decode(record)),
        "FSDJump" => EventPayload::FsdJump(travel::decode(record)),
        "FSSSignalDiscovered" => EventPayload::SignalDiscovered(signals::decode(record)),
        "Scan" => EventPayload::Scan(scan::decode(record)),
        "ScanOrganic" => EventPayload::OrganicScan(organic::decode(record)),
        _ => EventPayload::Unknown(GenericEvent::from_record(record)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_events_list_is_sorted() {
        let mut sorted = KNOWN_EVENTS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, KNOWN_EVENTS);
    }

    #[test]
    fn test_is_known() {
        assert!(is_known("Scan"));
        assert!(is_known("FSSSignalDiscovered"));
        assert!(!is_known("scan")); // case-sensitive
        assert!(!is_known("FutureEventXYZ"));
    }

    #[test]
    fn test_dispatch_to_typed_decoder() {
        let record = RawRecord::from_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"FSDJump","StarSystem":"Sol"}"#,
        )
        .unwrap();

        match decode(&record) {
            EventPayload::FsdJump(jump) => assert_eq!(jump.star_system, "Sol"),
            other => panic!("expected FsdJump, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_unknown_round_trip() {
        let record = RawRecord::from_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"FutureEventXYZ","A":1,"B":"two"}"#,
        )
        .unwrap();

        match decode(&record) {
            EventPayload::Unknown(generic) => {
                assert_eq!(generic.event, "FutureEventXYZ");
                assert_eq!(generic.fields, *record.fields());
            },
            other => panic!("expected Unknown, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_decode_is_pure() {
        let record = RawRecord::from_line(
            r#"{"timestamp":"2024-01-05T12:00:00Z","event":"Scan","BodyName":"Tollan 4 a"}"#,
        )
        .unwrap();

        assert_eq!(decode(&record), decode(&record));
    }
}
