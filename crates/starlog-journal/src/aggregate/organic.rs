//! Organic sample staging
//!
//! Sampling a species takes a chain of scans: one Log, two Samples, one
//! Analyse. The journal reports each step as its own record, and a
//! commander who walks away mid-chain loses the partial progress — starting
//! on a different species wipes any chain that never reached Analyse. The
//! consolidation below replays a location's samples in time order through
//! that state machine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use crate::events::{OrganicScanEvent, OrganicScanStage};

/// Identity of one sampling chain: the (genus, species) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SampleKey {
    pub genus: String,
    pub species: String,
}

impl SampleKey {
    fn of(event: &OrganicScanEvent) -> Self {
        Self {
            genus: event.genus.clone(),
            species: event.species.clone(),
        }
    }
}

/// Progress of a sampling chain.
///
/// A second consecutive Sample for the same key collapses into
/// `Sample2Plus` rather than producing two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleStage {
    Log,
    Sample,
    Sample2Plus,
    Analyse,
}

/// Latest known state of one (genus, species) chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub genus: String,
    pub genus_name: String,
    pub species: String,
    pub species_name: String,
    pub stage: SampleStage,
    pub timestamp: DateTime<Utc>,
}

impl SampleRecord {
    pub fn is_complete(&self) -> bool {
        self.stage == SampleStage::Analyse
    }
}

/// Location of a sampling batch: (system address, body id).
pub type LocationKey = (Option<u64>, Option<i64>);

/// Per-location collector for organic sample events.
#[derive(Debug, Default)]
pub struct OrganicAggregator {
    batches: BTreeMap<LocationKey, Vec<(DateTime<Utc>, OrganicScanEvent)>>,
}

impl OrganicAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample event into its location's batch.
    pub fn observe(&mut self, event: &OrganicScanEvent, timestamp: DateTime<Utc>) {
        let location = (event.system_address, event.body_id);
        self.batches
            .entry(location)
            .or_default()
            .push((timestamp, event.clone()));
    }

    /// Locations with at least one sample.
    pub fn locations(&self) -> Vec<LocationKey> {
        self.batches.keys().copied().collect()
    }

    /// Consolidated view for one location: at most one record per
    /// (genus, species), at its latest known stage.
    pub fn consolidated(&self, location: LocationKey) -> Vec<SampleRecord> {
        self.batches
            .get(&location)
            .map(|batch| consolidate(batch))
            .unwrap_or_default()
    }

    /// Consolidated view across every location.
    pub fn all_consolidated(&self) -> Vec<SampleRecord> {
        self.batches
            .values()
            .flat_map(|batch| consolidate(batch))
            .collect()
    }
}

/// Replay one location's samples in time order through the staging state
/// machine.
pub fn consolidate(samples: &[(DateTime<Utc>, OrganicScanEvent)]) -> Vec<SampleRecord> {
    let mut ordered: Vec<&(DateTime<Utc>, OrganicScanEvent)> = samples.iter().collect();
    // stable: same-instant samples keep arrival order
    ordered.sort_by_key(|(timestamp, _)| *timestamp);

    let mut working: BTreeMap<SampleKey, SampleRecord> = BTreeMap::new();
    let mut previous_key: Option<SampleKey> = None;

    for (timestamp, event) in ordered {
        let stage = match event.stage {
            OrganicScanStage::Log => SampleStage::Log,
            OrganicScanStage::Sample => SampleStage::Sample,
            OrganicScanStage::Analyse => SampleStage::Analyse,
            OrganicScanStage::Unknown => {
                trace!(genus = %event.genus, "sample with unknown stage ignored");
                continue;
            },
        };

        let key = SampleKey::of(event);

        // starting on a different key interrupts every unfinished chain
        if previous_key.as_ref().is_some_and(|prev| *prev != key) {
            working.retain(|_, record| record.is_complete());
        }

        let stage = match (stage, working.get(&key).map(|record| record.stage)) {
            (SampleStage::Sample, Some(SampleStage::Sample | SampleStage::Sample2Plus)) => {
                SampleStage::Sample2Plus
            },
            (stage, _) => stage,
        };

        working.insert(
            key.clone(),
            SampleRecord {
                genus: event.genus.clone(),
                genus_name: event.genus_name.clone(),
                species: event.species.clone(),
                species_name: event.species_name.clone(),
                stage,
                timestamp: *timestamp,
            },
        );
        previous_key = Some(key);
    }

    working.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(genus: &str, species: &str, stage: OrganicScanStage) -> OrganicScanEvent {
        OrganicScanEvent {
            stage,
            genus: genus.to_string(),
            genus_name: genus.to_string(),
            species: species.to_string(),
            species_name: species.to_string(),
            variant: None,
            system_address: Some(99),
            body_id: Some(4),
        }
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 12, minute, 0).unwrap()
    }

    fn half_past(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 12, minute, 30).unwrap()
    }

    #[test]
    fn test_complete_chain() {
        let batch = vec![
            (at(1), event("GenusA", "SpeciesX", OrganicScanStage::Log)),
            (at(2), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(3), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(4), event("GenusA", "SpeciesX", OrganicScanStage::Analyse)),
        ];

        let records = consolidate(&batch);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stage, SampleStage::Analyse);
        assert!(records[0].is_complete());
        assert_eq!(records[0].timestamp, at(4));
    }

    #[test]
    fn test_interrupting_key_purges_incomplete_chain() {
        // GenusB interrupts at t2.5; its own chain is then interrupted in
        // turn and never reaches Analyse, so only GenusA survives
        let batch = vec![
            (at(1), event("GenusA", "SpeciesX", OrganicScanStage::Log)),
            (at(2), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (half_past(2), event("GenusB", "SpeciesY", OrganicScanStage::Log)),
            (at(3), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(4), event("GenusA", "SpeciesX", OrganicScanStage::Analyse)),
        ];

        let records = consolidate(&batch);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].genus, "GenusA");
        assert_eq!(records[0].stage, SampleStage::Analyse);
    }

    #[test]
    fn test_unsorted_batch_is_replayed_in_time_order() {
        let batch = vec![
            (at(4), event("GenusA", "SpeciesX", OrganicScanStage::Analyse)),
            (at(1), event("GenusA", "SpeciesX", OrganicScanStage::Log)),
            (at(3), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(2), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
        ];

        let records = consolidate(&batch);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stage, SampleStage::Analyse);
    }

    #[test]
    fn test_consecutive_samples_collapse() {
        let batch = vec![
            (at(1), event("GenusA", "SpeciesX", OrganicScanStage::Log)),
            (at(2), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(3), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
        ];

        let records = consolidate(&batch);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stage, SampleStage::Sample2Plus);
    }

    #[test]
    fn test_in_progress_chain_survives_until_interrupted() {
        let batch = vec![
            (at(1), event("GenusA", "SpeciesX", OrganicScanStage::Log)),
            (at(2), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
        ];

        let records = consolidate(&batch);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stage, SampleStage::Sample);
        assert!(!records[0].is_complete());
    }

    #[test]
    fn test_completed_chain_survives_interruption() {
        let batch = vec![
            (at(1), event("GenusA", "SpeciesX", OrganicScanStage::Log)),
            (at(2), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(3), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(4), event("GenusA", "SpeciesX", OrganicScanStage::Analyse)),
            (at(5), event("GenusB", "SpeciesY", OrganicScanStage::Log)),
        ];

        let records = consolidate(&batch);
        assert_eq!(records.len(), 2);

        let a = records.iter().find(|r| r.genus == "GenusA").unwrap();
        let b = records.iter().find(|r| r.genus == "GenusB").unwrap();
        assert_eq!(a.stage, SampleStage::Analyse);
        assert_eq!(b.stage, SampleStage::Log);
    }

    #[test]
    fn test_aggregator_separates_locations() {
        let mut aggregator = OrganicAggregator::new();

        let mut elsewhere = event("GenusC", "SpeciesZ", OrganicScanStage::Log);
        elsewhere.body_id = Some(9);

        aggregator.observe(&event("GenusA", "SpeciesX", OrganicScanStage::Log), at(1));
        aggregator.observe(&elsewhere, at(2));

        assert_eq!(aggregator.locations().len(), 2);
        // the chain on body 9 does not interrupt the chain on body 4
        let here = aggregator.consolidated((Some(99), Some(4)));
        assert_eq!(here.len(), 1);
        assert_eq!(here[0].genus, "GenusA");
        assert_eq!(aggregator.all_consolidated().len(), 2);
    }

    #[test]
    fn test_same_key_reinterrupted_restarts() {
        // A interrupted by B, then A restarts from Log: the earlier partial
        // A chain must not leak into the restarted one
        let batch = vec![
            (at(1), event("GenusA", "SpeciesX", OrganicScanStage::Log)),
            (at(2), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(3), event("GenusB", "SpeciesY", OrganicScanStage::Log)),
            (at(4), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
            (at(5), event("GenusA", "SpeciesX", OrganicScanStage::Sample)),
        ];

        let records = consolidate(&batch);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].genus, "GenusA");
        assert_eq!(records[0].stage, SampleStage::Sample2Plus);
    }
}
