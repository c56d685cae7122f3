//! Sequential ingestion pipeline
//!
//! Records are folded strictly in arrival order: each one is fully decoded
//! and applied to aggregator state before the next is read. The `&mut self`
//! receiver is the whole concurrency story — there is no interior locking
//! and no reordering, because staging and expiry logic depend on arrival
//! order.

use serde_json::Value;
use tracing::debug;

use starlog_common::types::{IngestStats, SessionInfo};
use starlog_common::Result;

use crate::aggregate::{OrganicAggregator, SignalAggregator};
use crate::dispatch;
use crate::events::{DecodedEvent, EventPayload};
use crate::record::RawRecord;

/// One commander's ingestion session: sequence numbering, statistics, and
/// the live aggregator state.
#[derive(Debug)]
pub struct Pipeline {
    session: SessionInfo,
    next_seq: u64,
    stats: IngestStats,
    signals: SignalAggregator,
    organics: OrganicAggregator,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            session: SessionInfo::new(),
            next_seq: 0,
            stats: IngestStats::new(),
            signals: SignalAggregator::new(),
            organics: OrganicAggregator::new(),
        }
    }

    pub fn session(&self) -> &SessionInfo {
        &self.session
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Live signal aggregate. Snapshot methods hand out owned copies.
    pub fn signals(&self) -> &SignalAggregator {
        &self.signals
    }

    /// Live organic-sample aggregate.
    pub fn organics(&self) -> &OrganicAggregator {
        &self.organics
    }

    /// Ingest one journal line.
    ///
    /// A structurally invalid line is counted, skipped, and reported as an
    /// error — for that record only. The pipeline stays usable; the host
    /// moves on to the next line.
    pub fn ingest_line(&mut self, line: &str) -> Result<DecodedEvent> {
        self.stats.records_read += 1;
        match RawRecord::from_line(line) {
            Ok(record) => Ok(self.fold(record)),
            Err(error) => {
                self.stats.skipped += 1;
                debug!(%error, "skipping invalid record");
                Err(error)
            },
        }
    }

    /// Ingest one already-parsed JSON value (side-car merges arrive here).
    pub fn ingest_value(&mut self, value: Value) -> Result<DecodedEvent> {
        self.stats.records_read += 1;
        match RawRecord::from_value(value) {
            Ok(record) => Ok(self.fold(record)),
            Err(error) => {
                self.stats.skipped += 1;
                debug!(%error, "skipping invalid record");
                Err(error)
            },
        }
    }

    /// Decode, assign the sequence identity, and fold into aggregate state.
    fn fold(&mut self, record: RawRecord) -> DecodedEvent {
        let payload = dispatch::decode(&record);
        let timestamp = record.timestamp();

        let seq = self.next_seq;
        self.next_seq += 1;
        self.stats.decoded += 1;

        match &payload {
            EventPayload::SignalDiscovered(event) => self.signals.observe(event, timestamp),
            EventPayload::OrganicScan(event) => self.organics.observe(event, timestamp),
            EventPayload::Unknown(generic) => {
                self.stats.unknown_events += 1;
                debug!(event = %generic.event, "no registered decoder; passing through");
            },
            _ => {},
        }

        if let Some(file) = payload.sidecar_file() {
            debug!(file, "embedded list absent; side-car merge required");
        }

        DecodedEvent {
            seq,
            timestamp,
            payload,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
