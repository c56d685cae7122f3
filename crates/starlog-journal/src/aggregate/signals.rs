//! Signal discovery merge
//!
//! Every sensor sweep re-reports every signal in range, so the raw stream
//! is mostly duplicates. The aggregator keeps the first sighting of each
//! identity and ignores the rest; a sighting is "the same signal" exactly
//! when its identity tuple matches.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::classify::{SignalClass, UssType};
use crate::events::SignalDiscoveredEvent;

/// Override expiry window for carrier-classified signals, in days.
///
/// Carrier identities come from a name heuristic, not an authoritative
/// expiry field; any reported remaining time on them is noise. Carriers
/// persist for days, so they get a fixed window from first sighting.
pub const CARRIER_SIGNAL_TTL_DAYS: i64 = 7;

/// The carrier override window as a [`Duration`].
pub fn carrier_signal_ttl() -> Duration {
    Duration::days(CARRIER_SIGNAL_TTL_DAYS)
}

/// One deduplicated signal sighting.
///
/// Identity is (name, faction, state, uss_type, threat, classification)
/// plus, for non-carrier classes, the expiry instant. Records are created
/// on first sighting and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRecord {
    pub name: String,
    pub display_name: String,
    pub spawning_faction: Option<String>,
    pub spawning_state: Option<String>,
    pub uss_type: Option<UssType>,
    pub threat_level: u32,
    pub classification: SignalClass,
    pub first_seen: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SignalRecord {
    fn from_event(event: &SignalDiscoveredEvent, timestamp: DateTime<Utc>) -> Self {
        let expires_at = if event.classification.is_carrier() {
            Some(timestamp + carrier_signal_ttl())
        } else {
            event
                .seconds_remaining
                .map(|seconds| timestamp + Duration::milliseconds((seconds * 1000.0) as i64))
        };

        Self {
            name: event.name.clone(),
            display_name: event.display_name.clone(),
            spawning_faction: event.spawning_faction.clone(),
            spawning_state: event.spawning_state.clone(),
            uss_type: event.uss_type,
            threat_level: event.threat_level,
            classification: event.classification,
            first_seen: timestamp,
            expires_at,
        }
    }

    /// Structural equality over the identity tuple.
    ///
    /// Carrier expiries are synthetic, so they are excluded from carrier
    /// identity; re-sighting the same carrier hours later is still the same
    /// signal.
    fn same_identity(&self, other: &SignalRecord) -> bool {
        let core = self.name == other.name
            && self.spawning_faction == other.spawning_faction
            && self.spawning_state == other.spawning_state
            && self.uss_type == other.uss_type
            && self.threat_level == other.threat_level
            && self.classification == other.classification;

        if self.classification.is_carrier() {
            core
        } else {
            core && self.expires_at == other.expires_at
        }
    }

    /// True when the record has outlived its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// Keyed append-or-ignore merge over signal sightings.
#[derive(Debug, Default)]
pub struct SignalAggregator {
    signals: Vec<SignalRecord>,
}

impl SignalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sighting in. The first sighting of an identity wins;
    /// later equal sightings are discarded without mutation.
    pub fn observe(&mut self, event: &SignalDiscoveredEvent, timestamp: DateTime<Utc>) {
        let candidate = SignalRecord::from_event(event, timestamp);

        if self
            .signals
            .iter()
            .any(|existing| existing.same_identity(&candidate))
        {
            tracing::trace!(name = %candidate.name, "duplicate signal sighting ignored");
            return;
        }

        self.signals.push(candidate);
    }

    /// Number of distinct signals seen.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Owned snapshot of every distinct signal, in first-sighting order.
    pub fn snapshot(&self) -> Vec<SignalRecord> {
        self.signals.clone()
    }

    /// Owned snapshot of signals not yet expired at `now`.
    pub fn live(&self, now: DateTime<Utc>) -> Vec<SignalRecord> {
        self.signals
            .iter()
            .filter(|record| !record.is_expired(now))
            .cloned()
            .collect()
    }
}
