//! Common types shared between the decode core and its hosts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counters for one ingestion run.
///
/// Maintained by the pipeline as records are folded; hosts read them to
/// report "N entries could not be parsed and were skipped" without the core
/// ever aborting the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Raw lines/values offered to the pipeline
    pub records_read: u64,

    /// Records decoded into a typed event (including generic passthrough)
    pub decoded: u64,

    /// Structurally invalid records skipped
    pub skipped: u64,

    /// Records whose discriminator had no registered decoder
    pub unknown_events: u64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every offered record decoded cleanly
    pub fn is_clean(&self) -> bool {
        self.skipped == 0
    }

    /// Merge counters from another run (e.g. per-file stats into a total)
    pub fn absorb(&mut self, other: &IngestStats) {
        self.records_read += other.records_read;
        self.decoded += other.decoded;
        self.skipped += other.skipped;
        self.unknown_events += other.unknown_events;
    }
}

/// Identity of one ingestion session.
///
/// A session covers one commander's journal history fed in arrival order;
/// aggregator state never crosses a session boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Unique identifier for this run
    pub id: Uuid,

    /// When the session was opened
    pub started_at: DateTime<Utc>,
}

impl SessionInfo {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_absorb() {
        let mut total = IngestStats::new();
        let file_a = IngestStats {
            records_read: 10,
            decoded: 9,
            skipped: 1,
            unknown_events: 2,
        };
        let file_b = IngestStats {
            records_read: 5,
            decoded: 5,
            skipped: 0,
            unknown_events: 0,
        };

        total.absorb(&file_a);
        total.absorb(&file_b);

        assert_eq!(total.records_read, 15);
        assert_eq!(total.decoded, 14);
        assert_eq!(total.skipped, 1);
        assert_eq!(total.unknown_events, 2);
        assert!(!total.is_clean());
        assert!(file_b.is_clean());
    }
}
