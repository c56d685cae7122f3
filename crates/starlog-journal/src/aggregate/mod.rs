//! Incremental aggregators
//!
//! Some journal data only makes sense across records: signal sightings
//! repeat on every sensor sweep, and organic sampling arrives as a chain of
//! partial steps. The aggregators own the running collections for one
//! session and fold decoded events into them in arrival order; hosts get
//! owned snapshots, never references into live state.

pub mod organic;
pub mod signals;

pub use organic::{OrganicAggregator, SampleKey, SampleRecord, SampleStage};
pub use signals::{carrier_signal_ttl, SignalAggregator, SignalRecord, CARRIER_SIGNAL_TTL_DAYS};
