//! Starlog Journal Library
//!
//! Decode-and-normalize engine for a game's telemetry journal: an
//! append-only stream of heterogeneous, semi-structured event records that
//! have drifted across many years of format revisions.
//!
//! # Layers
//!
//! - **Field extraction** ([`record`], [`fields`]): null-safe, type-coercing
//!   accessors with alias chains and legacy-encoding tolerance
//! - **Localization** ([`localize`]): non-empty display strings, synthesized
//!   from identifiers when the localised text is missing
//! - **Classifiers** ([`classify`]): noisy source strings into closed
//!   domain vocabularies
//! - **Dispatch** ([`dispatch`], [`events`]): discriminator → typed decoder,
//!   with a generic passthrough for unknown kinds
//! - **Aggregators** ([`aggregate`]): signal dedupe and organic sample
//!   staging over ordered event sequences
//! - **Pipeline** ([`pipeline`]): the strictly sequential fold tying it all
//!   together
//!
//! # Example
//!
//! ```
//! use starlog_journal::Pipeline;
//!
//! let mut pipeline = Pipeline::new();
//! let event = pipeline
//!     .ingest_line(r#"{"timestamp":"2024-01-05T12:00:00Z","event":"FSDJump","StarSystem":"Sol","JumpDist":8.2}"#)
//!     .unwrap();
//! assert_eq!(event.seq, 0);
//! ```

pub mod aggregate;
pub mod classify;
pub mod dispatch;
pub mod events;
pub mod fields;
pub mod localize;
pub mod pipeline;
pub mod record;

// Re-export the entry points most hosts need
pub use events::{DecodedEvent, EventPayload};
pub use pipeline::Pipeline;
pub use record::RawRecord;
