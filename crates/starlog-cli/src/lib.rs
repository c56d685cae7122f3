//! Starlog CLI library
//!
//! Host-side plumbing the decode core deliberately does not own: journal
//! file discovery, line-by-line feeding in arrival order, side-car
//! resolution, and summary rendering. All file I/O lives here.

pub mod ingest;
pub mod summary;
