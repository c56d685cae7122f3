//! Starlog Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the Starlog workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all Starlog members:
//!
//! - **Error Handling**: the `JournalError` taxonomy and result alias
//! - **Logging**: tracing subscriber configuration for hosts
//! - **Checksums**: journal-file identity via SHA-256
//! - **Types**: ingestion statistics and session identity
//!
//! # Example
//!
//! ```no_run
//! use starlog_common::{JournalError, Result};
//! use starlog_common::checksum::file_checksum;
//!
//! fn already_seen(path: &str, seen: &[String]) -> Result<bool> {
//!     let id = file_checksum(path)?;
//!     Ok(seen.iter().any(|s| s == &id))
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{JournalError, Result};
