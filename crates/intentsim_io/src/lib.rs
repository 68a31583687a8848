//! # Intentsim IO
//!
//! Persistence layer for simulation output.
//!
//! This crate provides:
//! - Structured error handling with a custom error type
//! - JSON serialization helpers that reject blank input
//! - Run documents (config echo, time series, anomalies) and the
//!   directory-level run summary

/// Error types and result aliases for I/O operations
pub mod error;
/// Validated JSON serialization helpers
pub mod serialization;
/// Run document and run summary persistence
pub mod storage;

pub use error::{IoError, Result};
pub use serialization::{from_json, read_json_file, to_json_pretty, write_json_file};
pub use storage::{RunDocument, RunSummary};
