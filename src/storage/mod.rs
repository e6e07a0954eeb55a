//! Storage module for callscribe
//!
//! Persists analysis results to an append-only CSV log.

mod log_store;
mod models;

pub use log_store::{LogStore, LogStoreError};
pub use models::{LogRecord, HEADER, TIMESTAMP_FORMAT};
