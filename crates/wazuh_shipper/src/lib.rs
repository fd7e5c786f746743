#![forbid(unsafe_code)]
//! One-shot shipper from JumpCloud Directory Insights to a Wazuh-ingested
//! log file.
//!
//! A run reads the persisted cursor, fetches one page of events at or after
//! it, normalizes each event into a single tagged JSON line, appends the
//! lines to the log, and finally advances the cursor one second past the
//! newest timestamp seen. The cursor is only rewritten after the write pass,
//! so a crash anywhere earlier re-fetches the same window on the next run.
//!
//! Runs must not overlap; scheduling (cron or similar) is expected to keep
//! invocations single-instance.

mod config;
mod cursor;
mod error;
mod normalize;
mod run;
mod sink;

pub use config::ConfigFile;
pub use cursor::{CursorStore, DEFAULT_LOOKBACK};
pub use error::ShipperError;
pub use normalize::{normalize, NormalizedRecord};
pub use run::{run_once, EventSource, RunOutcome};
pub use sink::{EventSink, FileSink};
