use std::{io, path::PathBuf};

use jumpcloud::JumpCloudError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShipperError {
    #[error("failed to read config file (path={path:?}): {source}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("config file is not valid JSON (path={path:?}): {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("fetching events failed: {0}")]
    Fetch(#[from] JumpCloudError),
    #[error("failed to open log file (path={path:?}): {source}")]
    OpenSink { path: PathBuf, source: io::Error },
    #[error("failed to encode cursor state: {0}")]
    EncodeCursor(#[source] serde_json::Error),
    #[error("failed to persist cursor (path={path:?}): {source}")]
    PersistCursor { path: PathBuf, source: io::Error },
}
