use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::cursor::{CursorStore, DEFAULT_LOOKBACK};
use crate::error::ShipperError;

/// Connection parameters and the polling cursor, stored as one JSON file.
///
/// Read once at startup, rewritten once at run end. `last` is absent until
/// the first successful run with events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last: Option<OffsetDateTime>,
    #[serde(skip)]
    path: PathBuf,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShipperError> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| ShipperError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_json::from_slice(&contents).map_err(|source| ShipperError::ParseConfig {
                path: path.to_path_buf(),
                source,
            })?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the whole file through a temp file in the same directory and
    /// an atomic rename, so a crash mid-update leaves the previous contents
    /// intact.
    fn write_atomically(&self) -> Result<(), ShipperError> {
        let body = serde_json::to_vec_pretty(self).map_err(ShipperError::EncodeCursor)?;
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file =
            tempfile::NamedTempFile::new_in(dir).map_err(|source| ShipperError::PersistCursor {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(&body)
            .map_err(|source| ShipperError::PersistCursor {
                path: self.path.clone(),
                source,
            })?;
        file.persist(&self.path)
            .map_err(|err| ShipperError::PersistCursor {
                path: self.path.clone(),
                source: err.error,
            })?;
        Ok(())
    }
}

impl CursorStore for ConfigFile {
    fn last_time(&self) -> OffsetDateTime {
        self.last
            .unwrap_or_else(|| OffsetDateTime::now_utc() - DEFAULT_LOOKBACK)
    }

    fn update_last(&mut self, t: OffsetDateTime) -> Result<(), ShipperError> {
        self.last = Some(t);
        self.write_atomically()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("config.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_connection_parameters_and_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{
                "api_key": "this-is-not-a-real-key",
                "base_url": "https://api.jumpcloud.com",
                "last": "2023-04-01T12:00:00Z"
            }"#,
        );

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.api_key, "this-is-not-a-real-key");
        assert_eq!(config.base_url.as_deref(), Some("https://api.jumpcloud.com"));
        assert_eq!(config.org_id, None);
        assert_eq!(config.last, Some(datetime!(2023-04-01 12:00:00 UTC)));
        assert_eq!(config.path(), path);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigFile::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ShipperError::ReadConfig { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "{not json");
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ShipperError::ParseConfig { .. }));
    }

    #[test]
    fn first_run_defaults_to_the_lookback_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"api_key": "k"}"#);
        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.last, None);

        let before = OffsetDateTime::now_utc() - DEFAULT_LOOKBACK;
        let got = config.last_time();
        let after = OffsetDateTime::now_utc() - DEFAULT_LOOKBACK;
        assert!(got >= before && got <= after);
    }

    #[test]
    fn update_last_persists_across_reload_and_keeps_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{"api_key": "k", "base_url": "https://example.test", "org_id": "org-9"}"#,
        );

        let mut config = ConfigFile::load(&path).unwrap();
        let cursor = datetime!(2023-04-01 12:00:06 UTC);
        config.update_last(cursor).unwrap();

        let reloaded = ConfigFile::load(&path).unwrap();
        assert_eq!(reloaded.last, Some(cursor));
        assert_eq!(reloaded.api_key, "k");
        assert_eq!(reloaded.base_url.as_deref(), Some("https://example.test"));
        assert_eq!(reloaded.org_id.as_deref(), Some("org-9"));
        assert_eq!(reloaded.last_time(), cursor);
    }
}
