use std::{io, path::Path};

use tokio::{
    fs::{self, OpenOptions},
    io::{AsyncWriteExt, BufWriter},
};

/// Append-only destination for normalized event lines.
///
/// One append per event. Implementations never rewrite or remove lines
/// already written; a failed append leaves the destination as it was.
#[allow(async_fn_in_trait)]
pub trait EventSink {
    async fn append(&mut self, line: &str) -> io::Result<()>;
}

/// Appends lines to a log file opened once per run.
#[derive(Debug)]
pub struct FileSink {
    writer: BufWriter<fs::File>,
}

impl FileSink {
    /// Opens the log file in create-and-append mode, creating parent
    /// directories as needed.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl EventSink for FileSink {
    async fn append(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_one_line_per_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");

        let mut sink = FileSink::open(&path).await.unwrap();
        sink.append("{\"id\":\"a\"}").await.unwrap();
        sink.append("{\"id\":\"b\"}").await.unwrap();
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"id\":\"a\"}\n{\"id\":\"b\"}\n");
    }

    #[tokio::test]
    async fn reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");

        let mut sink = FileSink::open(&path).await.unwrap();
        sink.append("first").await.unwrap();
        drop(sink);

        let mut sink = FileSink::open(&path).await.unwrap();
        sink.append("second").await.unwrap();
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/jumpcloud/events.log");

        let mut sink = FileSink::open(&path).await.unwrap();
        sink.append("line").await.unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "line\n");
    }
}
