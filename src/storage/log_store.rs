//! Append-only CSV log of analyzed transcripts

use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use crate::analysis::Sentiment;
use crate::storage::models::{LogRecord, HEADER, TIMESTAMP_FORMAT};

#[derive(Error, Debug)]
pub enum LogStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected log header: {0}")]
    Header(String),

    #[error("Malformed log row at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Log task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Handle to the CSV analysis log.
///
/// Open once and share it; every read and write goes through the handle's
/// lock so concurrent requests never interleave partial rows.
pub struct LogStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LogStore {
    /// Open the log at `path`, creating it with a header row if it is
    /// missing or empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogStoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };
        store.ensure_header()?;

        tracing::debug!("Opened analysis log at {}", store.path.display());
        Ok(store)
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row in `Timestamp, Transcript, Summary, Sentiment` order.
    pub fn append(&self, record: &LogRecord) -> Result<(), LogStoreError> {
        let _guard = self.guard();

        // The file may have been removed since open; restore the header first.
        self.ensure_header_locked()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let timestamp = record.timestamp_string();
        writer.write_record([
            timestamp.as_str(),
            record.transcript.as_str(),
            record.summary.as_str(),
            record.sentiment.as_str(),
        ])?;
        writer.flush()?;

        Ok(())
    }

    /// Read every record in insertion order. A missing file yields no records.
    pub fn read_all(&self) -> Result<Vec<LogRecord>, LogStoreError> {
        let _guard = self.guard();

        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(HEADER.iter().copied()) {
            return Err(LogStoreError::Header(
                headers.iter().collect::<Vec<_>>().join(","),
            ));
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            records.push(parse_row(&row).map_err(|reason| LogStoreError::Parse { line, reason })?);
        }

        Ok(records)
    }

    /// Raw file contents, or `None` if the log does not exist.
    pub fn raw_bytes(&self) -> Result<Option<Vec<u8>>, LogStoreError> {
        let _guard = self.guard();

        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// `append` on the blocking pool; hands the record back once written.
    pub async fn append_async(
        self: &Arc<Self>,
        record: LogRecord,
    ) -> Result<LogRecord, LogStoreError> {
        self.run_blocking(move |store| store.append(&record).map(|()| record))
            .await
    }

    /// `read_all` on the blocking pool
    pub async fn read_all_async(self: &Arc<Self>) -> Result<Vec<LogRecord>, LogStoreError> {
        self.run_blocking(LogStore::read_all).await
    }

    /// `raw_bytes` on the blocking pool
    pub async fn raw_bytes_async(self: &Arc<Self>) -> Result<Option<Vec<u8>>, LogStoreError> {
        self.run_blocking(LogStore::raw_bytes).await
    }

    // File I/O and the lock wait stay off the async workers.
    async fn run_blocking<T, F>(self: &Arc<Self>, f: F) -> Result<T, LogStoreError>
    where
        F: FnOnce(&LogStore) -> Result<T, LogStoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || f(&store)).await?
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_header(&self) -> Result<(), LogStoreError> {
        let _guard = self.guard();
        self.ensure_header_locked()
    }

    fn ensure_header_locked(&self) -> Result<(), LogStoreError> {
        let is_empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if is_empty {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            let mut writer = csv::Writer::from_writer(file);
            writer.write_record(HEADER)?;
            writer.flush()?;
            tracing::info!("Created analysis log at {}", self.path.display());
        }

        Ok(())
    }
}

fn parse_row(row: &csv::StringRecord) -> Result<LogRecord, String> {
    if row.len() != HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            row.len()
        ));
    }

    let timestamp = NaiveDateTime::parse_from_str(&row[0], TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid timestamp '{}': {}", &row[0], e))?;

    let transcript = row[1].to_string();
    if transcript.trim().is_empty() {
        return Err("empty transcript".to_string());
    }

    let summary = row[2].to_string();
    if summary.trim().is_empty() {
        return Err("empty summary".to_string());
    }

    let sentiment = Sentiment::parse(&row[3])
        .ok_or_else(|| format!("unknown sentiment '{}'", &row[3]))?;

    Ok(LogRecord {
        timestamp,
        transcript,
        summary,
        sentiment,
    })
}
