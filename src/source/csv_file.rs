use std::path::{Path, PathBuf};

use fs4::tokio::AsyncFileExt;
use tokio::{fs::File, io::AsyncReadExt};
use tracing::{debug, warn};

use crate::error::ViewError;

use super::{EventSource, RawEvent};

/// Columns every log has to provide. `additional_info` is optional.
const REQUIRED_COLUMNS: [&str; 3] = ["timestamp", "title", "process_id"];

/// The main realization of [EventSource]. Reads a CSV log written by the tracker.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(path: &Path) -> Result<Vec<u8>, std::io::Error> {
        debug!("Reading {path:?}");
        let mut file = File::open(path).await?;
        // The tracker may be appending while we read.
        file.lock_shared()?;
        let mut buffer = Vec::new();
        let result = file.read_to_end(&mut buffer).await;
        file.unlock_async().await?;
        result?;
        Ok(buffer)
    }
}

impl EventSource for CsvFileSource {
    async fn load(&self) -> Result<Vec<RawEvent>, ViewError> {
        let data = Self::read_all(&self.path)
            .await
            .map_err(|e| ViewError::source_unavailable(&self.path, e))?;
        parse_csv(&data).map_err(|reason| ViewError::source_unavailable(&self.path, reason))
    }
}

/// Parses a whole log. A broken header makes the log unusable, broken rows are only skipped.
pub fn parse_csv(data: &[u8]) -> Result<Vec<RawEvent>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        // Row fields are matched against header names, both sides must see the same names.
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| format!("unreadable header: {e}"))?
        .clone();

    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err("log has no header row".into());
    }
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(format!("header is missing column `{column}`"));
        }
    }

    let mut events = vec![];
    let mut skipped = 0usize;
    for (index, row) in reader.deserialize::<RawEvent>().enumerate() {
        match row {
            Ok(v) => events.push(v),
            Err(e) => {
                skipped += 1;
                // The header is line 1.
                warn!("Skipping malformed log row {}: {e}", index + 2);
            }
        }
    }
    debug!("Read {} rows, skipped {skipped}", events.len());
    Ok(events)
}
