use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole view request. Per-row problems never end up here, they are logged
/// and skipped by the reader and the normalizer.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The log could not be read at all. Kept distinct from an empty log so that callers can tell
    /// "no activity on this day" apart from "there is no log".
    #[error("activity log {path:?} is unavailable: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration file {path:?} is not valid")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ViewError {
    pub fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
