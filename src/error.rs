// src/error.rs
use std::path::PathBuf;

/// Every failure the library can report.
///
/// Extraction never produces one of these: category rules degrade to a
/// partial payload instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{text}' does not match format '{format}'")]
    FormatMismatch { text: String, format: String },

    #[error("'{text}' is neither a canonical nor an ISO-8601 date")]
    DateFormat { text: String },

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(f64),

    #[error("fetching {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected page structure: {0}")]
    PageStructure(String),

    #[error("cache file {} is corrupt: {reason}", path.display())]
    CorruptCache { path: PathBuf, reason: String },

    #[error("could not persist cache to {}: {reason}", path.display())]
    Persist { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        Error::Fetch { url: s!(url), reason: reason.to_string() }
    }
}
