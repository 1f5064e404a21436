use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ExtractedRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn record_path(data_dir: &Path, subject: &str) -> PathBuf {
    data_dir.join(format!("{}.json", subject))
}

/// Writes one subject's record as pretty-printed JSON, creating the data
/// directory if needed. Returns the path written to.
pub fn save_record(
    data_dir: &Path,
    subject: &str,
    record: &ExtractedRecord,
) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(data_dir).map_err(|source| StoreError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let path = record_path(data_dir, subject);
    let json = serde_json::to_string_pretty(record).map_err(StoreError::Encode)?;
    fs::write(&path, json).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

pub fn load_record(data_dir: &Path, subject: &str) -> Result<ExtractedRecord, StoreError> {
    let path = record_path(data_dir, subject);
    let json = fs::read_to_string(&path).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|source| StoreError::Decode { path, source })
}
