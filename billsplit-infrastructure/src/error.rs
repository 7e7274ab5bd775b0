use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("item {item}: quantity times unit price is out of range")]
    AmountOverflow { item: String },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
