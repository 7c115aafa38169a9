//! Error types for mapty

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaptyError {
    // Model errors
    #[error("Invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    // Storage errors
    #[error("Storage unavailable at {location}: {source}")]
    StorageUnavailable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Saving disabled: workouts under key {key:?} could not be read this session")]
    ReadOnlySession { key: String },

    #[error("Invalid storage key {key:?}: use letters, digits, '-' or '_'")]
    InvalidStorageKey { key: String },

    #[error("Malformed data stored under key {key:?}: {source}")]
    MalformedStoredData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MaptyError>;
