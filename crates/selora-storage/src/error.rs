use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded { key: String },

    #[error("failed to save {key}: {reason}")]
    SaveFailed { key: String, reason: String },

    #[error("failed to load {key}: {reason}")]
    LoadFailed { key: String, reason: String },

    #[error("failed to delete {key}: {reason}")]
    DeleteFailed { key: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
