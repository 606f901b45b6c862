use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no translation table loaded for fallback language '{0}'")]
    MissingFallbackTable(String),

    #[error("translation table for '{0}' is empty")]
    EmptyTranslationTable(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
