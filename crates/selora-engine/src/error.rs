use thiserror::Error;
use uuid::Uuid;

use selora_core::models::validation::ValidationError;
use selora_storage::error::StorageError;

/// How badly an engine failure hurts. Critical failures should halt
/// further session mutation; everything else is retryable or a caller
/// mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown assessment type: {assessment_type_id}")]
    AssessmentTypeNotFound { assessment_type_id: String },

    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: Uuid },

    #[error("session {session_id} is already completed")]
    SessionAlreadyCompleted { session_id: Uuid },

    #[error("session {session_id} is {status} and cannot be mutated")]
    SessionNotActive { session_id: Uuid, status: String },

    #[error("question '{question_id}' not found in session {session_id}")]
    QuestionNotFound {
        session_id: Uuid,
        question_id: String,
    },

    #[error("answer validation failed for session {session_id}: {error}")]
    AnswerValidationFailed {
        session_id: Uuid,
        #[source]
        error: ValidationError,
    },

    #[error("rule '{rule_id}' names unknown formula '{formula}'")]
    UnknownFormula { rule_id: String, formula: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl EngineError {
    pub fn severity(&self) -> Severity {
        match self {
            EngineError::AnswerValidationFailed { .. } => Severity::Low,
            EngineError::SessionAlreadyCompleted { .. }
            | EngineError::SessionNotActive { .. } => Severity::Low,
            EngineError::SessionNotFound { .. }
            | EngineError::QuestionNotFound { .. }
            | EngineError::AssessmentTypeNotFound { .. } => Severity::Medium,
            EngineError::UnknownFormula { .. } => Severity::High,
            EngineError::Storage(StorageError::QuotaExceeded { .. }) => Severity::Critical,
            EngineError::Storage(_) => Severity::High,
        }
    }

    /// Whether the caller can sensibly retry or re-prompt. Non-recoverable
    /// errors should route the user to a fallback path instead of silently
    /// losing answers.
    pub fn recoverable(&self) -> bool {
        !matches!(
            self,
            EngineError::Storage(StorageError::QuotaExceeded { .. })
        )
    }
}
