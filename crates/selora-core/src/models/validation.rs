use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Machine-readable code for a failed answer validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ValidationCode {
    FieldRequired,
    TypeMismatch,
    SingleChoiceInvalidOption,
    MultipleChoiceMinSelections,
    MultipleChoiceMaxSelections,
    MultipleChoiceInvalidOptions,
    ScaleOutOfRange,
    ScaleStepMismatch,
    TextTooShort,
    TextTooLong,
    TextPatternMismatch,
    NumberOutOfRange,
    NumberNotInteger,
    DateInvalid,
    DateOutOfRange,
}

/// A single-answer validation failure. Recoverable by re-prompting the
/// same question; never fatal to the session.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub code: ValidationCode,
    pub question_id: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: ValidationCode, question_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            question_id: question_id.into(),
            message: message.into(),
        }
    }
}
