use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("duplicate assessment type: {0}")]
    DuplicateAssessmentType(String),

    #[error("bank is sealed; cannot register '{0}' after initialize()")]
    Sealed(String),

    #[error("rule '{rule_id}' in '{assessment_type_id}' references unknown question '{question_id}'")]
    UnknownQuestionInRule {
        assessment_type_id: String,
        rule_id: String,
        question_id: String,
    },

    #[error("rule '{rule_id}' in '{assessment_type_id}' has no score ranges")]
    EmptyRanges {
        assessment_type_id: String,
        rule_id: String,
    },

    #[error(
        "rule '{rule_id}' in '{assessment_type_id}' has an inverted range [{min}, {max}]"
    )]
    InvertedRange {
        assessment_type_id: String,
        rule_id: String,
        min: f64,
        max: f64,
    },

    #[error(
        "rule '{rule_id}' in '{assessment_type_id}' has overlapping ranges at score {at}"
    )]
    OverlappingRanges {
        assessment_type_id: String,
        rule_id: String,
        at: f64,
    },

    #[error("rule '{rule_id}' in '{assessment_type_id}' has a gap between {prev_max} and {next_min}")]
    RangeGap {
        assessment_type_id: String,
        rule_id: String,
        prev_max: f64,
        next_min: f64,
    },

    #[error("custom rule '{rule_id}' in '{assessment_type_id}' names no formula")]
    MissingFormula {
        assessment_type_id: String,
        rule_id: String,
    },

    #[error("question '{question_id}' in '{assessment_type_id}' has an invalid text pattern: {source}")]
    InvalidPattern {
        assessment_type_id: String,
        question_id: String,
        #[source]
        source: regex::Error,
    },

    #[error("question '{question_id}' in '{assessment_type_id}' duplicates an earlier question id")]
    DuplicateQuestionId {
        assessment_type_id: String,
        question_id: String,
    },
}
