use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Session state machine: active → paused → active, active → completed,
/// active/paused → abandoned. Completed and abandoned are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Active,
    Paused,
    Completed,
    Abandoned,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Abandoned)
    }
}

/// A submitted answer value. The shape depends on the question type:
/// numbers for scale/number and single-choice-by-value, strings for
/// text/date and single-choice-by-id, string arrays for multiple choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Selection(Vec<String>),
}

impl AnswerValue {
    /// Empty in the required-field sense: blank string or empty array.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Number(_) => false,
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Selection(items) => items.is_empty(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Selection(items) => Some(items),
            _ => None,
        }
    }
}

/// One recorded answer. A session holds at most one per question id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentAnswer {
    pub question_id: String,
    pub value: AnswerValue,
    pub answered_at: jiff::Timestamp,
}

/// The mutable record of one user's run through one assessment type.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentSession {
    pub id: Uuid,
    pub assessment_type_id: String,
    pub started_at: jiff::Timestamp,
    /// 0-based pointer into the assessment type's question order. Always
    /// within [0, questions.len()]; equals questions.len() only once the
    /// session completes.
    pub current_question_index: usize,
    pub answers: Vec<AssessmentAnswer>,
    pub status: SessionStatus,
    pub language: String,
    /// Seconds spent while the session was active.
    pub time_spent_secs: u64,
    pub last_activity_at: jiff::Timestamp,
}

impl AssessmentSession {
    pub fn answer_for(&self, question_id: &str) -> Option<&AssessmentAnswer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    pub fn has_answer(&self, question_id: &str) -> bool {
        self.answer_for(question_id).is_some()
    }

    /// Replace the answer for this question id if present, else append.
    pub fn upsert_answer(&mut self, answer: AssessmentAnswer) {
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }
}
