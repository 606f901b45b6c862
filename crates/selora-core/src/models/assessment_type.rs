use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::scoring::ScoringRule;

/// The reusable definition of one questionnaire: questions plus scoring
/// rules. Immutable after the question bank is initialized.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub estimated_minutes: u32,
    pub questions: Vec<Question>,
    pub scoring_rules: Vec<ScoringRule>,
    pub instructions: Option<String>,
    pub disclaimer: Option<String>,
    pub version: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    /// Per-language text overrides, keyed by language code.
    #[serde(default)]
    pub translations: HashMap<String, AssessmentTranslation>,
}

impl AssessmentType {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_index(&self, question_id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }
}

/// One question within an assessment type.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    /// Unique within its assessment type.
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    pub required: bool,
    /// Optional scoring weight, consumed by weighted-sum rules.
    pub weight: Option<f64>,
}

/// Type-specific constraints for a question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionKind {
    SingleChoice {
        options: Vec<ChoiceOption>,
    },
    MultipleChoice {
        options: Vec<ChoiceOption>,
        min_selections: Option<usize>,
        max_selections: Option<usize>,
    },
    Scale {
        min: f64,
        max: f64,
        step: Option<f64>,
        labels: Option<ScaleLabels>,
    },
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<String>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer_only: bool,
    },
    Date {
        min: Option<jiff::civil::Date>,
        max: Option<jiff::civil::Date>,
    },
}

/// An option of a choice question. `value` is the numeric contribution to
/// scoring; `id` is what the UI submits.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
    pub value: f64,
}

/// End labels displayed on a scale question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleLabels {
    pub min_label: Option<String>,
    pub max_label: Option<String>,
}

/// Per-language overrides for an assessment type. Absent fields fall back
/// to the base text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentTranslation {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub disclaimer: Option<String>,
    /// Keyed by question id.
    #[serde(default)]
    pub questions: HashMap<String, QuestionTranslation>,
}

/// Per-language overrides for one question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionTranslation {
    pub text: Option<String>,
    /// Localized option text, keyed by option id.
    #[serde(default)]
    pub options: HashMap<String, String>,
}
