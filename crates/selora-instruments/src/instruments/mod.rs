//! Built-in screening instrument definitions.

pub mod gad7;
pub mod phq9;

use selora_core::models::assessment_type::ChoiceOption;

/// The four-point frequency options shared by the PHQ-9 and GAD-7
/// ("over the last two weeks, how often..."). Option ids are scoped to
/// the question so each submission is unambiguous.
pub(crate) fn frequency_options(question_id: &str) -> Vec<ChoiceOption> {
    [
        ("Not at all", 0.0),
        ("Several days", 1.0),
        ("More than half the days", 2.0),
        ("Nearly every day", 3.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, (text, value))| ChoiceOption {
        id: format!("{question_id}-{i}"),
        text: (*text).to_string(),
        value: *value,
    })
    .collect()
}
