use selora_core::models::assessment_type::{ChoiceOption, Question, QuestionKind};
use selora_core::models::session::AnswerValue;
use selora_core::models::validation::ValidationCode;
use selora_engine::validate::validate_answer;

fn options(question_id: &str, count: usize) -> Vec<ChoiceOption> {
    (0..count)
        .map(|i| ChoiceOption {
            id: format!("{question_id}-{i}"),
            text: format!("Option {i}"),
            value: i as f64,
        })
        .collect()
}

fn question(id: &str, kind: QuestionKind, required: bool) -> Question {
    Question {
        id: id.to_string(),
        text: "test".to_string(),
        kind,
        required,
        weight: None,
    }
}

fn single_choice(id: &str) -> Question {
    question(id, QuestionKind::SingleChoice { options: options(id, 4) }, true)
}

fn multiple_choice(id: &str, min: Option<usize>, max: Option<usize>) -> Question {
    question(
        id,
        QuestionKind::MultipleChoice {
            options: options(id, 4),
            min_selections: min,
            max_selections: max,
        },
        true,
    )
}

fn code_of(result: Result<(), selora_core::models::validation::ValidationError>) -> ValidationCode {
    result.unwrap_err().code
}

fn selection(ids: &[&str]) -> AnswerValue {
    AnswerValue::Selection(ids.iter().map(|s| s.to_string()).collect())
}

#[test]
fn required_question_rejects_empty_values() {
    let q = single_choice("q1");
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text(String::new()), &q)),
        ValidationCode::FieldRequired
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Selection(Vec::new()), &q)),
        ValidationCode::FieldRequired
    );
}

#[test]
fn optional_question_accepts_empty_value() {
    let q = question(
        "q1",
        QuestionKind::Text {
            min_length: Some(5),
            max_length: None,
            pattern: None,
        },
        false,
    );
    // Empty optional answers skip the type-specific constraints.
    assert!(validate_answer(&AnswerValue::Text(String::new()), &q).is_ok());
}

#[test]
fn single_choice_accepts_option_id_and_raw_value_equivalently() {
    let q = single_choice("q1");
    for i in 0..4 {
        let by_id = validate_answer(&AnswerValue::Text(format!("q1-{i}")), &q);
        let by_value = validate_answer(&AnswerValue::Number(i as f64), &q);
        assert!(by_id.is_ok());
        assert!(by_value.is_ok());
    }
}

#[test]
fn single_choice_rejects_unknown_values() {
    let q = single_choice("q1");
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Number(7.0), &q)),
        ValidationCode::SingleChoiceInvalidOption
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("q2-0".to_string()), &q)),
        ValidationCode::SingleChoiceInvalidOption
    );
}

#[test]
fn multiple_choice_enforces_selection_bounds() {
    let q = multiple_choice("q1", Some(1), Some(2));

    assert_eq!(
        code_of(validate_answer(&selection(&[]), &q)),
        ValidationCode::FieldRequired
    );
    assert!(validate_answer(&selection(&["q1-0"]), &q).is_ok());
    assert!(validate_answer(&selection(&["q1-0", "q1-2"]), &q).is_ok());
    assert_eq!(
        code_of(validate_answer(&selection(&["q1-0", "q1-1", "q1-2"]), &q)),
        ValidationCode::MultipleChoiceMaxSelections
    );
}

#[test]
fn multiple_choice_min_selections_applies_beyond_required_default() {
    let q = multiple_choice("q1", Some(2), None);
    assert_eq!(
        code_of(validate_answer(&selection(&["q1-0"]), &q)),
        ValidationCode::MultipleChoiceMinSelections
    );
    assert!(validate_answer(&selection(&["q1-0", "q1-1"]), &q).is_ok());
}

#[test]
fn multiple_choice_rejects_unknown_option_ids() {
    let q = multiple_choice("q1", Some(1), None);
    assert_eq!(
        code_of(validate_answer(&selection(&["q1-0", "nope"]), &q)),
        ValidationCode::MultipleChoiceInvalidOptions
    );
}

#[test]
fn scale_enforces_range_and_step() {
    let q = question(
        "q1",
        QuestionKind::Scale {
            min: 1.0,
            max: 5.0,
            step: Some(0.5),
            labels: None,
        },
        true,
    );
    assert!(validate_answer(&AnswerValue::Number(3.5), &q).is_ok());
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Number(6.0), &q)),
        ValidationCode::ScaleOutOfRange
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Number(3.25), &q)),
        ValidationCode::ScaleStepMismatch
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("three".to_string()), &q)),
        ValidationCode::TypeMismatch
    );
}

#[test]
fn text_enforces_length_and_pattern() {
    let q = question(
        "q1",
        QuestionKind::Text {
            min_length: Some(3),
            max_length: Some(8),
            pattern: Some("^[a-z]+$".to_string()),
        },
        true,
    );
    assert!(validate_answer(&AnswerValue::Text("hello".to_string()), &q).is_ok());
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("hi".to_string()), &q)),
        ValidationCode::TextTooShort
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("muchtoolong".to_string()), &q)),
        ValidationCode::TextTooLong
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("HELLO".to_string()), &q)),
        ValidationCode::TextPatternMismatch
    );
}

#[test]
fn number_enforces_bounds_and_integer_flag() {
    let q = question(
        "q1",
        QuestionKind::Number {
            min: Some(0.0),
            max: Some(120.0),
            integer_only: true,
        },
        true,
    );
    assert!(validate_answer(&AnswerValue::Number(42.0), &q).is_ok());
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Number(130.0), &q)),
        ValidationCode::NumberOutOfRange
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Number(-1.0), &q)),
        ValidationCode::NumberOutOfRange
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Number(4.5), &q)),
        ValidationCode::NumberNotInteger
    );
}

#[test]
fn date_enforces_parseability_and_bounds() {
    let q = question(
        "q1",
        QuestionKind::Date {
            min: Some(jiff::civil::date(2020, 1, 1)),
            max: Some(jiff::civil::date(2025, 12, 31)),
        },
        true,
    );
    assert!(validate_answer(&AnswerValue::Text("2023-06-15".to_string()), &q).is_ok());
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("not-a-date".to_string()), &q)),
        ValidationCode::DateInvalid
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("2019-12-31".to_string()), &q)),
        ValidationCode::DateOutOfRange
    );
    assert_eq!(
        code_of(validate_answer(&AnswerValue::Text("2026-01-01".to_string()), &q)),
        ValidationCode::DateOutOfRange
    );
}

#[test]
fn validation_is_deterministic_for_the_same_input() {
    let q = single_choice("q1");
    let value = AnswerValue::Number(7.0);
    let first = validate_answer(&value, &q).unwrap_err();
    let second = validate_answer(&value, &q).unwrap_err();
    assert_eq!(first.code, second.code);
    assert_eq!(first.message, second.message);
}
