//! Answer validation.
//!
//! Pure and synchronous: the same (value, question) pair always yields
//! the same outcome. One entry point per question type, plus
//! [`validate_answer`] which applies the required rule and dispatches.

use regex::Regex;

use selora_core::models::assessment_type::{ChoiceOption, Question, QuestionKind};
use selora_core::models::session::AnswerValue;
use selora_core::models::validation::{ValidationCode, ValidationError};

/// Validate a submitted value against a question's constraints.
pub fn validate_answer(value: &AnswerValue, question: &Question) -> Result<(), ValidationError> {
    if value.is_empty() {
        if question.required {
            return Err(ValidationError::new(
                ValidationCode::FieldRequired,
                &question.id,
                format!("question '{}' requires an answer", question.id),
            ));
        }
        // An empty answer to an optional question needs no type check.
        return Ok(());
    }

    match &question.kind {
        QuestionKind::SingleChoice { options } => {
            validate_single_choice(value, &question.id, options)
        }
        QuestionKind::MultipleChoice {
            options,
            min_selections,
            max_selections,
        } => validate_multiple_choice(
            value,
            &question.id,
            options,
            effective_min(*min_selections, question.required),
            *max_selections,
        ),
        QuestionKind::Scale { min, max, step, .. } => {
            validate_scale(value, &question.id, *min, *max, *step)
        }
        QuestionKind::Text {
            min_length,
            max_length,
            pattern,
        } => validate_text(
            value,
            &question.id,
            *min_length,
            *max_length,
            pattern.as_deref(),
        ),
        QuestionKind::Number {
            min,
            max,
            integer_only,
        } => validate_number(value, &question.id, *min, *max, *integer_only),
        QuestionKind::Date { min, max } => validate_date(value, &question.id, *min, *max),
    }
}

/// Minimum selection count: defaults to 1 for required questions.
fn effective_min(min_selections: Option<usize>, required: bool) -> usize {
    min_selections.unwrap_or(usize::from(required))
}

/// Accepts either an option id or an option's raw numeric value.
pub fn validate_single_choice(
    value: &AnswerValue,
    question_id: &str,
    options: &[ChoiceOption],
) -> Result<(), ValidationError> {
    let matched = match value {
        AnswerValue::Number(n) => options.iter().any(|o| o.value == *n),
        AnswerValue::Text(id) => options.iter().any(|o| o.id == *id),
        AnswerValue::Selection(_) => false,
    };
    if matched {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::SingleChoiceInvalidOption,
            question_id,
            format!("answer for '{question_id}' matches no option id or value"),
        ))
    }
}

/// Accepts an array of option ids, bounded by the selection counts.
pub fn validate_multiple_choice(
    value: &AnswerValue,
    question_id: &str,
    options: &[ChoiceOption],
    min_selections: usize,
    max_selections: Option<usize>,
) -> Result<(), ValidationError> {
    let Some(selected) = value.as_selection() else {
        return Err(ValidationError::new(
            ValidationCode::TypeMismatch,
            question_id,
            format!("answer for '{question_id}' must be a list of option ids"),
        ));
    };

    if selected.len() < min_selections {
        return Err(ValidationError::new(
            ValidationCode::MultipleChoiceMinSelections,
            question_id,
            format!(
                "'{question_id}' needs at least {min_selections} selection(s), got {}",
                selected.len()
            ),
        ));
    }
    if let Some(max) = max_selections
        && selected.len() > max
    {
        return Err(ValidationError::new(
            ValidationCode::MultipleChoiceMaxSelections,
            question_id,
            format!(
                "'{question_id}' allows at most {max} selection(s), got {}",
                selected.len()
            ),
        ));
    }

    let invalid: Vec<&str> = selected
        .iter()
        .filter(|id| !options.iter().any(|o| o.id == **id))
        .map(|id| id.as_str())
        .collect();
    if !invalid.is_empty() {
        return Err(ValidationError::new(
            ValidationCode::MultipleChoiceInvalidOptions,
            question_id,
            format!(
                "'{question_id}' received unknown option id(s): {}",
                invalid.join(", ")
            ),
        ));
    }
    Ok(())
}

pub fn validate_scale(
    value: &AnswerValue,
    question_id: &str,
    min: f64,
    max: f64,
    step: Option<f64>,
) -> Result<(), ValidationError> {
    let Some(n) = value.as_number() else {
        return Err(ValidationError::new(
            ValidationCode::TypeMismatch,
            question_id,
            format!("answer for '{question_id}' must be numeric"),
        ));
    };
    if n < min || n > max {
        return Err(ValidationError::new(
            ValidationCode::ScaleOutOfRange,
            question_id,
            format!("'{question_id}' value {n} is outside [{min}, {max}]"),
        ));
    }
    if let Some(step) = step {
        let remainder = (n - min) % step;
        // Floating point tolerance on step alignment.
        if remainder > 1e-9 && (step - remainder) > 1e-9 {
            return Err(ValidationError::new(
                ValidationCode::ScaleStepMismatch,
                question_id,
                format!("'{question_id}' value {n} is not aligned to step {step}"),
            ));
        }
    }
    Ok(())
}

pub fn validate_text(
    value: &AnswerValue,
    question_id: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&str>,
) -> Result<(), ValidationError> {
    let Some(text) = value.as_text() else {
        return Err(ValidationError::new(
            ValidationCode::TypeMismatch,
            question_id,
            format!("answer for '{question_id}' must be text"),
        ));
    };
    let length = text.chars().count();
    if let Some(min) = min_length
        && length < min
    {
        return Err(ValidationError::new(
            ValidationCode::TextTooShort,
            question_id,
            format!("'{question_id}' needs at least {min} characters, got {length}"),
        ));
    }
    if let Some(max) = max_length
        && length > max
    {
        return Err(ValidationError::new(
            ValidationCode::TextTooLong,
            question_id,
            format!("'{question_id}' allows at most {max} characters, got {length}"),
        ));
    }
    if let Some(pattern) = pattern {
        // Patterns are compile-checked at bank load; an invalid pattern
        // here still fails deterministically.
        let matched = Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false);
        if !matched {
            return Err(ValidationError::new(
                ValidationCode::TextPatternMismatch,
                question_id,
                format!("'{question_id}' does not match the expected pattern"),
            ));
        }
    }
    Ok(())
}

pub fn validate_number(
    value: &AnswerValue,
    question_id: &str,
    min: Option<f64>,
    max: Option<f64>,
    integer_only: bool,
) -> Result<(), ValidationError> {
    let Some(n) = value.as_number() else {
        return Err(ValidationError::new(
            ValidationCode::TypeMismatch,
            question_id,
            format!("answer for '{question_id}' must be numeric"),
        ));
    };
    if !n.is_finite() {
        return Err(ValidationError::new(
            ValidationCode::TypeMismatch,
            question_id,
            format!("answer for '{question_id}' must be a finite number"),
        ));
    }
    if integer_only && n.fract() != 0.0 {
        return Err(ValidationError::new(
            ValidationCode::NumberNotInteger,
            question_id,
            format!("'{question_id}' value {n} must be a whole number"),
        ));
    }
    if let Some(min) = min
        && n < min
    {
        return Err(ValidationError::new(
            ValidationCode::NumberOutOfRange,
            question_id,
            format!("'{question_id}' value {n} is below the minimum {min}"),
        ));
    }
    if let Some(max) = max
        && n > max
    {
        return Err(ValidationError::new(
            ValidationCode::NumberOutOfRange,
            question_id,
            format!("'{question_id}' value {n} is above the maximum {max}"),
        ));
    }
    Ok(())
}

pub fn validate_date(
    value: &AnswerValue,
    question_id: &str,
    min: Option<jiff::civil::Date>,
    max: Option<jiff::civil::Date>,
) -> Result<(), ValidationError> {
    let Some(text) = value.as_text() else {
        return Err(ValidationError::new(
            ValidationCode::DateInvalid,
            question_id,
            format!("answer for '{question_id}' must be a date string"),
        ));
    };
    let Ok(date) = text.parse::<jiff::civil::Date>() else {
        return Err(ValidationError::new(
            ValidationCode::DateInvalid,
            question_id,
            format!("'{question_id}' value '{text}' is not a valid date"),
        ));
    };
    if let Some(min) = min
        && date < min
    {
        return Err(ValidationError::new(
            ValidationCode::DateOutOfRange,
            question_id,
            format!("'{question_id}' date {date} is before {min}"),
        ));
    }
    if let Some(max) = max
        && date > max
    {
        return Err(ValidationError::new(
            ValidationCode::DateOutOfRange,
            question_id,
            format!("'{question_id}' date {date} is after {max}"),
        ));
    }
    Ok(())
}
