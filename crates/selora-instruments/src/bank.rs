use std::collections::{HashMap, HashSet};

use regex::Regex;

use selora_core::models::assessment_type::{AssessmentType, QuestionKind};
use selora_core::models::scoring::{CalculationMethod, ScoringRule};

use crate::error::BankError;
use crate::instruments;

/// Holds the immutable assessment type definitions. Construct, register
/// any external definitions, then call [`initialize`](Self::initialize)
/// once; after that the bank is sealed and read-only.
#[derive(Debug, Default)]
pub struct QuestionBank {
    types: HashMap<String, AssessmentType>,
    sealed: bool,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bank pre-loaded with the built-in screening instruments.
    pub fn builtin() -> Self {
        let mut bank = Self::new();
        // Built-in ids are distinct; registration cannot fail here.
        let _ = bank.register(instruments::phq9::definition());
        let _ = bank.register(instruments::gad7::definition());
        bank
    }

    /// Add an assessment type definition. Only permitted before
    /// [`initialize`](Self::initialize).
    pub fn register(&mut self, assessment_type: AssessmentType) -> Result<(), BankError> {
        if self.sealed {
            return Err(BankError::Sealed(assessment_type.id));
        }
        if self.types.contains_key(&assessment_type.id) {
            return Err(BankError::DuplicateAssessmentType(assessment_type.id));
        }
        self.types
            .insert(assessment_type.id.clone(), assessment_type);
        Ok(())
    }

    /// Validate every registered definition and seal the bank. Score
    /// ranges must be contiguous and non-overlapping, rule question ids
    /// must resolve, and text patterns must compile — checked once here,
    /// never per analysis.
    pub fn initialize(&mut self) -> Result<(), BankError> {
        for assessment_type in self.types.values() {
            validate_type(assessment_type)?;
        }
        self.sealed = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.sealed
    }

    pub fn get_assessment_type(&self, id: &str) -> Option<&AssessmentType> {
        self.types.get(id)
    }

    /// All registered types, ordered by id.
    pub fn assessment_types(&self) -> Vec<&AssessmentType> {
        let mut all: Vec<_> = self.types.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// A copy of the type with the given language's text overrides
    /// applied. Fields without an override keep the base text; an unknown
    /// language yields the base definition unchanged.
    pub fn get_localized_assessment_type(
        &self,
        id: &str,
        language: &str,
    ) -> Option<AssessmentType> {
        let mut localized = self.types.get(id)?.clone();
        let Some(translation) = localized.translations.get(language).cloned() else {
            return Some(localized);
        };

        if let Some(name) = translation.name {
            localized.name = name;
        }
        if let Some(description) = translation.description {
            localized.description = description;
        }
        if translation.instructions.is_some() {
            localized.instructions = translation.instructions;
        }
        if translation.disclaimer.is_some() {
            localized.disclaimer = translation.disclaimer;
        }

        for question in &mut localized.questions {
            let Some(qt) = translation.questions.get(&question.id) else {
                continue;
            };
            if let Some(text) = &qt.text {
                question.text = text.clone();
            }
            match &mut question.kind {
                QuestionKind::SingleChoice { options }
                | QuestionKind::MultipleChoice { options, .. } => {
                    for option in options {
                        if let Some(text) = qt.options.get(&option.id) {
                            option.text = text.clone();
                        }
                    }
                }
                _ => {}
            }
        }

        Some(localized)
    }
}

fn validate_type(assessment_type: &AssessmentType) -> Result<(), BankError> {
    let mut seen = HashSet::new();
    for question in &assessment_type.questions {
        if !seen.insert(question.id.as_str()) {
            return Err(BankError::DuplicateQuestionId {
                assessment_type_id: assessment_type.id.clone(),
                question_id: question.id.clone(),
            });
        }
        if let QuestionKind::Text {
            pattern: Some(pattern),
            ..
        } = &question.kind
        {
            Regex::new(pattern).map_err(|source| BankError::InvalidPattern {
                assessment_type_id: assessment_type.id.clone(),
                question_id: question.id.clone(),
                source,
            })?;
        }
    }

    for rule in &assessment_type.scoring_rules {
        validate_rule(assessment_type, rule, &seen)?;
    }
    Ok(())
}

fn validate_rule(
    assessment_type: &AssessmentType,
    rule: &ScoringRule,
    question_ids: &HashSet<&str>,
) -> Result<(), BankError> {
    for question_id in &rule.question_ids {
        if !question_ids.contains(question_id.as_str()) {
            return Err(BankError::UnknownQuestionInRule {
                assessment_type_id: assessment_type.id.clone(),
                rule_id: rule.id.clone(),
                question_id: question_id.clone(),
            });
        }
    }

    if rule.method == CalculationMethod::Custom && rule.formula.is_none() {
        return Err(BankError::MissingFormula {
            assessment_type_id: assessment_type.id.clone(),
            rule_id: rule.id.clone(),
        });
    }

    if rule.ranges.is_empty() {
        return Err(BankError::EmptyRanges {
            assessment_type_id: assessment_type.id.clone(),
            rule_id: rule.id.clone(),
        });
    }

    let mut ordered: Vec<_> = rule.ranges.iter().collect();
    ordered.sort_by(|a, b| a.min.total_cmp(&b.min));

    for range in &ordered {
        if range.min > range.max {
            return Err(BankError::InvertedRange {
                assessment_type_id: assessment_type.id.clone(),
                rule_id: rule.id.clone(),
                min: range.min,
                max: range.max,
            });
        }
    }

    for pair in ordered.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.min <= prev.max {
            return Err(BankError::OverlappingRanges {
                assessment_type_id: assessment_type.id.clone(),
                rule_id: rule.id.clone(),
                at: next.min,
            });
        }
        // Contiguous for unit-step scores: no hole wider than one point.
        if next.min - prev.max > 1.0 + 1e-9 {
            return Err(BankError::RangeGap {
                assessment_type_id: assessment_type.id.clone(),
                rule_id: rule.id.clone(),
                prev_max: prev.max,
                next_min: next.min,
            });
        }
    }

    Ok(())
}
