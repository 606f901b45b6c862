//! Results analysis.
//!
//! Reduces a completed session to an immutable result: one score per
//! scoring rule, a risk classification, interpretation text, and a
//! bounded recommendation list.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use selora_core::i18n::Translations;
use selora_core::keys::RecordKind;
use selora_core::models::assessment_type::{AssessmentType, Question, QuestionKind};
use selora_core::models::result::{AssessmentResult, RuleScore};
use selora_core::models::scoring::{CalculationMethod, RiskLevel, ScoreRange, ScoringRule};
use selora_core::models::session::{AnswerValue, AssessmentSession, SessionStatus};
use selora_instruments::QuestionBank;
use selora_storage::SessionStore;

use crate::error::EngineError;

/// A named custom scoring formula. Receives the answered values of the
/// rule's questions, in rule order.
pub type ScoreFormula = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

pub struct ResultsAnalyzer {
    bank: Arc<QuestionBank>,
    store: Arc<SessionStore>,
    translations: Arc<Translations>,
    formulas: HashMap<String, ScoreFormula>,
    max_recommendations: usize,
}

impl ResultsAnalyzer {
    pub fn new(
        bank: Arc<QuestionBank>,
        store: Arc<SessionStore>,
        translations: Arc<Translations>,
        max_recommendations: usize,
    ) -> Self {
        Self {
            bank,
            store,
            translations,
            formulas: HashMap::new(),
            max_recommendations,
        }
    }

    /// Register a formula for rules with `method = custom`. A rule naming
    /// an unregistered formula fails the analysis rather than guessing.
    pub fn register_formula(&mut self, name: impl Into<String>, formula: ScoreFormula) {
        self.formulas.insert(name.into(), formula);
    }

    /// Score a session. Returns `Ok(None)` for sessions that are not
    /// completed — analysis is only meaningful once they are. The result
    /// is persisted before it is returned.
    pub async fn analyze_session(
        &self,
        session: &AssessmentSession,
    ) -> Result<Option<AssessmentResult>, EngineError> {
        if session.status != SessionStatus::Completed {
            return Ok(None);
        }

        let assessment_type = self
            .bank
            .get_assessment_type(&session.assessment_type_id)
            .ok_or_else(|| EngineError::AssessmentTypeNotFound {
                assessment_type_id: session.assessment_type_id.clone(),
            })?;

        let mut scores = HashMap::new();
        let mut interpretations = Vec::new();
        let mut recommendations = Vec::new();
        let mut overall_risk = RiskLevel::Low;

        for rule in &assessment_type.scoring_rules {
            let value = self.compute_score(assessment_type, rule, session)?;
            let Some(range) = classify(rule, value) else {
                warn!(rule_id = %rule.id, "rule has no score ranges, skipping");
                continue;
            };
            overall_risk = overall_risk.max(range.risk_level);

            interpretations.push(self.translations.t_with(
                &session.language,
                "interpretation.summary",
                &[
                    ("name", &rule.name),
                    ("score", &format_score(value)),
                    ("label", &range.label),
                    ("description", &range.description),
                ],
            ));
            recommendations.extend(range.recommendations.iter().cloned());

            scores.insert(
                rule.id.clone(),
                RuleScore {
                    value,
                    label: range.label.clone(),
                    description: range.description.clone(),
                    risk_level: range.risk_level,
                },
            );
        }

        recommendations.push(self.translations.t(
            &session.language,
            &format!("guidance.{}", overall_risk.as_str()),
        ));

        let result = AssessmentResult {
            id: Uuid::new_v4(),
            session_id: session.id,
            assessment_type_id: session.assessment_type_id.clone(),
            completed_at: jiff::Timestamp::now(),
            scores,
            interpretation: interpretations.join(" "),
            recommendations: dedupe_capped(recommendations, self.max_recommendations),
            risk_level: overall_risk,
            language: session.language.clone(),
            total_time_spent_secs: session.time_spent_secs,
            answers: session.answers.clone(),
        };

        self.store
            .save(RecordKind::Result, &result, Some(result.id.to_string()))
            .await?;
        info!(
            result_id = %result.id,
            session_id = %session.id,
            risk = %result.risk_level.as_str(),
            "assessment result persisted"
        );
        Ok(Some(result))
    }

    /// Gather answered values for the rule's questions and reduce them.
    /// Missing or non-numeric answers are skipped with a warning; they
    /// never fail the whole analysis.
    fn compute_score(
        &self,
        assessment_type: &AssessmentType,
        rule: &ScoringRule,
        session: &AssessmentSession,
    ) -> Result<f64, EngineError> {
        let mut answered: Vec<(&Question, f64)> = Vec::new();
        for question_id in &rule.question_ids {
            let Some(question) = assessment_type.question(question_id) else {
                warn!(rule_id = %rule.id, question_id = %question_id, "rule references unknown question, skipping");
                continue;
            };
            let Some(answer) = session.answer_for(question_id) else {
                warn!(session_id = %session.id, question_id = %question_id, "unanswered question skipped in scoring");
                continue;
            };
            match numeric_value(question, &answer.value) {
                Some(value) => answered.push((question, value)),
                None => {
                    warn!(session_id = %session.id, question_id = %question_id, "non-numeric answer skipped in scoring");
                }
            }
        }

        let score = match rule.method {
            CalculationMethod::Sum => answered.iter().map(|(_, v)| v).sum(),
            CalculationMethod::Average => {
                // Unanswered questions are excluded from the denominator.
                if answered.is_empty() {
                    warn!(rule_id = %rule.id, "no answered questions for average rule, scoring 0");
                    0.0
                } else {
                    answered.iter().map(|(_, v)| v).sum::<f64>() / answered.len() as f64
                }
            }
            CalculationMethod::WeightedSum => answered
                .iter()
                .map(|(question, value)| value * weight_for(rule, question))
                .sum(),
            CalculationMethod::Custom => {
                let formula_name = rule.formula.as_deref().unwrap_or_default();
                let formula = self.formulas.get(formula_name).ok_or_else(|| {
                    EngineError::UnknownFormula {
                        rule_id: rule.id.clone(),
                        formula: formula_name.to_string(),
                    }
                })?;
                let values: Vec<f64> = answered.iter().map(|(_, v)| *v).collect();
                formula(&values)
            }
        };
        Ok(score)
    }
}

/// Weight precedence: the rule's weight map, then the question's own
/// weight, then 1.
fn weight_for(rule: &ScoringRule, question: &Question) -> f64 {
    rule.weights
        .get(&question.id)
        .copied()
        .or(question.weight)
        .unwrap_or(1.0)
}

/// The numeric contribution of an answer. Choice answers contribute the
/// option's value (never its id); multiple selections sum their option
/// values; text and date answers have none.
fn numeric_value(question: &Question, value: &AnswerValue) -> Option<f64> {
    match &question.kind {
        QuestionKind::SingleChoice { options } => match value {
            AnswerValue::Number(n) => options.iter().find(|o| o.value == *n).map(|o| o.value),
            AnswerValue::Text(id) => options.iter().find(|o| o.id == *id).map(|o| o.value),
            AnswerValue::Selection(_) => None,
        },
        QuestionKind::MultipleChoice { options, .. } => value.as_selection().map(|ids| {
            ids.iter()
                .filter_map(|id| options.iter().find(|o| o.id == *id).map(|o| o.value))
                .sum()
        }),
        QuestionKind::Scale { .. } | QuestionKind::Number { .. } => value.as_number(),
        QuestionKind::Text { .. } | QuestionKind::Date { .. } => None,
    }
}

/// Map a score to its range. Ranges are contiguous and non-overlapping by
/// bank validation; a score beyond either end clamps to the nearest range.
fn classify(rule: &ScoringRule, score: f64) -> Option<&ScoreRange> {
    if let Some(range) = rule.ranges.iter().find(|r| r.contains(score)) {
        return Some(range);
    }
    let mut ordered: Vec<&ScoreRange> = rule.ranges.iter().collect();
    ordered.sort_by(|a, b| a.min.total_cmp(&b.min));
    let (first, last) = (*ordered.first()?, *ordered.last()?);
    warn!(rule_id = %rule.id, score, "score outside all ranges, clamping to nearest");
    Some(if score < first.min { first } else { last })
}

fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Deduplicate by exact string equality, preserving order, then truncate.
fn dedupe_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<String> = items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect();
    out.truncate(cap);
    out
}
