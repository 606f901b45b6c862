use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordinal severity classification attached to a score range. The derived
/// ordering (low < medium < high) is what overall-risk aggregation uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// How a scoring rule reduces its answers to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CalculationMethod {
    Sum,
    Average,
    WeightedSum,
    /// Delegates to a named formula registered with the analyzer.
    Custom,
}

/// A named formula that reduces a subset of answers to a numeric score and
/// a qualitative label.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringRule {
    pub id: String,
    pub name: String,
    pub method: CalculationMethod,
    /// The question ids this rule consumes, in order.
    pub question_ids: Vec<String>,
    /// Per-question weights for weighted-sum rules; missing entries weigh 1.
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    /// Formula identifier for [`CalculationMethod::Custom`].
    pub formula: Option<String>,
    /// Ordered, contiguous, non-overlapping. Validated once at bank load.
    pub ranges: Vec<ScoreRange>,
}

/// An inclusive score interval with its interpretation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub description: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl ScoreRange {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}
