use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::scoring::RiskLevel;
use super::session::AssessmentAnswer;

/// The outcome of one scoring rule applied to a completed session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleScore {
    pub value: f64,
    pub label: String,
    pub description: String,
    pub risk_level: RiskLevel,
}

/// The immutable output of scoring a completed session. Never mutated,
/// only deleted by explicit user action.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub session_id: Uuid,
    pub assessment_type_id: String,
    pub completed_at: jiff::Timestamp,
    /// Keyed by scoring rule id.
    pub scores: HashMap<String, RuleScore>,
    pub interpretation: String,
    /// Deduplicated, bounded length.
    pub recommendations: Vec<String>,
    /// Maximum severity across all rule results.
    pub risk_level: RiskLevel,
    pub language: String,
    pub total_time_spent_secs: u64,
    /// Full answer list, kept for audit and history.
    pub answers: Vec<AssessmentAnswer>,
}
