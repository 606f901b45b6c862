use std::collections::HashMap;

use selora_core::models::assessment_type::{AssessmentType, Question, QuestionKind};
use selora_core::models::scoring::{CalculationMethod, RiskLevel, ScoreRange, ScoringRule};

use super::frequency_options;

/// GAD-7: Generalized Anxiety Disorder scale, seven items.
/// Each item rated 0–3, total 0–21.
pub fn definition() -> AssessmentType {
    let items = [
        ("gad7-1", "Feeling nervous, anxious, or on edge"),
        ("gad7-2", "Not being able to stop or control worrying"),
        ("gad7-3", "Worrying too much about different things"),
        ("gad7-4", "Trouble relaxing"),
        ("gad7-5", "Being so restless that it is hard to sit still"),
        ("gad7-6", "Becoming easily annoyed or irritable"),
        ("gad7-7", "Feeling afraid, as if something awful might happen"),
    ];

    let questions: Vec<Question> = items
        .iter()
        .map(|(id, text)| Question {
            id: (*id).to_string(),
            text: (*text).to_string(),
            kind: QuestionKind::SingleChoice {
                options: frequency_options(id),
            },
            required: true,
            weight: None,
        })
        .collect();

    let ranges = vec![
        ScoreRange {
            min: 0.0,
            max: 4.0,
            label: "Minimal".to_string(),
            description: "Minimal or no anxiety symptoms.".to_string(),
            risk_level: RiskLevel::Low,
            recommendations: vec![
                "Maintain your current routines and self-care habits".to_string(),
            ],
        },
        ScoreRange {
            min: 5.0,
            max: 9.0,
            label: "Mild".to_string(),
            description: "Mild anxiety symptoms.".to_string(),
            risk_level: RiskLevel::Low,
            recommendations: vec![
                "Relaxation and breathing exercises can help with mild anxiety".to_string(),
                "Retake this screening in two weeks to track changes".to_string(),
            ],
        },
        ScoreRange {
            min: 10.0,
            max: 14.0,
            label: "Moderate".to_string(),
            description: "Moderate anxiety symptoms.".to_string(),
            risk_level: RiskLevel::Medium,
            recommendations: vec![
                "Consider speaking with a mental health professional".to_string(),
                "Retake this screening in two weeks to track changes".to_string(),
            ],
        },
        ScoreRange {
            min: 15.0,
            max: 21.0,
            label: "Severe".to_string(),
            description: "Severe anxiety symptoms.".to_string(),
            risk_level: RiskLevel::High,
            recommendations: vec![
                "Seek professional help as soon as possible".to_string(),
                "Share these results with a doctor or counselor".to_string(),
            ],
        },
    ];

    AssessmentType {
        id: "gad-7".to_string(),
        name: "GAD-7 Anxiety Screening".to_string(),
        description: "Seven-question screening for the presence and severity of generalized anxiety symptoms over the last two weeks.".to_string(),
        category: "anxiety".to_string(),
        estimated_minutes: 2,
        questions,
        scoring_rules: vec![ScoringRule {
            id: "gad7-total".to_string(),
            name: "GAD-7 Total Score".to_string(),
            method: CalculationMethod::Sum,
            question_ids: (1..=7).map(|n| format!("gad7-{n}")).collect(),
            weights: HashMap::new(),
            formula: None,
            ranges,
        }],
        instructions: Some(
            "Over the last two weeks, how often have you been bothered by the following problems?".to_string(),
        ),
        disclaimer: Some(
            "This is an informational screening tool, not a diagnosis. Only a qualified professional can diagnose an anxiety disorder.".to_string(),
        ),
        version: "1.0".to_string(),
        created_at: jiff::Timestamp::constant(1_717_200_000, 0),
        updated_at: jiff::Timestamp::constant(1_717_200_000, 0),
        translations: HashMap::new(),
    }
}
