use std::collections::HashMap;

use selora_core::models::assessment_type::{
    AssessmentTranslation, AssessmentType, Question, QuestionKind, QuestionTranslation,
};
use selora_core::models::scoring::{CalculationMethod, RiskLevel, ScoreRange, ScoringRule};

use super::frequency_options;

/// PHQ-9: Patient Health Questionnaire, nine items.
/// Each item rated 0–3, total 0–27.
pub fn definition() -> AssessmentType {
    let items = [
        ("phq9-1", "Little interest or pleasure in doing things"),
        ("phq9-2", "Feeling down, depressed, or hopeless"),
        (
            "phq9-3",
            "Trouble falling or staying asleep, or sleeping too much",
        ),
        ("phq9-4", "Feeling tired or having little energy"),
        ("phq9-5", "Poor appetite or overeating"),
        (
            "phq9-6",
            "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
        ),
        (
            "phq9-7",
            "Trouble concentrating on things, such as reading the newspaper or watching television",
        ),
        (
            "phq9-8",
            "Moving or speaking so slowly that other people could have noticed, or the opposite, being so fidgety or restless that you have been moving around a lot more than usual",
        ),
        (
            "phq9-9",
            "Thoughts that you would be better off dead, or of hurting yourself in some way",
        ),
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
            description: "Minimal or no depressive symptoms.".to_string(),
            risk_level: RiskLevel::Low,
            recommendations: vec![
                "Maintain your current routines and self-care habits".to_string(),
                "Check in with yourself again in a few weeks".to_string(),
            ],
        },
        ScoreRange {
            min: 5.0,
            max: 9.0,
            label: "Mild".to_string(),
            description: "Mild depressive symptoms.".to_string(),
            risk_level: RiskLevel::Low,
            recommendations: vec![
                "Consider regular physical activity and a consistent sleep schedule".to_string(),
                "Talk with someone you trust about how you have been feeling".to_string(),
                "Retake this screening in two weeks to track changes".to_string(),
            ],
        },
        ScoreRange {
            min: 10.0,
            max: 14.0,
            label: "Moderate".to_string(),
            description: "Moderate depressive symptoms.".to_string(),
            risk_level: RiskLevel::Medium,
            recommendations: vec![
                "Consider speaking with a mental health professional".to_string(),
                "Structured self-help programs can be effective at this level".to_string(),
                "Retake this screening in two weeks to track changes".to_string(),
            ],
        },
        ScoreRange {
            min: 15.0,
            max: 19.0,
            label: "Moderately Severe".to_string(),
            description: "Moderately severe depressive symptoms.".to_string(),
            risk_level: RiskLevel::Medium,
            recommendations: vec![
                "Speak with a mental health professional soon".to_string(),
                "Share these results with a doctor or counselor".to_string(),
            ],
        },
        ScoreRange {
            min: 20.0,
            max: 27.0,
            label: "Severe".to_string(),
            description: "Severe depressive symptoms.".to_string(),
            risk_level: RiskLevel::High,
            recommendations: vec![
                "Seek professional help as soon as possible".to_string(),
                "Share these results with a doctor or counselor".to_string(),
                "If you have thoughts of harming yourself, contact a crisis line immediately"
                    .to_string(),
            ],
        },
    ];

    AssessmentType {
        id: "phq-9".to_string(),
        name: "PHQ-9 Depression Screening".to_string(),
        description: "Nine-question screening for the presence and severity of depressive symptoms over the last two weeks.".to_string(),
        category: "depression".to_string(),
        estimated_minutes: 3,
        questions,
        scoring_rules: vec![ScoringRule {
            id: "phq9-total".to_string(),
            name: "PHQ-9 Total Score".to_string(),
            method: CalculationMethod::Sum,
            question_ids: (1..=9).map(|n| format!("phq9-{n}")).collect(),
            weights: HashMap::new(),
            formula: None,
            ranges,
        }],
        instructions: Some(
            "Over the last two weeks, how often have you been bothered by any of the following problems?".to_string(),
        ),
        disclaimer: Some(
            "This is an informational screening tool, not a diagnosis. Only a qualified professional can diagnose depression.".to_string(),
        ),
        version: "1.0".to_string(),
        created_at: jiff::Timestamp::constant(1_717_200_000, 0),
        updated_at: jiff::Timestamp::constant(1_717_200_000, 0),
        translations: spanish_translation(),
    }
}

fn spanish_translation() -> HashMap<String, AssessmentTranslation> {
    let items = [
        ("phq9-1", "Poco interés o placer en hacer las cosas"),
        ("phq9-2", "Se ha sentido decaído(a), deprimido(a) o sin esperanzas"),
        (
            "phq9-3",
            "Dificultad para dormir o permanecer dormido(a), o ha dormido demasiado",
        ),
        ("phq9-4", "Se ha sentido cansado(a) o con poca energía"),
        ("phq9-5", "Sin apetito o ha comido en exceso"),
        (
            "phq9-6",
            "Se ha sentido mal con usted mismo(a), o que es un fracaso, o que ha quedado mal con su familia",
        ),
        (
            "phq9-7",
            "Dificultad para concentrarse en cosas tales como leer el periódico o ver televisión",
        ),
        (
            "phq9-8",
            "Se ha movido o hablado tan lento que otras personas podrían haberlo notado, o lo contrario, ha estado tan inquieto(a) que se ha movido mucho más de lo normal",
        ),
        (
            "phq9-9",
            "Pensamientos de que estaría mejor muerto(a) o de lastimarse de alguna manera",
        ),
    ];
    let option_labels = [
        "Ningún día",
        "Varios días",
        "Más de la mitad de los días",
        "Casi todos los días",
    ];

    let questions = items
        .iter()
        .map(|(id, text)| {
            let options = option_labels
                .iter()
                .enumerate()
                .map(|(i, label)| (format!("{id}-{i}"), (*label).to_string()))
                .collect();
            (
                (*id).to_string(),
                QuestionTranslation {
                    text: Some((*text).to_string()),
                    options,
                },
            )
        })
        .collect();

    HashMap::from([(
        "es".to_string(),
        AssessmentTranslation {
            name: Some("Cuestionario de salud del paciente (PHQ-9)".to_string()),
            description: Some(
                "Nueve preguntas para detectar la presencia y gravedad de síntomas depresivos durante las últimas dos semanas.".to_string(),
            ),
            instructions: Some(
                "Durante las últimas dos semanas, ¿con qué frecuencia le han molestado los siguientes problemas?".to_string(),
            ),
            disclaimer: Some(
                "Esta es una herramienta informativa de detección, no un diagnóstico.".to_string(),
            ),
            questions,
        },
    )])
}
