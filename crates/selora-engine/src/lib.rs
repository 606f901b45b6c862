//! selora-engine
//!
//! The assessment state machine, answer validation, and results analysis.
//! Sessions are created, advanced, paused, and completed here; completed
//! sessions are scored into immutable results.

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod validate;

use std::collections::HashMap;

use selora_core::i18n::Translations;

pub use analyzer::ResultsAnalyzer;
pub use config::EngineConfig;
pub use engine::{AssessmentEngine, SubmitOutcome};
pub use error::{EngineError, Severity};

/// The built-in English translation table for interpretation labels and
/// generic risk guidance. Embedders with their own catalogs pass their
/// own [`Translations`] to the engine instead.
pub fn default_translations() -> Translations {
    let en: HashMap<String, String> = [
        ("risk.low", "Low risk"),
        ("risk.medium", "Medium risk"),
        ("risk.high", "High risk"),
        (
            "guidance.low",
            "Your responses suggest minimal concerns at this time",
        ),
        (
            "guidance.medium",
            "Consider discussing these results with a healthcare provider",
        ),
        (
            "guidance.high",
            "Please reach out to a healthcare provider or crisis line promptly",
        ),
        (
            "interpretation.summary",
            "{name}: you scored {score} ({label}). {description}",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let tables = HashMap::from([("en".to_string(), en)]);
    // The "en" table is present and non-empty by construction.
    Translations::new(tables, "en").expect("built-in translation table is valid")
}
