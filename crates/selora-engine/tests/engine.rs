use std::sync::Arc;

use uuid::Uuid;

use selora_core::models::session::{AnswerValue, SessionStatus};
use selora_core::models::scoring::RiskLevel;
use selora_engine::{AssessmentEngine, EngineConfig, EngineError, Severity, default_translations};
use selora_instruments::QuestionBank;
use selora_storage::SessionStore;

fn engine() -> AssessmentEngine {
    let mut bank = QuestionBank::builtin();
    bank.initialize().unwrap();
    AssessmentEngine::new(
        Arc::new(bank),
        Arc::new(SessionStore::in_memory()),
        Arc::new(default_translations()),
        EngineConfig::default(),
    )
}

async fn answer_all_phq9(engine: &AssessmentEngine, session_id: Uuid, value: f64) -> selora_engine::SubmitOutcome {
    let mut last = None;
    for n in 1..=9 {
        let outcome = engine
            .submit_answer(session_id, &format!("phq9-{n}"), AnswerValue::Number(value))
            .await
            .unwrap();
        last = Some(outcome);
    }
    last.unwrap()
}

#[tokio::test]
async fn start_assessment_creates_an_active_session_at_question_zero() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.current_question_index, 0);
    assert_eq!(session.assessment_type_id, "phq-9");
    assert!(session.answers.is_empty());

    let current = engine.current_question(session.id).await.unwrap().unwrap();
    assert_eq!(current.id, "phq9-1");
}

#[tokio::test]
async fn start_assessment_with_unknown_type_fails() {
    let engine = engine();
    let err = engine.start_assessment("phq-99", Some("en")).await.unwrap_err();
    assert!(matches!(err, EngineError::AssessmentTypeNotFound { .. }));
    assert!(err.recoverable());
}

#[tokio::test]
async fn submitting_one_answer_advances_the_pointer() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    let outcome = engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Number(1.0))
        .await
        .unwrap();
    assert_eq!(outcome.session.current_question_index, 1);
    assert_eq!(outcome.session.answers.len(), 1);
    assert!(outcome.result.is_none());

    let current = engine.current_question(session.id).await.unwrap().unwrap();
    assert_eq!(current.id, "phq9-2");
}

#[tokio::test]
async fn completing_all_nine_answers_scores_mild_low() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    let outcome = answer_all_phq9(&engine, session.id, 1.0).await;
    assert_eq!(outcome.session.status, SessionStatus::Completed);
    assert_eq!(outcome.session.current_question_index, 9);

    let result = outcome.result.expect("completion produces a result");
    let score = &result.scores["phq9-total"];
    assert_eq!(score.value, 9.0);
    assert_eq!(score.label, "Mild");
    assert_eq!(result.risk_level, RiskLevel::Low);

    // The result is persisted, retrievable by id and by session.
    let fetched = engine.get_result(result.id).await.unwrap().unwrap();
    assert_eq!(fetched.session_id, session.id);
    let by_session = engine.results_for_session(session.id).await.unwrap();
    assert_eq!(by_session.len(), 1);

    // No question is current once the session is finished.
    assert!(engine.current_question(session.id).await.unwrap().is_none());
}

#[tokio::test]
async fn all_twos_score_moderately_severe_medium() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    let outcome = answer_all_phq9(&engine, session.id, 2.0).await;

    let result = outcome.result.unwrap();
    let score = &result.scores["phq9-total"];
    assert_eq!(score.value, 18.0);
    assert_eq!(score.label, "Moderately Severe");
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[tokio::test]
async fn all_maximum_answers_score_severe_high() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    let outcome = answer_all_phq9(&engine, session.id, 3.0).await;

    let result = outcome.result.unwrap();
    let score = &result.scores["phq9-total"];
    assert_eq!(score.value, 27.0);
    assert_eq!(score.label, "Severe");
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(result.recommendations.len() <= 8);
}

#[tokio::test]
async fn resubmitting_a_question_replaces_the_answer() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Number(1.0))
        .await
        .unwrap();
    let outcome = engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Number(3.0))
        .await
        .unwrap();

    assert_eq!(outcome.session.answers.len(), 1);
    assert_eq!(outcome.session.answers[0].value, AnswerValue::Number(3.0));
    // The pointer never moves backwards on a revisit.
    assert_eq!(outcome.session.current_question_index, 1);
}

#[tokio::test]
async fn answers_accept_option_ids_as_well_as_values() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    // "phq9-1-2" is the option with value 2.
    engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Text("phq9-1-2".to_string()))
        .await
        .unwrap();
    for n in 2..=9 {
        engine
            .submit_answer(session.id, &format!("phq9-{n}"), AnswerValue::Number(2.0))
            .await
            .unwrap();
    }

    let results = engine.results_for_session(session.id).await.unwrap();
    assert_eq!(results[0].scores["phq9-total"].value, 18.0);
}

#[tokio::test]
async fn invalid_answer_leaves_the_session_untouched() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    let err = engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Number(7.0))
        .await
        .unwrap_err();
    match &err {
        EngineError::AnswerValidationFailed { error, .. } => {
            assert_eq!(error.question_id, "phq9-1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.severity(), Severity::Low);
    assert!(err.recoverable());

    let reloaded = engine.get_session(session.id).await.unwrap();
    assert_eq!(reloaded.current_question_index, 0);
    assert!(reloaded.answers.is_empty());
    assert_eq!(reloaded.status, SessionStatus::Active);
}

#[tokio::test]
async fn unknown_question_and_session_are_typed_errors() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    let err = engine
        .submit_answer(session.id, "phq9-42", AnswerValue::Number(1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::QuestionNotFound { .. }));

    let err = engine
        .submit_answer(Uuid::new_v4(), "phq9-1", AnswerValue::Number(1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionNotFound { .. }));
    assert_eq!(err.severity(), Severity::Medium);
}

#[test]
fn storage_failures_are_high_severity_and_quota_is_critical() {
    use selora_storage::error::StorageError;

    let quota = EngineError::Storage(StorageError::QuotaExceeded {
        key: "sessions/x.json".to_string(),
    });
    assert_eq!(quota.severity(), Severity::Critical);
    assert!(!quota.recoverable());

    let save = EngineError::Storage(StorageError::SaveFailed {
        key: "sessions/x.json".to_string(),
        reason: "io".to_string(),
    });
    assert_eq!(save.severity(), Severity::High);
    assert!(save.recoverable());
}

#[tokio::test]
async fn pause_and_resume_cycle_the_status() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    let paused = engine.pause_assessment(session.id).await.unwrap();
    assert_eq!(paused.status, SessionStatus::Paused);

    // Pausing again is a no-op.
    let paused_again = engine.pause_assessment(session.id).await.unwrap();
    assert_eq!(paused_again.status, SessionStatus::Paused);

    let resumed = engine.resume_assessment(session.id).await.unwrap();
    assert_eq!(resumed.status, SessionStatus::Active);
}

#[tokio::test]
async fn submitting_to_a_paused_session_resumes_it() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    engine.pause_assessment(session.id).await.unwrap();

    let outcome = engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Number(1.0))
        .await
        .unwrap();
    assert_eq!(outcome.session.status, SessionStatus::Active);
}

#[tokio::test]
async fn completed_sessions_accept_no_further_transitions() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    answer_all_phq9(&engine, session.id, 0.0).await;

    let err = engine.resume_assessment(session.id).await.unwrap_err();
    assert!(matches!(err, EngineError::SessionAlreadyCompleted { .. }));
    let err = engine.pause_assessment(session.id).await.unwrap_err();
    assert!(matches!(err, EngineError::SessionAlreadyCompleted { .. }));
    let err = engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Number(1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionAlreadyCompleted { .. }));
}

#[tokio::test]
async fn abandoned_sessions_are_terminal_but_listed() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();

    let abandoned = engine.abandon_assessment(session.id).await.unwrap();
    assert_eq!(abandoned.status, SessionStatus::Abandoned);

    let err = engine
        .submit_answer(session.id, "phq9-1", AnswerValue::Number(1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionNotActive { .. }));

    let all = engine.all_sessions().await.unwrap();
    assert_eq!(all.len(), 1);
    let active = engine.active_sessions().await.unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn active_sessions_include_paused_ones() {
    let engine = engine();
    let a = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    let b = engine.start_assessment("gad-7", Some("en")).await.unwrap();
    engine.pause_assessment(b.id).await.unwrap();

    let active = engine.active_sessions().await.unwrap();
    assert_eq!(active.len(), 2);

    let paused = engine
        .sessions_with_status(SessionStatus::Paused)
        .await
        .unwrap();
    assert_eq!(paused.len(), 1);
    assert_eq!(paused[0].id, b.id);
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn current_question_is_localized_for_the_session_language() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("es")).await.unwrap();

    let current = engine.current_question(session.id).await.unwrap().unwrap();
    assert_eq!(current.text, "Poco interés o placer en hacer las cosas");
}

#[tokio::test]
async fn recompute_result_rebuilds_the_same_score() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    let outcome = answer_all_phq9(&engine, session.id, 2.0).await;
    let original = outcome.result.unwrap();

    let recomputed = engine.recompute_result(session.id).await.unwrap().unwrap();
    assert_ne!(recomputed.id, original.id);
    assert_eq!(
        recomputed.scores["phq9-total"].value,
        original.scores["phq9-total"].value
    );
}

#[tokio::test]
async fn recompute_on_an_active_session_is_none() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    assert!(engine.recompute_result(session.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_result_removes_only_that_record() {
    let engine = engine();
    let session = engine.start_assessment("phq-9", Some("en")).await.unwrap();
    let result = answer_all_phq9(&engine, session.id, 1.0).await.result.unwrap();

    assert!(engine.delete_result(result.id).await.unwrap());
    assert!(engine.get_result(result.id).await.unwrap().is_none());
    assert!(!engine.delete_result(result.id).await.unwrap());

    // The session record stays.
    assert!(engine.get_session(session.id).await.is_ok());
}
