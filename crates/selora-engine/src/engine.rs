//! The assessment session state machine.
//!
//! Every operation loads the session, applies one transition, and
//! persists before returning. Callers must await each mutation before
//! issuing the next one for the same session; the engine does not
//! serialize concurrent calls on one session id.

use std::sync::Arc;

use jiff::Timestamp;
use tracing::info;
use uuid::Uuid;

use selora_core::i18n::Translations;
use selora_core::keys::RecordKind;
use selora_core::models::assessment_type::{AssessmentType, Question};
use selora_core::models::result::AssessmentResult;
use selora_core::models::session::{
    AnswerValue, AssessmentAnswer, AssessmentSession, SessionStatus,
};
use selora_instruments::QuestionBank;
use selora_storage::SessionStore;

use crate::analyzer::{ResultsAnalyzer, ScoreFormula};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::validate;

/// What a successful answer submission produced: the updated session,
/// and the result when this submission completed it.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub session: AssessmentSession,
    pub result: Option<AssessmentResult>,
}

pub struct AssessmentEngine {
    bank: Arc<QuestionBank>,
    store: Arc<SessionStore>,
    analyzer: ResultsAnalyzer,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(
        bank: Arc<QuestionBank>,
        store: Arc<SessionStore>,
        translations: Arc<Translations>,
        config: EngineConfig,
    ) -> Self {
        let analyzer = ResultsAnalyzer::new(
            Arc::clone(&bank),
            Arc::clone(&store),
            translations,
            config.max_recommendations,
        );
        Self {
            bank,
            store,
            analyzer,
            config,
        }
    }

    /// Register a custom scoring formula with the analyzer.
    pub fn register_formula(&mut self, name: impl Into<String>, formula: ScoreFormula) {
        self.analyzer.register_formula(name, formula);
    }

    /// Create and persist a new active session for the given assessment
    /// type.
    pub async fn start_assessment(
        &self,
        assessment_type_id: &str,
        language: Option<&str>,
    ) -> Result<AssessmentSession, EngineError> {
        if self.bank.get_assessment_type(assessment_type_id).is_none() {
            return Err(EngineError::AssessmentTypeNotFound {
                assessment_type_id: assessment_type_id.to_string(),
            });
        }

        let now = Timestamp::now();
        let session = AssessmentSession {
            id: Uuid::new_v4(),
            assessment_type_id: assessment_type_id.to_string(),
            started_at: now,
            current_question_index: 0,
            answers: Vec::new(),
            status: SessionStatus::Active,
            language: language.unwrap_or(&self.config.default_language).to_string(),
            time_spent_secs: 0,
            last_activity_at: now,
        };
        self.save_session(&session).await?;
        info!(
            session_id = %session.id,
            assessment_type = %assessment_type_id,
            language = %session.language,
            "assessment started"
        );
        Ok(session)
    }

    /// Reactivate a paused or stale session.
    pub async fn resume_assessment(
        &self,
        session_id: Uuid,
    ) -> Result<AssessmentSession, EngineError> {
        let mut session = self.load_session(session_id).await?;
        self.reject_terminal(&session)?;

        session.status = SessionStatus::Active;
        // Paused time does not count toward time spent.
        session.last_activity_at = Timestamp::now();
        self.save_session(&session).await?;
        info!(session_id = %session.id, "assessment resumed");
        Ok(session)
    }

    /// Validate and record one answer. Resubmitting a question id replaces
    /// the prior answer. Completes the session, and produces its result,
    /// once every required question is answered.
    pub async fn submit_answer(
        &self,
        session_id: Uuid,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<SubmitOutcome, EngineError> {
        let mut session = self.load_session(session_id).await?;
        self.reject_terminal(&session)?;
        let assessment_type = self.assessment_type_for(&session)?;

        let question =
            assessment_type
                .question(question_id)
                .ok_or_else(|| EngineError::QuestionNotFound {
                    session_id,
                    question_id: question_id.to_string(),
                })?;

        // On validation failure the session is returned untouched.
        validate::validate_answer(&value, question)
            .map_err(|error| EngineError::AnswerValidationFailed { session_id, error })?;

        let now = Timestamp::now();
        if session.status == SessionStatus::Active {
            accrue_time(&mut session, now);
        } else {
            // Submitting to a paused session implicitly resumes it.
            session.status = SessionStatus::Active;
        }
        session.last_activity_at = now;
        session.upsert_answer(AssessmentAnswer {
            question_id: question_id.to_string(),
            value,
            answered_at: now,
        });
        session.current_question_index = advance_index(&session, assessment_type);

        let completed = assessment_type
            .questions
            .iter()
            .filter(|q| q.required)
            .all(|q| session.has_answer(&q.id));
        if completed {
            session.status = SessionStatus::Completed;
            session.current_question_index = assessment_type.questions.len();
        }

        self.save_session(&session).await?;
        info!(
            session_id = %session.id,
            question_id = %question_id,
            index = session.current_question_index,
            completed,
            "answer recorded"
        );

        let result = if completed {
            self.analyzer.analyze_session(&session).await?
        } else {
            None
        };
        Ok(SubmitOutcome { session, result })
    }

    /// Pause an active session. Pausing a paused session is a no-op.
    pub async fn pause_assessment(
        &self,
        session_id: Uuid,
    ) -> Result<AssessmentSession, EngineError> {
        let mut session = self.load_session(session_id).await?;
        self.reject_terminal(&session)?;
        if session.status == SessionStatus::Paused {
            return Ok(session);
        }

        let now = Timestamp::now();
        accrue_time(&mut session, now);
        session.last_activity_at = now;
        session.status = SessionStatus::Paused;
        self.save_session(&session).await?;
        info!(session_id = %session.id, "assessment paused");
        Ok(session)
    }

    /// Explicitly discard a session. Terminal: the session stays in
    /// storage but accepts no further transitions.
    pub async fn abandon_assessment(
        &self,
        session_id: Uuid,
    ) -> Result<AssessmentSession, EngineError> {
        let mut session = self.load_session(session_id).await?;
        self.reject_terminal(&session)?;

        let now = Timestamp::now();
        if session.status == SessionStatus::Active {
            accrue_time(&mut session, now);
        }
        session.last_activity_at = now;
        session.status = SessionStatus::Abandoned;
        self.save_session(&session).await?;
        info!(session_id = %session.id, "assessment abandoned");
        Ok(session)
    }

    /// The question the session currently points at, localized for the
    /// session's language. `None` once the pointer is past the last
    /// question.
    pub async fn current_question(
        &self,
        session_id: Uuid,
    ) -> Result<Option<Question>, EngineError> {
        let session = self.load_session(session_id).await?;
        let localized = self
            .bank
            .get_localized_assessment_type(&session.assessment_type_id, &session.language)
            .ok_or_else(|| EngineError::AssessmentTypeNotFound {
                assessment_type_id: session.assessment_type_id.clone(),
            })?;
        Ok(localized
            .questions
            .get(session.current_question_index)
            .cloned())
    }

    pub async fn get_session(&self, session_id: Uuid) -> Result<AssessmentSession, EngineError> {
        self.load_session(session_id).await
    }

    pub async fn all_sessions(&self) -> Result<Vec<AssessmentSession>, EngineError> {
        Ok(self
            .store
            .get_by_kind::<AssessmentSession>(RecordKind::Session)
            .await?)
    }

    /// Sessions that can still be worked on: active or paused.
    pub async fn active_sessions(&self) -> Result<Vec<AssessmentSession>, EngineError> {
        let mut sessions = self.all_sessions().await?;
        sessions.retain(|s| !s.status.is_terminal());
        Ok(sessions)
    }

    pub async fn sessions_with_status(
        &self,
        status: SessionStatus,
    ) -> Result<Vec<AssessmentSession>, EngineError> {
        let mut sessions = self.all_sessions().await?;
        sessions.retain(|s| s.status == status);
        Ok(sessions)
    }

    pub async fn get_result(
        &self,
        result_id: Uuid,
    ) -> Result<Option<AssessmentResult>, EngineError> {
        Ok(self
            .store
            .get(RecordKind::Result, &result_id.to_string())
            .await?)
    }

    pub async fn results_for_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<AssessmentResult>, EngineError> {
        let mut results = self
            .store
            .get_by_kind::<AssessmentResult>(RecordKind::Result)
            .await?;
        results.retain(|r| r.session_id == session_id);
        Ok(results)
    }

    /// Results are immutable; deletion is the only mutation, and only by
    /// explicit request.
    pub async fn delete_result(&self, result_id: Uuid) -> Result<bool, EngineError> {
        let deleted = self
            .store
            .delete(RecordKind::Result, &result_id.to_string())
            .await?;
        if deleted {
            info!(result_id = %result_id, "assessment result deleted");
        }
        Ok(deleted)
    }

    /// Re-run the analyzer against a stored session. Recovers the case
    /// where a crash left a completed session with no persisted result.
    /// `None` when the session is not completed.
    pub async fn recompute_result(
        &self,
        session_id: Uuid,
    ) -> Result<Option<AssessmentResult>, EngineError> {
        let session = self.load_session(session_id).await?;
        self.analyzer.analyze_session(&session).await
    }

    async fn load_session(&self, session_id: Uuid) -> Result<AssessmentSession, EngineError> {
        self.store
            .get(RecordKind::Session, &session_id.to_string())
            .await?
            .ok_or(EngineError::SessionNotFound { session_id })
    }

    async fn save_session(&self, session: &AssessmentSession) -> Result<(), EngineError> {
        self.store
            .save(RecordKind::Session, session, Some(session.id.to_string()))
            .await?;
        Ok(())
    }

    fn assessment_type_for(
        &self,
        session: &AssessmentSession,
    ) -> Result<&AssessmentType, EngineError> {
        self.bank
            .get_assessment_type(&session.assessment_type_id)
            .ok_or_else(|| EngineError::AssessmentTypeNotFound {
                assessment_type_id: session.assessment_type_id.clone(),
            })
    }

    fn reject_terminal(&self, session: &AssessmentSession) -> Result<(), EngineError> {
        match session.status {
            SessionStatus::Completed => Err(EngineError::SessionAlreadyCompleted {
                session_id: session.id,
            }),
            SessionStatus::Abandoned => Err(EngineError::SessionNotActive {
                session_id: session.id,
                status: "abandoned".to_string(),
            }),
            SessionStatus::Active | SessionStatus::Paused => Ok(()),
        }
    }
}

/// Count wall time toward the session while it is active.
fn accrue_time(session: &mut AssessmentSession, now: Timestamp) {
    let elapsed = now.as_second() - session.last_activity_at.as_second();
    if elapsed > 0 {
        session.time_spent_secs += elapsed as u64;
    }
}

/// Forward-only pointer policy: the first unanswered question at or
/// beyond (highest answered index + 1). If revisiting earlier questions
/// pushed the candidate past the end while some questions are still
/// open, the pointer falls back to the first open question so that it
/// only reaches `questions.len()` on completion.
fn advance_index(session: &AssessmentSession, assessment_type: &AssessmentType) -> usize {
    let highest_next = session
        .answers
        .iter()
        .filter_map(|a| assessment_type.question_index(&a.question_id))
        .max()
        .map_or(0, |i| i + 1);

    let mut index = highest_next.max(session.current_question_index);
    while index < assessment_type.questions.len()
        && session.has_answer(&assessment_type.questions[index].id)
    {
        index += 1;
    }

    if index >= assessment_type.questions.len() {
        match assessment_type
            .questions
            .iter()
            .position(|q| !session.has_answer(&q.id))
        {
            Some(first_open) => first_open,
            None => assessment_type.questions.len(),
        }
    } else {
        index
    }
}
