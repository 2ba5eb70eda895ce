use std::mem;
use std::sync::Arc;

use super::event::SessionEvent;
use super::phase::SessionPhase;
use crate::gateway::{NarrativeSource, QuestionSource};
use crate::question::Question;
use crate::scoring::Tally;

/// Message shown when question generation fails, whatever the cause.
pub const QUESTION_FAILURE_MESSAGE: &str =
    "Could not create your quiz questions. Please try again in a moment.";

/// Message shown when result analysis fails, whatever the cause.
pub const ANALYSIS_FAILURE_MESSAGE: &str =
    "Could not analyze your result. Please try again in a moment.";

/// Drives one quiz session through its phases.
///
/// `QuizSession` owns the session state exclusively. Synchronous user
/// events go through [`apply`](Self::apply). The two suspension points,
/// fetching questions and fetching the narrative, are the explicit entry
/// actions [`load`](Self::load) and [`analyze`](Self::analyze), awaited by
/// the driver whenever it observes the corresponding phase. No other
/// transition can occur while one of them is outstanding.
pub struct QuizSession {
    questions: Vec<Question>,
    phase: SessionPhase,
    question_source: Arc<dyn QuestionSource>,
    narrative_source: Arc<dyn NarrativeSource>,
}

impl QuizSession {
    /// Creates a session in the initial Loading phase.
    pub fn new(
        question_source: Arc<dyn QuestionSource>,
        narrative_source: Arc<dyn NarrativeSource>,
    ) -> Self {
        Self {
            questions: Vec::new(),
            phase: SessionPhase::Loading,
            question_source,
            narrative_source,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The loaded question batch (empty until Loading succeeds).
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question currently shown, when in the Testing phase.
    pub fn current_question(&self) -> Option<&Question> {
        match &self.phase {
            SessionPhase::Testing { current, .. } => self.questions.get(*current),
            _ => None,
        }
    }

    /// Entry action for Loading: fetch the question batch.
    ///
    /// A validated non-empty batch moves the session to Welcome; any
    /// failure, or an empty batch, collapses to Error with one
    /// human-readable message.
    pub async fn load(&mut self) -> &SessionPhase {
        if !matches!(self.phase, SessionPhase::Loading) {
            tracing::warn!(phase = self.phase.name(), "load called outside Loading");
            return &self.phase;
        }

        match self.question_source.generate_questions().await {
            Ok(questions) if questions.is_empty() => {
                tracing::error!("question source returned an empty batch");
                self.phase = SessionPhase::Error {
                    message: QUESTION_FAILURE_MESSAGE.to_string(),
                };
            }
            Ok(questions) => {
                tracing::info!(count = questions.len(), "question batch loaded");
                self.questions = questions;
                self.phase = SessionPhase::Welcome;
            }
            Err(err) => {
                tracing::error!(error = %err, "question generation failed");
                self.phase = SessionPhase::Error {
                    message: QUESTION_FAILURE_MESSAGE.to_string(),
                };
            }
        }

        &self.phase
    }

    /// Entry action for Analyzing: fetch the narrative for the derived
    /// type code. Success moves to Result, failure to Error.
    pub async fn analyze(&mut self) -> &SessionPhase {
        let type_code = match &self.phase {
            SessionPhase::Analyzing { type_code } => *type_code,
            _ => {
                tracing::warn!(phase = self.phase.name(), "analyze called outside Analyzing");
                return &self.phase;
            }
        };

        match self.narrative_source.generate_narrative(&type_code).await {
            Ok(narrative) => {
                tracing::info!(%type_code, "narrative ready");
                self.phase = SessionPhase::Result {
                    type_code,
                    narrative,
                };
            }
            Err(err) => {
                tracing::error!(error = %err, %type_code, "narrative generation failed");
                self.phase = SessionPhase::Error {
                    message: ANALYSIS_FAILURE_MESSAGE.to_string(),
                };
            }
        }

        &self.phase
    }

    /// Applies a user event to the current phase.
    ///
    /// Events that the current phase does not consume are ignored.
    pub fn apply(&mut self, event: SessionEvent) -> &SessionPhase {
        let phase = mem::replace(&mut self.phase, SessionPhase::Loading);

        self.phase = match (phase, event) {
            (SessionPhase::Welcome, SessionEvent::Start) => SessionPhase::Testing {
                current: 0,
                tally: Tally::new(),
            },

            (SessionPhase::Testing { current, mut tally }, SessionEvent::Answer(choice)) => {
                // Testing is only entered with a non-empty batch and
                // current stays below the batch length, so indexing holds.
                let question = &self.questions[current];
                tally.record(question.option(choice).dimension);

                if current + 1 < self.questions.len() {
                    SessionPhase::Testing {
                        current: current + 1,
                        tally,
                    }
                } else {
                    let type_code = tally.type_code();
                    tracing::info!(%type_code, "all questions answered");
                    SessionPhase::Analyzing { type_code }
                }
            }

            // A retry from Result keeps the question batch and discards
            // everything derived from the previous run.
            (SessionPhase::Result { .. }, SessionEvent::Retry) => SessionPhase::Welcome,

            // A retry from Error restarts the whole session, question
            // fetch included; prior answers are intentionally discarded.
            (SessionPhase::Error { .. }, SessionEvent::Retry) => {
                self.questions.clear();
                SessionPhase::Loading
            }

            (other, event) => {
                tracing::debug!(?event, phase = other.name(), "event ignored in current phase");
                other
            }
        };

        &self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{Axis, Dimension};
    use crate::error::{MindTypeError, Result};
    use crate::narrative::ResultNarrative;
    use crate::question::{Choice, QuestionOption};
    use crate::scoring::TypeCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // Question source that replays a scripted sequence of responses.
    struct ScriptedQuestionSource {
        responses: Mutex<VecDeque<Result<Vec<Question>>>>,
    }

    impl ScriptedQuestionSource {
        fn new(responses: Vec<Result<Vec<Question>>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }

        fn always(questions: Vec<Question>) -> Self {
            Self::new(vec![Ok(questions)])
        }
    }

    #[async_trait::async_trait]
    impl QuestionSource for ScriptedQuestionSource {
        async fn generate_questions(&self) -> Result<Vec<Question>> {
            let mut responses = self.responses.lock().unwrap();
            responses
                .pop_front()
                .unwrap_or_else(|| Err(MindTypeError::internal("script exhausted")))
        }
    }

    struct StaticNarrativeSource {
        narrative: ResultNarrative,
    }

    #[async_trait::async_trait]
    impl NarrativeSource for StaticNarrativeSource {
        async fn generate_narrative(&self, _type_code: &TypeCode) -> Result<ResultNarrative> {
            Ok(self.narrative.clone())
        }
    }

    struct FailingNarrativeSource;

    #[async_trait::async_trait]
    impl NarrativeSource for FailingNarrativeSource {
        async fn generate_narrative(&self, _type_code: &TypeCode) -> Result<ResultNarrative> {
            Err(MindTypeError::transport_with_status(503, "overloaded"))
        }
    }

    fn question(axis: Axis) -> Question {
        Question {
            prompt: format!("Pick a side of {:?}", axis),
            options: [
                QuestionOption {
                    text: "first".to_string(),
                    dimension: axis.first(),
                },
                QuestionOption {
                    text: "second".to_string(),
                    dimension: axis.second(),
                },
            ],
        }
    }

    // 12 questions, 3 per axis, first option always the axis's first member.
    fn sample_batch() -> Vec<Question> {
        Axis::ALL
            .into_iter()
            .flat_map(|axis| (0..3).map(move |_| question(axis)))
            .collect()
    }

    fn sample_narrative() -> ResultNarrative {
        ResultNarrative {
            title: "The Steady Planner".to_string(),
            description: "Thrives on structure and clear goals.".to_string(),
            strengths: vec!["organized".into(), "reliable".into()],
            weaknesses: vec!["rigid".into(), "dislikes surprises".into()],
            recommendations: vec!["weekly plans".into(), "checklists".into()],
            reading_strategies: vec!["scheduled reading".into(), "notes per chapter".into()],
            math_strategies: vec!["worked examples".into(), "step-by-step drills".into()],
            science_strategies: vec!["structured labs".into(), "review summaries".into()],
        }
    }

    fn session(
        source: ScriptedQuestionSource,
        narratives: Arc<dyn NarrativeSource>,
    ) -> QuizSession {
        QuizSession::new(Arc::new(source), narratives)
    }

    fn happy_session() -> QuizSession {
        session(
            ScriptedQuestionSource::always(sample_batch()),
            Arc::new(StaticNarrativeSource {
                narrative: sample_narrative(),
            }),
        )
    }

    #[tokio::test]
    async fn test_load_success_reaches_welcome() {
        let mut session = happy_session();
        assert_eq!(session.phase().name(), "loading");

        session.load().await;

        assert_eq!(*session.phase(), SessionPhase::Welcome);
        assert_eq!(session.questions().len(), 12);
    }

    #[tokio::test]
    async fn test_empty_batch_reaches_error_not_welcome() {
        let mut session = session(
            ScriptedQuestionSource::always(Vec::new()),
            Arc::new(FailingNarrativeSource),
        );

        session.load().await;

        match session.phase() {
            SessionPhase::Error { message } => assert!(!message.is_empty()),
            other => panic!("expected Error, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_load_failure_reaches_error() {
        let mut session = session(
            ScriptedQuestionSource::new(vec![Err(MindTypeError::transport("connection refused"))]),
            Arc::new(FailingNarrativeSource),
        );

        session.load().await;

        assert_eq!(
            *session.phase(),
            SessionPhase::Error {
                message: QUESTION_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_full_run_first_options_yields_estj() {
        let mut session = happy_session();
        session.load().await;
        session.apply(SessionEvent::Start);

        for _ in 0..12 {
            session.apply(SessionEvent::Answer(Choice::First));
        }

        match session.phase() {
            SessionPhase::Analyzing { type_code } => {
                assert_eq!(type_code.to_string(), "ESTJ");
            }
            other => panic!("expected Analyzing, got {}", other.name()),
        }

        session.analyze().await;

        match session.phase() {
            SessionPhase::Result {
                type_code,
                narrative,
            } => {
                assert_eq!(type_code.to_string(), "ESTJ");
                assert_eq!(narrative.title, "The Steady Planner");
            }
            other => panic!("expected Result, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_testing_advances_one_question_at_a_time() {
        let mut session = happy_session();
        session.load().await;
        session.apply(SessionEvent::Start);

        match session.phase() {
            SessionPhase::Testing { current, tally } => {
                assert_eq!(*current, 0);
                assert_eq!(tally.total(), 0);
            }
            other => panic!("expected Testing, got {}", other.name()),
        }

        session.apply(SessionEvent::Answer(Choice::Second));

        match session.phase() {
            SessionPhase::Testing { current, tally } => {
                assert_eq!(*current, 1);
                assert_eq!(tally.total(), 1);
                assert_eq!(tally.count(Dimension::I), 1);
            }
            other => panic!("expected Testing, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_analysis_failure_reaches_error() {
        let mut session = session(
            ScriptedQuestionSource::always(sample_batch()),
            Arc::new(FailingNarrativeSource),
        );
        session.load().await;
        session.apply(SessionEvent::Start);
        for _ in 0..12 {
            session.apply(SessionEvent::Answer(Choice::First));
        }

        session.analyze().await;

        assert_eq!(
            *session.phase(),
            SessionPhase::Error {
                message: ANALYSIS_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_error_retry_reloads_with_fresh_state() {
        let mut session = session(
            ScriptedQuestionSource::new(vec![
                Err(MindTypeError::transport("connection refused")),
                Ok(sample_batch()),
            ]),
            Arc::new(StaticNarrativeSource {
                narrative: sample_narrative(),
            }),
        );

        session.load().await;
        assert_eq!(session.phase().name(), "error");

        session.apply(SessionEvent::Retry);
        assert_eq!(*session.phase(), SessionPhase::Loading);

        session.load().await;
        assert_eq!(*session.phase(), SessionPhase::Welcome);

        // The new run starts from scratch.
        session.apply(SessionEvent::Start);
        match session.phase() {
            SessionPhase::Testing { current, tally } => {
                assert_eq!(*current, 0);
                assert_eq!(tally.total(), 0);
            }
            other => panic!("expected Testing, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_result_retry_returns_to_welcome_with_same_questions() {
        let mut session = happy_session();
        session.load().await;
        let loaded = session.questions().to_vec();

        session.apply(SessionEvent::Start);
        for _ in 0..12 {
            session.apply(SessionEvent::Answer(Choice::First));
        }
        session.analyze().await;
        assert_eq!(session.phase().name(), "result");

        session.apply(SessionEvent::Retry);

        assert_eq!(*session.phase(), SessionPhase::Welcome);
        assert_eq!(session.questions(), loaded.as_slice());
    }

    #[tokio::test]
    async fn test_events_are_ignored_in_non_consuming_phases() {
        let mut session = happy_session();

        // Loading consumes no user events.
        session.apply(SessionEvent::Start);
        session.apply(SessionEvent::Answer(Choice::First));
        session.apply(SessionEvent::Retry);
        assert_eq!(*session.phase(), SessionPhase::Loading);

        session.load().await;
        session.apply(SessionEvent::Retry);
        session.apply(SessionEvent::Answer(Choice::Second));
        assert_eq!(*session.phase(), SessionPhase::Welcome);
    }

    #[tokio::test]
    async fn test_entry_actions_outside_their_phase_are_no_ops() {
        let mut session = happy_session();
        session.load().await;

        // Welcome has no entry action; both calls must leave it untouched.
        session.load().await;
        session.analyze().await;
        assert_eq!(*session.phase(), SessionPhase::Welcome);
    }
}
