use chrono::{DateTime, Utc};

use quiz_core::model::{
    AnswerSheet, CountdownTick, Cursor, Question, QuestionId, Quiz, SessionClock,
};

use crate::error::SessionError;
use crate::quiz_api::QuizDetail;
use crate::sessions::flow::{SubmissionFlow, SubmitGate, SubmitPhase};

/// Headline numbers for the progress strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub answered: usize,
    pub total: usize,
    pub current_index: usize,
}

/// One live quiz attempt: the loaded quiz, the respondent's answers, the
/// navigation cursor, the tick state and the submit-state machine.
///
/// The session is a plain value; it performs no I/O. Network round trips
/// live in [`SessionWorkflow`](crate::sessions::SessionWorkflow) and tick
/// scheduling in [`SessionTimers`](crate::sessions::SessionTimers).
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    questions: Vec<Question>,
    answers: AnswerSheet,
    cursor: Cursor,
    clock: SessionClock,
    flow: SubmissionFlow,
    started_at: DateTime<Utc>,
    time_up: bool,
    submission_id: Option<i64>,
}

impl QuizSession {
    /// Open an attempt on a loaded quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the quiz has no questions.
    pub fn new(detail: QuizDetail, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        let QuizDetail { quiz, questions } = detail;
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let cursor = Cursor::new(questions.len());
        let clock = SessionClock::new(quiz.estimated_minutes());

        Ok(Self {
            quiz,
            questions,
            answers: AnswerSheet::new(),
            cursor,
            clock,
            flow: SubmissionFlow::new(),
            started_at,
            time_up: false,
            submission_id: None,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Server-issued submission id, once the attempt has been accepted.
    #[must_use]
    pub fn submission_id(&self) -> Option<i64> {
        self.submission_id
    }

    /// The question under the cursor.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        // The constructor rejects empty quizzes and the cursor clamps, so
        // the index is always valid.
        &self.questions[self.cursor.index()]
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    #[must_use]
    pub fn is_first_question(&self) -> bool {
        self.cursor.is_first()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.cursor.is_last()
    }

    pub fn next_question(&mut self) {
        self.cursor.move_next();
    }

    pub fn previous_question(&mut self) {
        self.cursor.move_previous();
    }

    pub fn jump_to_question(&mut self, index: usize) {
        self.cursor.jump_to(index);
    }

    /// Record an answer for the question under the cursor. Last write wins;
    /// moving the cursor never touches recorded answers.
    pub fn answer_current(&mut self, value: impl Into<String>) {
        self.answers.set(self.current_question().id(), value);
    }

    /// Record an answer for any question by id.
    pub fn answer(&mut self, id: QuestionId, value: impl Into<String>) {
        self.answers.set(id, value);
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            answered: self.answers.answered_count(&self.questions),
            total: self.questions.len(),
            current_index: self.cursor.index(),
        }
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.clock.remaining_secs()
    }

    #[must_use]
    pub fn has_countdown(&self) -> bool {
        self.clock.has_countdown()
    }

    /// Whether the countdown has run out. Latched; never cleared.
    #[must_use]
    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    /// Advance the elapsed counter by one second.
    pub fn tick_elapsed(&mut self) -> u64 {
        self.clock.tick_elapsed()
    }

    /// Advance the countdown by one second, latching the time-up flag on
    /// expiry. The caller reacts to `Expired` by requesting submission.
    pub fn tick_countdown(&mut self) -> CountdownTick {
        let tick = self.clock.tick_countdown();
        if tick == CountdownTick::Expired {
            self.time_up = true;
        }
        tick
    }

    #[must_use]
    pub fn phase(&self) -> &SubmitPhase {
        self.flow.phase()
    }

    #[must_use]
    pub fn is_submit_in_flight(&self) -> bool {
        self.flow.is_in_flight()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.flow.is_completed()
    }

    /// Ask to submit the attempt. An incomplete sheet gates on confirmation
    /// even when the countdown forced the request.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InFlight` or `SessionError::Completed` per the
    /// submit-state machine.
    pub fn request_submit(&mut self) -> Result<SubmitGate, SessionError> {
        let unanswered = self.answers.unanswered(&self.questions);
        self.flow.request_submit(unanswered)
    }

    /// See [`SubmissionFlow::confirm`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotConfirming` outside the confirmation step.
    pub fn confirm_submit(&mut self) -> Result<(), SessionError> {
        self.flow.confirm()
    }

    /// See [`SubmissionFlow::decline`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotConfirming` outside the confirmation step.
    pub fn decline_submit(&mut self) -> Result<(), SessionError> {
        self.flow.decline()
    }

    /// Dismiss a failed attempt and resume editing.
    pub fn acknowledge_failure(&mut self) {
        self.flow.acknowledge_failure();
    }

    pub(crate) fn mark_completed(&mut self, submission_id: i64) -> Result<(), SessionError> {
        self.flow.complete()?;
        self.submission_id = Some(submission_id);
        Ok(())
    }

    pub(crate) fn mark_failed(&mut self) -> Result<(), SessionError> {
        self.flow.fail()
    }

    pub(crate) fn discard_answers(&mut self) {
        self.answers.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionKind, QuizId};
    use quiz_core::time::fixed_now;

    fn detail(question_count: u64, estimated_minutes: Option<u32>) -> QuizDetail {
        let quiz = Quiz::new(QuizId::new(1), "Algebra I", estimated_minutes, fixed_now()).unwrap();
        let questions = (1..=question_count)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    format!("Q{id}"),
                    QuestionKind::FillInBlank,
                    Vec::new(),
                )
                .unwrap()
            })
            .collect();
        QuizDetail { quiz, questions }
    }

    fn session(question_count: u64) -> QuizSession {
        QuizSession::new(detail(question_count, None), fixed_now()).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let err = QuizSession::new(detail(0, None), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn answers_survive_navigation() {
        let mut session = session(3);
        session.answer_current("first");
        session.next_question();
        session.answer_current("second");
        session.previous_question();

        assert_eq!(session.answers().answer(QuestionId::new(1)), Some("first"));
        assert_eq!(
            session.answers().answer(QuestionId::new(2)),
            Some("second")
        );
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn progress_counts_non_blank_answers() {
        let mut session = session(4);
        session.answer(QuestionId::new(1), "a");
        session.answer(QuestionId::new(2), "   ");
        session.jump_to_question(3);

        let progress = session.progress();
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.current_index, 3);
    }

    #[test]
    fn incomplete_submit_gates_with_the_unanswered_ids() {
        let mut session = session(3);
        session.answer(QuestionId::new(2), "x");

        let gate = session.request_submit().unwrap();
        assert_eq!(
            gate,
            SubmitGate::Confirm {
                unanswered: vec![QuestionId::new(1), QuestionId::new(3)]
            }
        );
    }

    #[test]
    fn countdown_expiry_latches_time_up() {
        let mut session =
            QuizSession::new(detail(1, Some(1)), fixed_now()).unwrap();
        assert!(!session.is_time_up());
        for _ in 0..60 {
            session.tick_countdown();
        }
        assert!(session.is_time_up());
        session.tick_countdown();
        assert!(session.is_time_up());
    }

    #[test]
    fn time_up_still_gates_an_incomplete_sheet() {
        let mut session = QuizSession::new(detail(2, Some(1)), fixed_now()).unwrap();
        for _ in 0..60 {
            session.tick_countdown();
        }

        let gate = session.request_submit().unwrap();
        assert!(matches!(gate, SubmitGate::Confirm { .. }));
        session.confirm_submit().unwrap();
        assert_eq!(session.phase(), &SubmitPhase::Submitting);
    }
}
