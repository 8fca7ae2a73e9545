use std::sync::Arc;

use log::{info, warn};

use quiz_core::Clock;
use quiz_core::model::{QuizId, QuizResult};

use crate::error::{ApiError, SessionError};
use crate::quiz_api::QuizApi;
use crate::sessions::flow::SubmitPhase;
use crate::sessions::service::QuizSession;

/// The network side of a quiz attempt: load, submit, review.
///
/// Submission consumes whatever phase [`QuizSession::request_submit`] (plus
/// confirmation) reached; it refuses to transmit unless the session is in
/// `Submitting`, so the one-request-in-flight rule cannot be bypassed by
/// calling this directly.
#[derive(Clone)]
pub struct SessionWorkflow {
    api: Arc<dyn QuizApi>,
    clock: Clock,
}

impl SessionWorkflow {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>, clock: Clock) -> Self {
        Self { api, clock }
    }

    /// Fetch the quiz and open a fresh attempt on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` for request failures and
    /// `SessionError::Empty` for a quiz without questions.
    pub async fn start(&self, id: QuizId) -> Result<QuizSession, SessionError> {
        let detail = self.api.fetch_quiz(id).await?;
        info!(
            "starting session for quiz {id} with {} questions",
            detail.questions.len()
        );
        QuizSession::new(detail, self.clock.now())
    }

    /// Transmit the attempt: the full answer sheet, blanks included, plus
    /// the elapsed seconds. Exactly one request per call.
    ///
    /// On success the session becomes `Completed`. On failure it becomes
    /// `Failed` with the sheet intact so the user may retry, except after a
    /// 401: the token is already gone, so the sheet is discarded with it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitting` unless the submit-state machine
    /// reached `Submitting`, and `SessionError::Api` for request failures.
    pub async fn submit(&self, session: &mut QuizSession) -> Result<i64, SessionError> {
        if session.phase() != &SubmitPhase::Submitting {
            return Err(SessionError::NotSubmitting);
        }

        let quiz_id = session.quiz().id();
        let duration_secs = session.elapsed_secs();
        let outcome = self
            .api
            .submit_answers(quiz_id, session.answers(), duration_secs)
            .await;

        match outcome {
            Ok(submission_id) => {
                info!("quiz {quiz_id} submitted after {duration_secs}s");
                session.mark_completed(submission_id)?;
                Ok(submission_id)
            }
            Err(err @ ApiError::Unauthorized) => {
                warn!("submission of quiz {quiz_id} rejected as unauthenticated");
                session.mark_failed()?;
                session.discard_answers();
                Err(err.into())
            }
            Err(err) => {
                warn!("submission of quiz {quiz_id} failed: {err}");
                session.mark_failed()?;
                Err(err.into())
            }
        }
    }

    /// Fetch the graded result for a quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` for request failures.
    pub async fn load_result(&self, id: QuizId) -> Result<QuizResult, SessionError> {
        Ok(self.api.fetch_result(id).await?)
    }
}
