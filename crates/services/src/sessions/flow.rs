use quiz_core::model::QuestionId;

use crate::error::SessionError;

/// Where the attempt stands with respect to handing it in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// Answering questions; nothing submitted yet.
    #[default]
    Editing,
    /// Waiting for the user to confirm despite unanswered questions.
    Confirming { unanswered: Vec<QuestionId> },
    /// A request is in flight. No second request may start.
    Submitting,
    /// The server accepted the submission. Terminal.
    Completed,
    /// The last attempt failed; the sheet is untouched and may be retried.
    Failed,
}

/// Outcome of a submit request: go straight out, or ask the user first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitGate {
    /// Every question has a non-blank answer; transmission may begin.
    Ready,
    /// Some questions are unanswered; the user must confirm.
    Confirm { unanswered: Vec<QuestionId> },
}

/// The submit-state machine for one attempt.
///
/// At most one request is ever in flight and at most one completes: the
/// `Submitting` phase rejects further requests and `Completed` is terminal.
/// A time-up trigger goes through [`SubmissionFlow::request_submit`] like a
/// button press, so the incomplete-answers gate still applies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionFlow {
    phase: SubmitPhase,
}

impl SubmissionFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == SubmitPhase::Completed
    }

    /// Ask to submit, given the questions still unanswered. With a complete
    /// sheet this moves straight to `Submitting`; otherwise to `Confirming`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InFlight` while a request is out and
    /// `SessionError::Completed` once one has succeeded.
    pub fn request_submit(
        &mut self,
        unanswered: Vec<QuestionId>,
    ) -> Result<SubmitGate, SessionError> {
        match self.phase {
            SubmitPhase::Submitting => return Err(SessionError::InFlight),
            SubmitPhase::Completed => return Err(SessionError::Completed),
            SubmitPhase::Editing | SubmitPhase::Confirming { .. } | SubmitPhase::Failed => {}
        }

        if unanswered.is_empty() {
            self.phase = SubmitPhase::Submitting;
            Ok(SubmitGate::Ready)
        } else {
            self.phase = SubmitPhase::Confirming {
                unanswered: unanswered.clone(),
            };
            Ok(SubmitGate::Confirm { unanswered })
        }
    }

    /// The user confirmed submitting with unanswered questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotConfirming` outside the confirmation step.
    pub fn confirm(&mut self) -> Result<(), SessionError> {
        if !matches!(self.phase, SubmitPhase::Confirming { .. }) {
            return Err(SessionError::NotConfirming);
        }
        self.phase = SubmitPhase::Submitting;
        Ok(())
    }

    /// The user declined; back to answering.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotConfirming` outside the confirmation step.
    pub fn decline(&mut self) -> Result<(), SessionError> {
        if !matches!(self.phase, SubmitPhase::Confirming { .. }) {
            return Err(SessionError::NotConfirming);
        }
        self.phase = SubmitPhase::Editing;
        Ok(())
    }

    /// The in-flight request succeeded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitting` when no request was in flight.
    pub fn complete(&mut self) -> Result<(), SessionError> {
        if self.phase != SubmitPhase::Submitting {
            return Err(SessionError::NotSubmitting);
        }
        self.phase = SubmitPhase::Completed;
        Ok(())
    }

    /// The in-flight request failed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitting` when no request was in flight.
    pub fn fail(&mut self) -> Result<(), SessionError> {
        if self.phase != SubmitPhase::Submitting {
            return Err(SessionError::NotSubmitting);
        }
        self.phase = SubmitPhase::Failed;
        Ok(())
    }

    /// Dismiss a failure and return to answering. No-op in other phases.
    pub fn acknowledge_failure(&mut self) {
        if self.phase == SubmitPhase::Failed {
            self.phase = SubmitPhase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<QuestionId> {
        raw.iter().copied().map(QuestionId::new).collect()
    }

    #[test]
    fn complete_sheet_skips_the_gate() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.request_submit(Vec::new()).unwrap(), SubmitGate::Ready);
        assert_eq!(flow.phase(), &SubmitPhase::Submitting);
    }

    #[test]
    fn incomplete_sheet_requires_confirmation() {
        let mut flow = SubmissionFlow::new();
        let gate = flow.request_submit(ids(&[2, 5])).unwrap();
        assert_eq!(
            gate,
            SubmitGate::Confirm {
                unanswered: ids(&[2, 5])
            }
        );

        flow.confirm().unwrap();
        assert_eq!(flow.phase(), &SubmitPhase::Submitting);
    }

    #[test]
    fn declining_returns_to_editing() {
        let mut flow = SubmissionFlow::new();
        flow.request_submit(ids(&[1])).unwrap();
        flow.decline().unwrap();
        assert_eq!(flow.phase(), &SubmitPhase::Editing);
        assert!(matches!(flow.confirm(), Err(SessionError::NotConfirming)));
    }

    #[test]
    fn in_flight_blocks_a_second_request() {
        let mut flow = SubmissionFlow::new();
        flow.request_submit(Vec::new()).unwrap();
        assert!(matches!(
            flow.request_submit(Vec::new()),
            Err(SessionError::InFlight)
        ));
    }

    #[test]
    fn completed_is_terminal() {
        let mut flow = SubmissionFlow::new();
        flow.request_submit(Vec::new()).unwrap();
        flow.complete().unwrap();
        assert!(matches!(
            flow.request_submit(Vec::new()),
            Err(SessionError::Completed)
        ));
    }

    #[test]
    fn failure_allows_a_retry() {
        let mut flow = SubmissionFlow::new();
        flow.request_submit(Vec::new()).unwrap();
        flow.fail().unwrap();
        assert_eq!(flow.phase(), &SubmitPhase::Failed);

        assert_eq!(flow.request_submit(Vec::new()).unwrap(), SubmitGate::Ready);
    }

    #[test]
    fn acknowledging_a_failure_resumes_editing() {
        let mut flow = SubmissionFlow::new();
        flow.request_submit(Vec::new()).unwrap();
        flow.fail().unwrap();
        flow.acknowledge_failure();
        assert_eq!(flow.phase(), &SubmitPhase::Editing);
    }

    #[test]
    fn lifecycle_calls_outside_submitting_are_rejected() {
        let mut flow = SubmissionFlow::new();
        assert!(matches!(flow.complete(), Err(SessionError::NotSubmitting)));
        assert!(matches!(flow.fail(), Err(SessionError::NotSubmitting)));
    }
}
