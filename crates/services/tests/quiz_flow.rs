//! End-to-end exercises of the quiz-taking flow against an in-memory API.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;

use quiz_core::model::{
    AnswerSheet, Question, QuestionId, QuestionKind, Quiz, QuizId, QuizResult,
};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{
    ApiError, QuizApi, QuizDetail, QuizSummary, SessionError, SessionWorkflow, SubmitGate,
    SubmitPhase,
};

#[derive(Clone)]
struct RecordedSubmission {
    quiz_id: QuizId,
    answers: BTreeMap<QuestionId, String>,
    duration_secs: u64,
}

/// In-memory `QuizApi` with a scripted submit outcome per call.
struct FakeApi {
    detail: QuizDetail,
    submit_script: Mutex<Vec<Result<i64, ApiError>>>,
    submissions: Mutex<Vec<RecordedSubmission>>,
}

impl FakeApi {
    fn new(detail: QuizDetail, submit_script: Vec<Result<i64, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            detail,
            submit_script: Mutex::new(submit_script),
            submissions: Mutex::new(Vec::new()),
        })
    }

    fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    fn last_submission(&self) -> RecordedSubmission {
        self.submissions.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl QuizApi for FakeApi {
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_quiz(&self, _id: QuizId) -> Result<QuizDetail, ApiError> {
        Ok(self.detail.clone())
    }

    async fn submit_answers(
        &self,
        id: QuizId,
        answers: &AnswerSheet,
        duration_secs: u64,
    ) -> Result<i64, ApiError> {
        self.submissions.lock().unwrap().push(RecordedSubmission {
            quiz_id: id,
            answers: answers
                .entries()
                .map(|(qid, value)| (qid, value.to_string()))
                .collect(),
            duration_secs,
        });
        self.submit_script.lock().unwrap().remove(0)
    }

    async fn fetch_result(&self, _id: QuizId) -> Result<QuizResult, ApiError> {
        Err(ApiError::Status(reqwest::StatusCode::NOT_FOUND))
    }
}

fn fixture(question_count: u64, estimated_minutes: Option<u32>) -> QuizDetail {
    let quiz = Quiz::new(
        QuizId::new(7),
        "Algebra I",
        estimated_minutes,
        fixed_now() + Duration::days(1),
    )
    .unwrap();
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

fn workflow(api: Arc<FakeApi>) -> SessionWorkflow {
    SessionWorkflow::new(api, fixed_clock())
}

#[tokio::test]
async fn complete_sheet_submits_without_confirmation() {
    let api = FakeApi::new(fixture(2, None), vec![Ok(41)]);
    let workflow = workflow(Arc::clone(&api));

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    session.answer_current("2");
    session.next_question();
    session.answer_current("x = 4");

    assert_eq!(session.request_submit().unwrap(), SubmitGate::Ready);
    let submission_id = workflow.submit(&mut session).await.unwrap();

    assert_eq!(submission_id, 41);
    assert!(session.is_submitted());
    assert_eq!(session.submission_id(), Some(41));
    assert_eq!(api.submission_count(), 1);

    let recorded = api.last_submission();
    assert_eq!(recorded.quiz_id, QuizId::new(7));
    assert_eq!(recorded.answers.len(), 2);
    assert_eq!(recorded.answers[&QuestionId::new(2)], "x = 4");
}

#[tokio::test]
async fn untouched_sheet_gates_on_every_question() {
    let api = FakeApi::new(fixture(3, None), Vec::new());
    let workflow = workflow(api);

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    let gate = session.request_submit().unwrap();

    assert_eq!(
        gate,
        SubmitGate::Confirm {
            unanswered: vec![QuestionId::new(1), QuestionId::new(2), QuestionId::new(3)]
        }
    );
    session.decline_submit().unwrap();
    assert_eq!(session.phase(), &SubmitPhase::Editing);
}

#[tokio::test]
async fn server_error_keeps_the_sheet_and_allows_retry() {
    let api = FakeApi::new(
        fixture(1, None),
        vec![
            Err(ApiError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            )),
            Ok(42),
        ],
    );
    let workflow = workflow(Arc::clone(&api));

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    session.answer_current("2");
    session.request_submit().unwrap();

    let err = workflow.submit(&mut session).await.unwrap_err();
    let SessionError::Api(api_err) = err else {
        panic!("expected an api error");
    };
    assert!(api_err.is_retryable());
    assert_eq!(session.phase(), &SubmitPhase::Failed);
    assert_eq!(session.answers().answer(QuestionId::new(1)), Some("2"));

    // Retry keeps what was typed and goes through.
    assert_eq!(session.request_submit().unwrap(), SubmitGate::Ready);
    workflow.submit(&mut session).await.unwrap();
    assert!(session.is_submitted());
    assert_eq!(api.submission_count(), 2);
}

#[tokio::test]
async fn retry_duration_counts_time_spent_in_flight() {
    let api = FakeApi::new(
        fixture(1, None),
        vec![
            Err(ApiError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            )),
            Ok(42),
        ],
    );
    let workflow = workflow(Arc::clone(&api));

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    session.answer_current("2");
    for _ in 0..10 {
        session.tick_elapsed();
    }
    session.request_submit().unwrap();
    workflow.submit(&mut session).await.unwrap_err();

    // Seconds that passed while the failed request was outstanding still
    // land on the clock before the retry.
    for _ in 0..3 {
        session.tick_elapsed();
    }
    session.request_submit().unwrap();
    workflow.submit(&mut session).await.unwrap();

    assert_eq!(api.submission_count(), 2);
    assert_eq!(api.last_submission().duration_secs, 13);
}

#[tokio::test]
async fn unauthorized_discards_the_sheet() {
    let api = FakeApi::new(fixture(1, None), vec![Err(ApiError::Unauthorized)]);
    let workflow = workflow(Arc::clone(&api));

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    session.answer_current("2");
    session.request_submit().unwrap();

    let err = workflow.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::Api(ApiError::Unauthorized)));
    assert!(session.answers().is_empty());
}

#[tokio::test]
async fn no_second_request_while_one_is_in_flight() {
    let api = FakeApi::new(fixture(1, None), vec![Ok(43)]);
    let workflow = workflow(Arc::clone(&api));

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    session.answer_current("2");
    session.request_submit().unwrap();

    // The request is staged; a second trigger must bounce before transmit.
    assert!(matches!(
        session.request_submit(),
        Err(SessionError::InFlight)
    ));

    workflow.submit(&mut session).await.unwrap();
    assert!(matches!(
        session.request_submit(),
        Err(SessionError::Completed)
    ));
    assert_eq!(api.submission_count(), 1);
}

#[tokio::test]
async fn submit_without_a_request_sends_nothing() {
    let api = FakeApi::new(fixture(1, None), Vec::new());
    let workflow = workflow(Arc::clone(&api));

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    let err = workflow.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::NotSubmitting));
    assert_eq!(api.submission_count(), 0);
}

#[tokio::test]
async fn time_up_submission_reports_the_elapsed_duration() {
    let api = FakeApi::new(fixture(2, Some(1)), vec![Ok(44)]);
    let workflow = workflow(Arc::clone(&api));

    let mut session = workflow.start(QuizId::new(7)).await.unwrap();
    session.answer_current("2");

    // One simulated minute on both counters.
    for _ in 0..60 {
        session.tick_elapsed();
        session.tick_countdown();
    }
    assert!(session.is_time_up());

    // The countdown forces the request, but the gate still applies.
    let gate = session.request_submit().unwrap();
    assert_eq!(
        gate,
        SubmitGate::Confirm {
            unanswered: vec![QuestionId::new(2)]
        }
    );
    session.confirm_submit().unwrap();
    workflow.submit(&mut session).await.unwrap();

    assert_eq!(api.submission_count(), 1);
    let recorded = api.last_submission();
    assert_eq!(recorded.duration_secs, 60);
}
