use async_trait::async_trait;
use chrono::{DateTime, Utc};

use quiz_core::model::{
    AnswerSheet, Question, QuestionId, QuestionReview, Quiz, QuizId, QuizResult, SubmissionInfo,
};

use crate::client::ApiClient;
use crate::dto::{
    ProblemDto, QuizDetailDto, QuizListItemDto, QuizResultDto, SubmitRequestDto, SubmitResponseDto,
};
use crate::error::ApiError;

/// A quiz plus its ordered questions, ready to hand to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDetail {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

/// One row of the quiz bank listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub kind: String,
    pub difficulty: String,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Network seam for the quiz-taking core. Implemented over HTTP in
/// production and by in-memory fakes in tests.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `GET /tests`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, and transport failures.
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ApiError>;

    /// `GET /tests/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, transport, and payload failures.
    async fn fetch_quiz(&self, id: QuizId) -> Result<QuizDetail, ApiError>;

    /// `POST /tests/{id}/submit` with the full answer sheet and the elapsed
    /// seconds measured by the session clock. Returns the submission id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, and transport failures.
    async fn submit_answers(
        &self,
        id: QuizId,
        answers: &AnswerSheet,
        duration_secs: u64,
    ) -> Result<i64, ApiError>;

    /// `GET /tests/{id}/result`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, transport, and payload failures.
    async fn fetch_result(&self, id: QuizId) -> Result<QuizResult, ApiError>;
}

/// `QuizApi` over the authenticated REST client.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: ApiClient,
}

impl HttpQuizApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ApiError> {
        let rows: Vec<QuizListItemDto> = self.client.get_json("/tests").await?;
        Ok(rows
            .into_iter()
            .map(|row| QuizSummary {
                id: QuizId::new(row.id),
                title: row.title,
                kind: row.kind,
                difficulty: row.difficulty,
                deadline: row.deadline.and_utc(),
                created_at: row.created_at.and_utc(),
            })
            .collect())
    }

    async fn fetch_quiz(&self, id: QuizId) -> Result<QuizDetail, ApiError> {
        let dto: QuizDetailDto = self.client.get_json(&format!("/tests/{id}")).await?;
        quiz_detail_from_dto(dto)
    }

    async fn submit_answers(
        &self,
        id: QuizId,
        answers: &AnswerSheet,
        duration_secs: u64,
    ) -> Result<i64, ApiError> {
        let body = SubmitRequestDto::from_sheet(answers, duration_secs);
        let response: SubmitResponseDto = self
            .client
            .post_json(&format!("/tests/{id}/submit"), &body)
            .await?;
        Ok(response.id)
    }

    async fn fetch_result(&self, id: QuizId) -> Result<QuizResult, ApiError> {
        let dto: QuizResultDto = self.client.get_json(&format!("/tests/{id}/result")).await?;
        quiz_result_from_dto(dto)
    }
}

fn quiz_detail_from_dto(dto: QuizDetailDto) -> Result<QuizDetail, ApiError> {
    let quiz = Quiz::new(
        QuizId::new(dto.test_info.id),
        dto.test_info.title,
        dto.test_info.estimated_time,
        dto.test_info.deadline.and_utc(),
    )
    .map_err(|err| ApiError::Decode(err.to_string()))?;

    let questions = dto
        .problems
        .into_iter()
        .map(question_from_dto)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizDetail { quiz, questions })
}

fn question_from_dto(dto: ProblemDto) -> Result<Question, ApiError> {
    Question::new(QuestionId::new(dto.id), dto.content, dto.kind, dto.options)
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn quiz_result_from_dto(dto: QuizResultDto) -> Result<QuizResult, ApiError> {
    let info = dto.submission_info;
    let submission = SubmissionInfo::new(
        info.score,
        info.total_count,
        info.correct_count,
        info.duration,
    )
    .map_err(|err| ApiError::Decode(err.to_string()))?;

    let questions = dto
        .problems
        .into_iter()
        .map(|p| QuestionReview {
            content: p.content,
            user_answer: p.user_answer,
            correct_answer: p.correct_answer,
            explanation: p.explanation,
        })
        .collect();

    Ok(QuizResult {
        submission,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{SubmissionInfoDto, TestInfoDto};
    use quiz_core::model::QuestionKind;

    fn naive(ts: &str) -> chrono::NaiveDateTime {
        ts.parse().unwrap()
    }

    #[test]
    fn detail_conversion_builds_domain_types() {
        let dto = QuizDetailDto {
            test_info: TestInfoDto {
                id: 7,
                title: "Algebra I".into(),
                estimated_time: Some(30),
                deadline: naive("2024-06-01T12:00:00"),
            },
            problems: vec![ProblemDto {
                id: 1,
                content: "1+1=?".into(),
                kind: QuestionKind::SingleChoice,
                options: vec!["1".into(), "2".into()],
            }],
        };

        let detail = quiz_detail_from_dto(dto).unwrap();
        assert_eq!(detail.quiz.id(), QuizId::new(7));
        assert_eq!(detail.quiz.estimated_minutes(), Some(30));
        assert_eq!(detail.questions.len(), 1);
        assert_eq!(detail.questions[0].id(), QuestionId::new(1));
    }

    #[test]
    fn detail_conversion_rejects_invalid_payloads() {
        let dto = QuizDetailDto {
            test_info: TestInfoDto {
                id: 7,
                title: "Algebra I".into(),
                estimated_time: None,
                deadline: naive("2024-06-01T12:00:00"),
            },
            problems: vec![ProblemDto {
                id: 1,
                content: "pick one".into(),
                kind: QuestionKind::SingleChoice,
                options: vec!["only".into()],
            }],
        };

        let err = quiz_detail_from_dto(dto).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn result_conversion_rejects_count_mismatch() {
        let dto = QuizResultDto {
            submission_info: SubmissionInfoDto {
                score: 100.0,
                total_count: 1,
                correct_count: 2,
                duration: 60,
            },
            problems: Vec::new(),
        };

        let err = quiz_result_from_dto(dto).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
