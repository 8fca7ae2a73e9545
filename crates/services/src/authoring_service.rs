use chrono::{DateTime, Utc};
use thiserror::Error;

use quiz_core::model::QuizId;

use crate::client::ApiClient;
use crate::dto::{CreateQuizDto, CreateQuizQuestionDto, CreatedDto};
use crate::error::ApiError;

/// Errors emitted by `AuthoringService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthoringError {
    #[error("quiz title is empty")]
    EmptyTitle,

    #[error("quiz has no questions")]
    NoQuestions,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A quiz as a teacher drafts it: problem references in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizDraft {
    pub title: String,
    pub kind: String,
    pub difficulty: String,
    pub deadline: DateTime<Utc>,
    pub questions: Vec<NewQuizQuestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewQuizQuestion {
    pub problem_id: u64,
}

/// Teacher-side quiz creation.
#[derive(Clone)]
pub struct AuthoringService {
    client: ApiClient,
}

impl AuthoringService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /tests`. Question order follows the draft's vector order.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::EmptyTitle` or `AuthoringError::NoQuestions`
    /// before any request is made; `AuthoringError::Api` for request failures.
    pub async fn create_quiz(&self, draft: &NewQuizDraft) -> Result<QuizId, AuthoringError> {
        if draft.title.trim().is_empty() {
            return Err(AuthoringError::EmptyTitle);
        }
        if draft.questions.is_empty() {
            return Err(AuthoringError::NoQuestions);
        }

        let body = CreateQuizDto {
            title: draft.title.clone(),
            kind: draft.kind.clone(),
            difficulty: draft.difficulty.clone(),
            deadline: draft.deadline.naive_utc(),
            questions: draft
                .questions
                .iter()
                .enumerate()
                .map(|(index, q)| CreateQuizQuestionDto {
                    problem_id: q.problem_id,
                    order: u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1),
                })
                .collect(),
        };

        let created: CreatedDto = self.client.post_json("/tests", &body).await?;
        Ok(QuizId::new(created.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::repository::InMemoryCredentialStore;

    fn service() -> AuthoringService {
        let client = ApiClient::new(
            "http://127.0.0.1:9/api",
            Arc::new(InMemoryCredentialStore::new()),
        )
        .unwrap();
        AuthoringService::new(client)
    }

    fn draft(title: &str, questions: Vec<NewQuizQuestion>) -> NewQuizDraft {
        NewQuizDraft {
            title: title.into(),
            kind: "math".into(),
            difficulty: "medium".into(),
            deadline: quiz_core::time::fixed_now(),
            questions,
        }
    }

    #[tokio::test]
    async fn empty_title_fails_before_any_request() {
        let err = service()
            .create_quiz(&draft(" ", vec![NewQuizQuestion { problem_id: 1 }]))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthoringError::EmptyTitle));
    }

    #[tokio::test]
    async fn no_questions_fails_before_any_request() {
        let err = service()
            .create_quiz(&draft("Algebra I", Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthoringError::NoQuestions));
    }
}
