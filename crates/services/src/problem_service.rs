use quiz_core::model::QuestionKind;

use crate::client::ApiClient;
use crate::dto::{ProblemDetailDto, ProblemSummaryDto};
use crate::error::ApiError;

/// One row of the problem bank listing. Students additionally see their own
/// completion status; teachers do not get one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSummary {
    pub id: u64,
    pub title: String,
    pub kind: String,
    pub difficulty: String,
    pub topics: Vec<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDetail {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub topics: Vec<String>,
    pub difficulty: String,
}

/// Read access to the problem bank.
#[derive(Clone)]
pub struct ProblemService {
    client: ApiClient,
}

impl ProblemService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /problems`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, and transport failures.
    pub async fn list_problems(&self) -> Result<Vec<ProblemSummary>, ApiError> {
        let rows: Vec<ProblemSummaryDto> = self.client.get_json("/problems").await?;
        Ok(rows
            .into_iter()
            .map(|row| ProblemSummary {
                id: row.id,
                title: row.title,
                kind: row.kind,
                difficulty: row.difficulty,
                topics: row.topics,
                status: row.status,
            })
            .collect())
    }

    /// `GET /problems/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, and transport failures.
    pub async fn get_problem(&self, id: u64) -> Result<ProblemDetail, ApiError> {
        let dto: ProblemDetailDto = self.client.get_json(&format!("/problems/{id}")).await?;
        Ok(ProblemDetail {
            id: dto.id,
            title: dto.title,
            content: dto.content,
            kind: dto.kind,
            options: dto.options,
            topics: dto.topics,
            difficulty: dto.difficulty,
        })
    }
}
