//! Wire shapes for the education platform REST API.
//!
//! The server emits naive ISO-8601 timestamps (`isoformat()` without an
//! offset), so date fields come in as `NaiveDateTime` and are pinned to UTC
//! at the conversion boundary.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use quiz_core::model::{AnswerSheet, QuestionKind};

/// `GET /tests/{id}` response.
#[derive(Debug, Deserialize)]
pub struct QuizDetailDto {
    pub test_info: TestInfoDto,
    pub problems: Vec<ProblemDto>,
}

#[derive(Debug, Deserialize)]
pub struct TestInfoDto {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub estimated_time: Option<u32>,
    pub deadline: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ProblemDto {
    pub id: u64,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
}

/// `POST /tests/{id}/submit` request body.
#[derive(Debug, Serialize)]
pub struct SubmitRequestDto {
    pub answers: BTreeMap<String, String>,
    pub duration: u64,
}

impl SubmitRequestDto {
    /// Build the submit body from the full answer sheet, blanks included.
    #[must_use]
    pub fn from_sheet(sheet: &AnswerSheet, duration_secs: u64) -> Self {
        Self {
            answers: sheet
                .entries()
                .map(|(id, value)| (id.to_string(), value.to_string()))
                .collect(),
            duration: duration_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponseDto {
    pub id: i64,
}

/// `GET /tests/{id}/result` response.
#[derive(Debug, Deserialize)]
pub struct QuizResultDto {
    pub submission_info: SubmissionInfoDto,
    pub problems: Vec<QuestionReviewDto>,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionInfoDto {
    pub score: f64,
    pub total_count: u32,
    pub correct_count: u32,
    pub duration: u64,
}

#[derive(Debug, Deserialize)]
pub struct QuestionReviewDto {
    pub content: String,
    #[serde(default)]
    pub user_answer: Option<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// One entry of the `GET /tests` listing.
#[derive(Debug, Deserialize)]
pub struct QuizListItemDto {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub deadline: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// `POST /tests` request body (teacher authoring).
#[derive(Debug, Serialize)]
pub struct CreateQuizDto {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub deadline: NaiveDateTime,
    pub questions: Vec<CreateQuizQuestionDto>,
}

#[derive(Debug, Serialize)]
pub struct CreateQuizQuestionDto {
    #[serde(rename = "problemId")]
    pub problem_id: u64,
    pub order: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreatedDto {
    pub id: u64,
}

/// One entry of the `GET /problems` listing.
#[derive(Debug, Deserialize)]
pub struct ProblemSummaryDto {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /problems/{id}` response.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailDto {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub difficulty: String,
}
