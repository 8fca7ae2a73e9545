use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question content is empty")]
    EmptyContent,

    #[error("single-choice question needs at least two options, got {0}")]
    TooFewOptions(usize),
}

/// Kind tag for an assessable item.
///
/// The wire tags are the API's short names; the Chinese labels appear in
/// older payloads and are accepted as aliases. Anything unrecognized is
/// treated as free-response, which is also how the answer input degrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "choice", alias = "选择题")]
    SingleChoice,
    #[serde(rename = "fill", alias = "填空题")]
    FillInBlank,
    #[serde(rename = "free", alias = "解答题", other)]
    FreeResponse,
}

impl QuestionKind {
    #[must_use]
    pub fn wire_tag(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "choice",
            QuestionKind::FillInBlank => "fill",
            QuestionKind::FreeResponse => "free",
        }
    }
}

/// A single assessable item within a quiz. Immutable during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    content: String,
    kind: QuestionKind,
    options: Vec<String>,
}

impl Question {
    /// Build a question, validating kind-specific invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyContent` if the content is blank.
    /// Returns `QuestionError::TooFewOptions` for a single-choice question
    /// with fewer than two options.
    pub fn new(
        id: QuestionId,
        content: impl Into<String>,
        kind: QuestionKind,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(QuestionError::EmptyContent);
        }
        if kind == QuestionKind::SingleChoice && options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }

        Ok(Self {
            id,
            content,
            kind,
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Ordered option texts; empty for non-choice questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}
