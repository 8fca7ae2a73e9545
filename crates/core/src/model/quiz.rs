use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::QuizId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title is empty")]
    EmptyTitle,
}

/// Quiz metadata as loaded into a session. Immutable once constructed;
/// the ordered question list lives alongside it in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    title: String,
    estimated_minutes: Option<u32>,
    deadline: DateTime<Utc>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTitle` if the title is blank.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        estimated_minutes: Option<u32>,
        deadline: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }

        Ok(Self {
            id,
            title,
            estimated_minutes,
            deadline,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Estimated duration in minutes, when the author provided one.
    /// Drives the session countdown; `None` means no countdown.
    #[must_use]
    pub fn estimated_minutes(&self) -> Option<u32> {
        self.estimated_minutes
    }

    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    #[must_use]
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline
    }
}
