use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("correct count ({correct}) exceeds total count ({total})")]
    CountMismatch { correct: u32, total: u32 },
}

/// Aggregate numbers for one graded submission, as computed by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInfo {
    score: f64,
    total_count: u32,
    correct_count: u32,
    duration_secs: u64,
}

impl SubmissionInfo {
    /// # Errors
    ///
    /// Returns `SubmissionError::CountMismatch` if more questions are marked
    /// correct than exist.
    pub fn new(
        score: f64,
        total_count: u32,
        correct_count: u32,
        duration_secs: u64,
    ) -> Result<Self, SubmissionError> {
        if correct_count > total_count {
            return Err(SubmissionError::CountMismatch {
                correct: correct_count,
                total: total_count,
            });
        }

        Ok(Self {
            score,
            total_count,
            correct_count,
            duration_secs,
        })
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }
}

/// Server-side grading detail for one question of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub content: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl QuestionReview {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.user_answer.as_deref() == Some(self.correct_answer.as_str())
    }
}

/// A graded quiz attempt: the aggregate plus per-question detail.
/// Read-only to the client; fetched fresh when the result view opens.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub submission: SubmissionInfo,
    pub questions: Vec<QuestionReview>,
}
