use thiserror::Error;

use crate::model::{QuestionError, QuizError, SubmissionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
