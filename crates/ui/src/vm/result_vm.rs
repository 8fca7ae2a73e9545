use quiz_core::model::QuizResult;

use crate::vm::time_fmt::format_clock;

#[derive(Clone, Debug, PartialEq)]
pub struct ResultVm {
    pub score: f64,
    pub total: u32,
    pub correct: u32,
    pub duration_str: String,
    pub reviews: Vec<ReviewVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub content: String,
    /// "未作答" when the question was skipped.
    pub user_answer_str: String,
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
}

#[must_use]
pub fn map_result(result: &QuizResult) -> ResultVm {
    ResultVm {
        score: result.submission.score(),
        total: result.submission.total_count(),
        correct: result.submission.correct_count(),
        duration_str: format_clock(result.submission.duration_secs()),
        reviews: result
            .questions
            .iter()
            .map(|review| ReviewVm {
                content: review.content.clone(),
                user_answer_str: review
                    .user_answer
                    .clone()
                    .unwrap_or_else(|| "未作答".into()),
                correct_answer: review.correct_answer.clone(),
                explanation: review.explanation.clone(),
                is_correct: review.is_correct(),
            })
            .collect(),
    }
}
