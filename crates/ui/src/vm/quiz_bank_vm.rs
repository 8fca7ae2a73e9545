use services::QuizSummary;

use crate::vm::time_fmt::format_datetime;

/// One row of the quiz bank table, strings pre-formatted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: u64,
    pub title: String,
    pub kind: String,
    pub difficulty: String,
    pub deadline_str: String,
}

#[must_use]
pub fn map_quiz_cards(items: &[QuizSummary]) -> Vec<QuizCardVm> {
    items
        .iter()
        .map(|item| QuizCardVm {
            id: item.id.value(),
            title: item.title.clone(),
            kind: item.kind.clone(),
            difficulty: item.difficulty.clone(),
            deadline_str: format_datetime(item.deadline),
        })
        .collect()
}
