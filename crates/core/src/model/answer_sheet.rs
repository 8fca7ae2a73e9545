use std::collections::BTreeMap;

use crate::model::{Question, QuestionId};

/// The respondent's in-progress answers for one quiz attempt.
///
/// Writes are last-write-wins; absence of a key means "unanswered". An
/// explicitly blank value is stored as given but counts as unanswered for
/// completion purposes, so the confirmation gate treats it like a skip.
/// Entries are only removed by [`AnswerSheet::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    entries: BTreeMap<QuestionId, String>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite or insert the answer for a question unconditionally.
    pub fn set(&mut self, id: QuestionId, value: impl Into<String>) {
        self.entries.insert(id, value.into());
    }

    /// The stored value for a question, or `None` if never written.
    #[must_use]
    pub fn answer(&self, id: QuestionId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Whether the question has a non-blank answer.
    #[must_use]
    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.answer(id).is_some_and(|value| !value.trim().is_empty())
    }

    /// Number of questions from `questions` with a non-blank answer.
    /// Used for UI and confirmation messaging only.
    #[must_use]
    pub fn answered_count(&self, questions: &[Question]) -> usize {
        questions
            .iter()
            .filter(|q| self.is_answered(q.id()))
            .count()
    }

    /// Questions from `questions` still lacking a non-blank answer, in order.
    #[must_use]
    pub fn unanswered(&self, questions: &[Question]) -> Vec<QuestionId> {
        questions
            .iter()
            .filter(|q| !self.is_answered(q.id()))
            .map(Question::id)
            .collect()
    }

    /// All stored entries in question-id order, blanks included. This is
    /// what goes on the wire; the server sees exactly what was typed.
    pub fn entries(&self) -> impl Iterator<Item = (QuestionId, &str)> {
        self.entries.iter().map(|(id, value)| (*id, value.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard every entry. The only way answers are removed.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
