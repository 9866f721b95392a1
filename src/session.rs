//! Answer/reveal interaction for one displayed question.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Question;

/// Where a session is in its lifecycle. `Answered` and `Revealed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unanswered,
    Answered,
    Revealed,
}

/// How an answer should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    ChosenWrong,
    Other,
}

/// In-memory state for one rendering of the daily question. Never persisted.
#[derive(Debug, Clone)]
pub struct QuizSession {
    question: Question,
    presented_order: Vec<String>,
    state: SessionState,
    selected: Option<String>,
}

impl QuizSession {
    /// Shuffles the answers once; the order stays fixed for the session.
    pub fn new(question: Question, rng: &mut impl Rng) -> Self {
        let mut presented_order = question.all_answers();
        presented_order.shuffle(rng);

        Self {
            question,
            presented_order,
            state: SessionState::Unanswered,
            selected: None,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn presented_order(&self) -> &[String] {
        &self.presented_order
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// True once no further interaction is accepted.
    pub fn is_locked(&self) -> bool {
        self.state != SessionState::Unanswered
    }

    /// Records `choice`. Returns `false` (and changes nothing) if the
    /// session is already terminal.
    pub fn select_answer(&mut self, choice: &str) -> bool {
        if self.is_locked() {
            return false;
        }
        self.selected = Some(choice.to_string());
        self.state = SessionState::Answered;
        true
    }

    /// Shows the correct answer without selecting. Returns `false` if the
    /// session is already terminal.
    pub fn reveal(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        self.state = SessionState::Revealed;
        true
    }

    /// Whether the selection was right; `None` unless answered.
    pub fn is_correct(&self) -> Option<bool> {
        match (self.state, &self.selected) {
            (SessionState::Answered, Some(choice)) => Some(self.question.is_correct(choice)),
            _ => None,
        }
    }

    /// The correct answer, once the session is terminal.
    pub fn revealed_answer(&self) -> Option<&str> {
        self.is_locked()
            .then_some(self.question.correct_answer.as_str())
    }

    pub fn mark(&self, answer: &str) -> AnswerMark {
        match self.state {
            SessionState::Unanswered => AnswerMark::Other,
            _ if self.question.is_correct(answer) => AnswerMark::Correct,
            SessionState::Answered if self.selected.as_deref() == Some(answer) => {
                AnswerMark::ChosenWrong
            }
            _ => AnswerMark::Other,
        }
    }

    /// Presented answers paired with their marks, in display order.
    pub fn marks(&self) -> Vec<(&str, AnswerMark)> {
        self.presented_order
            .iter()
            .map(|answer| (answer.as_str(), self.mark(answer)))
            .collect()
    }
}
