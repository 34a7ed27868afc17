use tracing::info;

use crate::ai::{CompletionBackend, StudyGateway};
use crate::core::models::{Quiz, QuizQuestion};

/// Shown after an answer is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizProgress {
    /// Moved on to the question at this index.
    Advanced(usize),
    /// The last question was answered; reported once per quiz.
    Completed { score: u32, total: usize },
    /// Nothing to advance: no quiz loaded or the current question is
    /// still unanswered.
    Idle,
}

/// The quiz view: walks through one quiz question by question.
#[derive(Debug, Clone, Default)]
pub struct QuizArena {
    quiz: Option<Quiz>,
    current: usize,
    score: u32,
    selected: Option<usize>,
    show_feedback: bool,
}

impl QuizArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was loaded and starts from the first question.
    pub fn load(&mut self, quiz: Option<Quiz>) {
        self.quiz = quiz;
        self.current = 0;
        self.score = 0;
        self.selected = None;
        self.show_feedback = false;
    }

    pub async fn load_topic<B>(&mut self, gateway: &StudyGateway<B>, topic: &str) -> bool
    where
        B: CompletionBackend + ?Sized,
    {
        info!(topic = %topic, "Loading quiz");
        let quiz = gateway.generate_quiz(topic).await;
        self.load(quiz);
        self.quiz.is_some()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.as_ref()?.questions.get(self.current)
    }

    #[must_use]
    pub const fn showing_feedback(&self) -> bool {
        self.show_feedback
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.quiz
            .as_ref()
            .is_some_and(|q| self.current + 1 >= q.questions.len())
    }

    /// Records an answer. Ignored while feedback is already showing, without
    /// a quiz, or for an option that does not exist.
    pub fn select_option(&mut self, index: usize) -> Option<AnswerFeedback> {
        if self.show_feedback {
            return None;
        }
        let question = self.current_question()?;
        if index >= question.options.len() {
            return None;
        }

        let feedback = AnswerFeedback {
            selected: index,
            correct_index: question.correct_answer_index,
            is_correct: question.is_correct(index),
            explanation: question.explanation.clone(),
        };

        self.selected = Some(index);
        self.show_feedback = true;
        if feedback.is_correct {
            self.score += 1;
        }
        Some(feedback)
    }

    pub fn next_question(&mut self) -> QuizProgress {
        let Some(quiz) = &self.quiz else {
            return QuizProgress::Idle;
        };
        if !self.show_feedback {
            return QuizProgress::Idle;
        }

        if self.current + 1 < quiz.questions.len() {
            self.current += 1;
            self.selected = None;
            self.show_feedback = false;
            QuizProgress::Advanced(self.current)
        } else {
            let total = quiz.questions.len();
            let score = self.score;
            info!(score, total, "Quiz finished");
            self.quiz = None;
            self.show_feedback = false;
            self.selected = None;
            QuizProgress::Completed { score, total }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_quiz() -> Quiz {
        Quiz {
            topic: "colors".into(),
            questions: vec![
                QuizQuestion {
                    question: "Sky?".into(),
                    options: vec!["blue".into(), "green".into()],
                    correct_answer_index: 0,
                    explanation: "Rayleigh scattering.".into(),
                },
                QuizQuestion {
                    question: "Grass?".into(),
                    options: vec!["red".into(), "green".into()],
                    correct_answer_index: 1,
                    explanation: "Chlorophyll.".into(),
                },
            ],
        }
    }

    #[test]
    fn test_second_answer_is_ignored_while_feedback_shows() {
        let mut arena = QuizArena::new();
        arena.load(Some(two_question_quiz()));

        assert!(arena.select_option(0).unwrap().is_correct);
        assert_eq!(arena.select_option(1), None);
        assert_eq!(arena.score(), 1);
    }

    #[test]
    fn test_next_requires_an_answer() {
        let mut arena = QuizArena::new();
        arena.load(Some(two_question_quiz()));
        assert_eq!(arena.next_question(), QuizProgress::Idle);
        assert_eq!(arena.current_index(), 0);
    }

    #[test]
    fn test_out_of_range_option_is_rejected() {
        let mut arena = QuizArena::new();
        arena.load(Some(two_question_quiz()));
        assert_eq!(arena.select_option(5), None);
        assert!(!arena.showing_feedback());
    }

    #[test]
    fn test_completion_clears_quiz() {
        let mut arena = QuizArena::new();
        arena.load(Some(two_question_quiz()));

        arena.select_option(1);
        assert_eq!(arena.next_question(), QuizProgress::Advanced(1));
        assert!(arena.is_last_question());
        arena.select_option(1);
        assert_eq!(
            arena.next_question(),
            QuizProgress::Completed { score: 1, total: 2 }
        );
        assert!(arena.quiz().is_none());
        assert_eq!(arena.next_question(), QuizProgress::Idle);
    }

    #[test]
    fn test_load_none_leaves_empty_arena() {
        let mut arena = QuizArena::new();
        arena.load(None);
        assert!(arena.current_question().is_none());
        assert_eq!(arena.select_option(0), None);
    }
}
