use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::StudyError;

/// Identifier of the opening assistant message in every chat thread.
pub const GREETING_ID: &str = "greeting";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    #[serde(default)]
    pub is_simplification: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), false)
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>, is_simplification: bool) -> Self {
        Self::new(Role::Assistant, text.into(), is_simplification)
    }

    #[must_use]
    pub fn greeting(text: impl Into<String>) -> Self {
        Self {
            id: GREETING_ID.to_string(),
            role: Role::Assistant,
            text: text.into(),
            is_simplification: false,
            created_at: Utc::now(),
        }
    }

    fn new(role: Role, text: String, is_simplification: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text,
            is_simplification,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_greeting(&self) -> bool {
        self.id == GREETING_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Checks the invariants the quiz arena relies on: at least one question,
    /// at least two options per question and an answer index inside the
    /// option list.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::InvalidQuiz` describing the first violation.
    pub fn validate(&self) -> Result<(), StudyError> {
        if self.questions.is_empty() {
            return Err(StudyError::InvalidQuiz(format!(
                "quiz about \"{}\" has no questions",
                self.topic
            )));
        }

        for (n, q) in self.questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(StudyError::InvalidQuiz(format!(
                    "question {} has {} option(s), need at least 2",
                    n + 1,
                    q.options.len()
                )));
            }
            if q.correct_answer_index >= q.options.len() {
                return Err(StudyError::InvalidQuiz(format!(
                    "question {} answer index {} is out of range for {} options",
                    n + 1,
                    q.correct_answer_index,
                    q.options.len()
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(deserialize_with = "deserialize_answer_index")]
    pub correct_answer_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer_index
    }
}

// The schema declares the index as a JSON number, so models sometimes send `1.0`.
fn deserialize_answer_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = raw.as_u64() {
        return usize::try_from(n).map_err(D::Error::custom);
    }
    match raw.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as usize),
        _ => Err(D::Error::custom(format!(
            "correctAnswerIndex must be a non-negative integer, got {raw}"
        ))),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Chat,
    Quiz,
    Focus,
}

impl View {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            View::Chat => "Ask",
            View::Quiz => "Quiz",
            View::Focus => "Focus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub streak: u32,
    pub topics_learned: u32,
    pub focus_minutes: u32,
}

/// Streak shown on a fresh start.
pub const INITIAL_STREAK: u32 = 3;

impl Default for StudyStats {
    fn default() -> Self {
        Self {
            streak: INITIAL_STREAK,
            topics_learned: 0,
            focus_minutes: 0,
        }
    }
}
