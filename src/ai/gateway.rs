//! Study-specific operations on top of a [`CompletionBackend`].
//!
//! Every operation makes exactly one request. The `try_*` methods report a
//! typed [`AiOutcome`]; the plain methods render that outcome into the text
//! the UI shows, so a failure never reaches the caller as an error.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, warn};

use super::client::{CompletionBackend, CompletionRequest};
use super::parser::try_parse_ai_json;
use super::prompt_builder::{
    SYSTEM_INSTRUCTION, build_explain_prompt, build_motivation_prompt, build_quiz_prompt,
};
use super::schema::quiz_response_schema;
use crate::core::models::Quiz;
use crate::errors::StudyError;

pub const EXPLAIN_EMPTY_FALLBACK: &str = "I couldn't explain that right now, but keep trying!";
pub const EXPLAIN_ERROR_FALLBACK: &str = "Oops, my brain froze! Try asking again.";
pub const MOTIVATION_FALLBACK: &str = "Keep going!";

/// What came back from one gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiOutcome<T> {
    Success(T),
    /// The API answered but with no usable text.
    Empty,
    /// The call itself failed (transport, status, missing key).
    NetworkError(String),
    /// Text arrived but could not be turned into the expected structure.
    ParseError(String),
}

impl<T> AiOutcome<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, AiOutcome::Success(_))
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            AiOutcome::Success(v) => Some(v),
            _ => None,
        }
    }

    fn from_error(error: StudyError) -> Self {
        match error {
            StudyError::EmptyResponse => AiOutcome::Empty,
            e if e.is_transport() => AiOutcome::NetworkError(e.to_string()),
            e => AiOutcome::ParseError(e.to_string()),
        }
    }
}

impl AiOutcome<String> {
    /// Renders the outcome with a fallback for empty results and another for
    /// every other failure.
    #[must_use]
    pub fn text_or(self, empty_fallback: &str, error_fallback: &str) -> String {
        match self {
            AiOutcome::Success(text) => text,
            AiOutcome::Empty => empty_fallback.to_string(),
            AiOutcome::NetworkError(_) | AiOutcome::ParseError(_) => error_fallback.to_string(),
        }
    }
}

pub struct StudyGateway<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for StudyGateway<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: CompletionBackend + ?Sized> StudyGateway<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    async fn request(&self, request: CompletionRequest) -> AiOutcome<String> {
        match self.backend.generate(&request).await {
            Ok(Some(text)) if !text.trim().is_empty() => AiOutcome::Success(text),
            Ok(_) => AiOutcome::Empty,
            Err(e) => {
                warn!("Completion request failed: {}", e);
                AiOutcome::from_error(e)
            }
        }
    }

    pub async fn try_explain(&self, topic: &str, simplify: bool) -> AiOutcome<String> {
        let request = CompletionRequest::new(build_explain_prompt(topic, simplify))
            .with_system_instruction(SYSTEM_INSTRUCTION);
        self.request(request).await
    }

    /// Explains `topic`, always returning something to show.
    pub async fn explain(&self, topic: &str, simplify: bool) -> String {
        self.try_explain(topic, simplify)
            .await
            .text_or(EXPLAIN_EMPTY_FALLBACK, EXPLAIN_ERROR_FALLBACK)
    }

    pub async fn try_generate_quiz(&self, topic: &str) -> AiOutcome<Quiz> {
        let request = CompletionRequest::new(build_quiz_prompt(topic))
            .with_response_schema(quiz_response_schema());

        let text = match self.request(request).await {
            AiOutcome::Success(text) => text,
            AiOutcome::Empty => return AiOutcome::Empty,
            AiOutcome::NetworkError(e) => return AiOutcome::NetworkError(e),
            AiOutcome::ParseError(e) => return AiOutcome::ParseError(e),
        };

        match decode_quiz(&text) {
            Ok(quiz) => AiOutcome::Success(quiz),
            Err(e) => {
                error!(topic = %topic, "Quiz generation failed: {}", e);
                AiOutcome::from_error(e)
            }
        }
    }

    /// Generates a quiz, or `None` if anything went wrong along the way.
    pub async fn generate_quiz(&self, topic: &str) -> Option<Quiz> {
        self.try_generate_quiz(topic).await.into_option()
    }

    pub async fn try_motivation(&self) -> AiOutcome<String> {
        match self
            .request(CompletionRequest::new(build_motivation_prompt()))
            .await
        {
            AiOutcome::Success(text) => AiOutcome::Success(text.trim().to_string()),
            other => other,
        }
    }

    pub async fn get_motivation(&self) -> String {
        self.try_motivation()
            .await
            .text_or(MOTIVATION_FALLBACK, MOTIVATION_FALLBACK)
    }
}

fn decode_quiz(text: &str) -> Result<Quiz, StudyError> {
    let value: Value = try_parse_ai_json(Some(text))?;
    let quiz: Quiz = serde_json::from_value(value)?;
    quiz.validate()?;
    Ok(quiz)
}
