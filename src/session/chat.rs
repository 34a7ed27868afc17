use tracing::info;

use crate::ai::gateway::{EXPLAIN_EMPTY_FALLBACK, EXPLAIN_ERROR_FALLBACK};
use crate::ai::{AiOutcome, CompletionBackend, StudyGateway};
use crate::core::models::{ChatMessage, Role};

pub const GREETING_TEXT: &str = "Hi! I'm StudySpark. What do you want to learn today?";

/// A reply appended to the thread.
#[derive(Debug, Clone, Copy)]
pub struct ChatReply<'a> {
    pub message: &'a ChatMessage,
    /// False when the message is a fallback rather than a real explanation.
    pub answered: bool,
}

/// The chat view: an append-only message list plus the loading flag that
/// keeps requests one at a time.
#[derive(Debug, Clone)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl Default for ChatThread {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatThread {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::greeting(GREETING_TEXT)],
            loading: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Records the user's question and returns the topic to explain, or
    /// `None` if the input is blank or a request is already outstanding.
    pub fn begin_ask(&mut self, input: &str) -> Option<String> {
        let topic = input.trim();
        if topic.is_empty() || self.loading {
            return None;
        }

        self.messages.push(ChatMessage::user(topic));
        self.loading = true;
        Some(topic.to_string())
    }

    /// Starts a simplification of the latest topic. `None` while loading or
    /// before anything has been asked.
    pub fn begin_simplify(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        let topic = self.last_topic()?.to_string();
        self.loading = true;
        Some(topic)
    }

    pub fn finish(&mut self, text: String, is_simplification: bool) -> &ChatMessage {
        self.loading = false;
        self.messages
            .push(ChatMessage::assistant(text, is_simplification));
        &self.messages[self.messages.len() - 1]
    }

    /// Appends the reply for a finished explain request, rendering failures
    /// as the usual fallback text.
    pub fn finish_outcome(
        &mut self,
        outcome: AiOutcome<String>,
        is_simplification: bool,
    ) -> ChatReply<'_> {
        let answered = outcome.is_success();
        let text = outcome.text_or(EXPLAIN_EMPTY_FALLBACK, EXPLAIN_ERROR_FALLBACK);
        ChatReply {
            message: self.finish(text, is_simplification),
            answered,
        }
    }

    /// Clears the loading flag without a reply, e.g. after the request was
    /// cancelled.
    pub fn abandon(&mut self) {
        self.loading = false;
    }

    /// The most recent user question; target of "Simplify" and "Quiz Me".
    #[must_use]
    pub fn last_topic(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.text.as_str())
    }

    /// Whether `message` gets the Simplify / Quiz Me actions.
    #[must_use]
    pub fn offers_actions(message: &ChatMessage) -> bool {
        message.role == Role::Assistant && !message.is_simplification && !message.is_greeting()
    }

    pub async fn ask<B>(
        &mut self,
        gateway: &StudyGateway<B>,
        input: &str,
    ) -> Option<ChatReply<'_>>
    where
        B: CompletionBackend + ?Sized,
    {
        let topic = self.begin_ask(input)?;
        info!(topic = %topic, "Explaining topic");
        let outcome = gateway.try_explain(&topic, false).await;
        Some(self.finish_outcome(outcome, false))
    }

    pub async fn simplify<B>(&mut self, gateway: &StudyGateway<B>) -> Option<ChatReply<'_>>
    where
        B: CompletionBackend + ?Sized,
    {
        let topic = self.begin_simplify()?;
        info!(topic = %topic, "Simplifying explanation");
        let outcome = gateway.try_explain(&topic, true).await;
        Some(self.finish_outcome(outcome, true))
    }
}
