//! All AI/LLM functionality

pub mod client;
pub mod gateway;
pub mod parser;
pub mod prompt_builder;
pub mod schema;

// Re-export main types for convenience
pub use client::{CompletionBackend, CompletionRequest, GeminiClient};
pub use gateway::{AiOutcome, StudyGateway};
pub use parser::parse_ai_json;
