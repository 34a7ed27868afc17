//! StudySpark - a pocket study buddy that explains topics, builds quizzes and
//! runs focus sessions using a hosted generative-language API.
//!
//! # Architecture
//!
//! The crate is layered as:
//! - `ai`: prompt construction, the completion API client, response parsing
//!   and the `StudyGateway` that ties them together
//! - `session`: state for the chat, quiz and focus views and the controller
//!   that routes between them
//! - `host`: the API-key selection collaborator
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use studyspark::ai::{GeminiClient, StudyGateway};
//! use studyspark::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     studyspark::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let gateway = StudyGateway::new(Arc::new(GeminiClient::new(&config)?));
//!
//!     println!("{}", gateway.explain("photosynthesis", false).await);
//!
//!     if let Some(quiz) = gateway.generate_quiz("photosynthesis").await {
//!         for q in &quiz.questions {
//!             println!("{} {:?}", q.question, q.options);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod host;
pub mod session;

pub use ai::{AiOutcome, StudyGateway};
pub use crate::core::models::{ChatMessage, Quiz, QuizQuestion, Role, View};
pub use errors::StudyError;

/// Configure structured logging.
///
/// Installs a JSON formatter on stderr filtered by `RUST_LOG` (default
/// `warn`), so log lines never interleave with the interactive output on
/// stdout. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// studyspark::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
