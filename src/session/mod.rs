//! View state for the chat, quiz and focus screens and the shell that
//! routes between them

pub mod app;
pub mod chat;
pub mod focus;
pub mod quiz;
pub mod task;

pub use app::{AppController, AppState};
pub use chat::ChatThread;
pub use focus::FocusTimer;
pub use quiz::{QuizArena, QuizProgress};
pub use task::{RequestHandle, spawn_request};
