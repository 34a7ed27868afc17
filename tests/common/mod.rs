#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use studyspark::StudyError;
use studyspark::ai::{CompletionBackend, CompletionRequest, StudyGateway};

pub enum Reply {
    Text(String),
    NoText,
    Fail(StudyError),
}

/// Backend double that replays canned replies and records every request.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, StudyError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(t)) => Ok(Some(t)),
            Some(Reply::NoText) | None => Ok(None),
            Some(Reply::Fail(e)) => Err(e),
        }
    }
}

pub fn gateway(replies: Vec<Reply>) -> (StudyGateway<ScriptedBackend>, Arc<ScriptedBackend>) {
    let backend = ScriptedBackend::new(replies);
    (StudyGateway::new(Arc::clone(&backend)), backend)
}

pub fn gravity_quiz_json() -> String {
    r#"```json
{
  "topic": "gravity",
  "questions": [
    {
      "question": "What pulls objects toward Earth?",
      "options": ["Magnetism", "Gravity", "Friction"],
      "correctAnswerIndex": 1,
      "explanation": "Gravity pulls masses toward each other."
    },
    {
      "question": "Who described universal gravitation?",
      "options": ["Newton", "Darwin", "Curie", "Tesla"],
      "correctAnswerIndex": 0,
      "explanation": "Isaac Newton published it in 1687."
    },
    {
      "question": "Would you weigh less on the Moon?",
      "options": ["Yes", "No"],
      "correctAnswerIndex": 0,
      "explanation": "The Moon's gravity is about 1/6 of Earth's."
    }
  ]
}
```"#
    .to_string()
}
