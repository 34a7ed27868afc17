use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("No API key has been selected")]
    MissingApiKey,

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Completion API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion API returned no text")]
    EmptyResponse,

    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    #[error("Quiz payload failed validation: {0}")]
    InvalidQuiz(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StudyError {
    /// True for failures raised while talking to the completion API, as
    /// opposed to failures interpreting what it returned.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            StudyError::MissingApiKey | StudyError::Http(_) | StudyError::Api { .. }
        )
    }
}

impl From<reqwest::Error> for StudyError {
    fn from(error: reqwest::Error) -> Self {
        StudyError::Http(error.to_string())
    }
}

impl From<serde_json::Error> for StudyError {
    fn from(error: serde_json::Error) -> Self {
        StudyError::Parse(error.to_string())
    }
}

impl From<anyhow::Error> for StudyError {
    fn from(error: anyhow::Error) -> Self {
        StudyError::Http(error.to_string())
    }
}
