use serde_json::{Value, json};

/// Structured output contract for quiz requests, in the completion API's
/// schema dialect.
#[must_use]
pub fn quiz_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": { "type": "STRING" },
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        },
                        "correctAnswerIndex": { "type": "NUMBER" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["question", "options", "correctAnswerIndex", "explanation"]
                }
            }
        },
        "required": ["topic", "questions"]
    })
}
