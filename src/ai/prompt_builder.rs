//! Instruction text sent to the completion API.

/// Number of questions requested per generated quiz.
pub const QUIZ_QUESTION_COUNT: usize = 3;

/// System instruction attached to explanation requests.
pub const SYSTEM_INSTRUCTION: &str = "You are StudySpark, a friendly AI study buddy. \
    You help students on low-end phones, so you keep answers very short, clear, and encouraging. \
    Never lecture.";

/// Builds the explanation prompt. The topic is interpolated as-is.
#[must_use]
pub fn build_explain_prompt(topic: &str, simplify: bool) -> String {
    if simplify {
        format!(
            "Explain \"{topic}\" to me like I'm 10 years old. \
             Use very simple words and a fun example. Keep it under 3 sentences."
        )
    } else {
        format!(
            "Explain \"{topic}\" simply and clearly for a student. \
             Include one key fact. Keep it short and friendly."
        )
    }
}

#[must_use]
pub fn build_quiz_prompt(topic: &str) -> String {
    format!("Create a mini quiz about \"{topic}\" with {QUIZ_QUESTION_COUNT} questions.")
}

#[must_use]
pub fn build_motivation_prompt() -> String {
    "Give me a super short (5 words max) high-energy compliment for a student studying hard."
        .to_string()
}
