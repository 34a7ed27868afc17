//! Line commands understood by the interactive shell.

use studyspark::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Switch(View),
    /// `:quiz` with an optional explicit topic.
    Quiz(Option<String>),
    Simplify,
    Stats,
    Help,
    Quit,
    Text(String),
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  <text>            ask about a topic (chat view)
  :chat             switch to the chat view
  :quiz [topic]     quiz on a topic (defaults to the last question)
  :focus            start the focus timer
  :simplify         explain the last topic like you're 10
  :stats            show your streak
  :help             show this help
  :quit             leave StudySpark";

#[must_use]
pub fn parse_shell_command(line: &str) -> Option<ShellCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Some(ShellCommand::Text(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let cmd = match name.to_ascii_lowercase().as_str() {
        "chat" | "ask" => ShellCommand::Switch(View::Chat),
        "focus" => ShellCommand::Switch(View::Focus),
        "quiz" => ShellCommand::Quiz((!arg.is_empty()).then(|| arg.to_string())),
        "simplify" | "s" => ShellCommand::Simplify,
        "stats" => ShellCommand::Stats,
        "help" | "h" | "?" => ShellCommand::Help,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other.to_string()),
    };
    Some(cmd)
}

/// Parses a 1-based option number typed during a quiz.
#[must_use]
pub fn parse_option_choice(line: &str, option_count: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    (1..=option_count).contains(&n).then(|| n - 1)
}
