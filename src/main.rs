mod shell;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use shell::{HELP_TEXT, ShellCommand, parse_option_choice, parse_shell_command};
use studyspark::ai::{GeminiClient, StudyGateway};
use studyspark::core::config::{AppConfig, MAX_FOCUS_MINUTES};
use studyspark::host::EnvKeySelector;
use studyspark::session::focus::TickOutcome;
use studyspark::session::{
    AppController, ChatThread, FocusTimer, QuizArena, QuizProgress, RequestHandle, spawn_request,
};
use studyspark::{AiOutcome, Role, View};

type Gateway = StudyGateway<GeminiClient>;
type InputLines = Lines<BufReader<Stdin>>;

#[derive(Debug, Parser)]
#[command(name = "studyspark", version, about = "Your pocket AI study buddy")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Explain a topic
    Ask {
        #[arg(required = true)]
        topic: Vec<String>,
        /// Explain it like I'm 10
        #[arg(long)]
        simplify: bool,
    },
    /// Take a quick quiz on a topic
    Quiz {
        #[arg(required = true)]
        topic: Vec<String>,
    },
    /// Run a focus session
    Focus {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FOCUS_MINUTES)))]
        minutes: Option<u32>,
    },
    /// Get a quick burst of encouragement
    Motivate,
}

#[tokio::main]
async fn main() -> Result<()> {
    studyspark::setup_logging();
    let cli = Cli::parse();

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;
    let selector = EnvKeySelector::new(config.api_key.clone());
    let mut app = AppController::new();

    if !app.check_api_key(&selector).await {
        println!("Setup your workspace: StudySpark needs a Gemini API key to explain, quiz and cheer you on.");
        app.continue_from_key_dialog(&selector).await;
    }

    let gateway = StudyGateway::new(Arc::new(
        GeminiClient::new(&config).context("failed to create completion client")?,
    ));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match cli.command {
        Some(Command::Ask { topic, simplify }) => {
            println!("{}", gateway.explain(&topic.join(" "), simplify).await);
        }
        Some(Command::Quiz { topic }) => {
            let mut arena = QuizArena::new();
            run_quiz(&gateway, &mut app, &mut arena, &mut lines, &topic.join(" ")).await?;
        }
        Some(Command::Focus { minutes }) => {
            let mut timer = FocusTimer::new(minutes.unwrap_or(config.focus_minutes));
            run_focus(&gateway, &mut app, &mut timer, &mut lines).await?;
        }
        Some(Command::Motivate) => println!("{}", gateway.get_motivation().await),
        None => run_shell(&gateway, &mut app, &mut lines, config.focus_minutes).await?,
    }

    Ok(())
}

fn prompt(label: &str) -> Result<()> {
    print!("[{label}] > ");
    std::io::stdout().flush()?;
    Ok(())
}

async fn run_shell(
    gateway: &Gateway,
    app: &mut AppController,
    lines: &mut InputLines,
    focus_minutes: u32,
) -> Result<()> {
    let mut chat = ChatThread::new();
    let mut arena = QuizArena::new();
    let mut timer = FocusTimer::new(focus_minutes);

    println!("{}", chat.messages()[0].text);
    println!("(type :help for commands)");

    loop {
        prompt(app.active_view().label())?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = parse_shell_command(&line) else {
            continue;
        };

        match command {
            ShellCommand::Text(text) => {
                app.select_view(View::Chat);
                let Some(topic) = chat.begin_ask(&text) else {
                    continue;
                };
                let Some(outcome) = explain_cancellable(gateway, lines, topic, false).await? else {
                    chat.abandon();
                    println!("(cancelled)");
                    continue;
                };
                let reply = chat.finish_outcome(outcome, false);
                println!("{}", reply.message.text);
                if ChatThread::offers_actions(reply.message) {
                    println!("  (:simplify to make it simpler, :quiz to test yourself)");
                }
                if reply.answered {
                    app.record_topic_learned();
                }
            }
            ShellCommand::Simplify => {
                let Some(topic) = chat.begin_simplify() else {
                    println!("Ask me something first!");
                    continue;
                };
                match explain_cancellable(gateway, lines, topic, true).await? {
                    Some(outcome) => println!("{}", chat.finish_outcome(outcome, true).message.text),
                    None => {
                        chat.abandon();
                        println!("(cancelled)");
                    }
                }
            }
            ShellCommand::Quiz(topic) => {
                let Some(topic) = topic.or_else(|| chat.last_topic().map(str::to_string)) else {
                    println!("Ask a question in Chat to generate a quiz!");
                    continue;
                };
                app.start_quiz(topic.clone());
                run_quiz(gateway, app, &mut arena, lines, &topic).await?;
                app.select_view(View::Chat);
            }
            ShellCommand::Switch(View::Focus) => {
                app.select_view(View::Focus);
                run_focus(gateway, app, &mut timer, lines).await?;
                app.select_view(View::Chat);
            }
            ShellCommand::Switch(view) => app.select_view(view),
            ShellCommand::Stats => {
                let stats = app.state().stats;
                let asked = chat
                    .messages()
                    .iter()
                    .filter(|m| m.role == Role::User)
                    .count();
                println!(
                    "Streak: {} | Topics learned: {} | Focus minutes: {} | Questions this session: {}",
                    stats.streak, stats.topics_learned, stats.focus_minutes, asked
                );
            }
            ShellCommand::Help => println!("{HELP_TEXT}"),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(name) => println!("Unknown command :{name} (try :help)"),
        }
    }

    Ok(())
}

/// Runs one explain request in the background. A line typed before it
/// resolves cancels it and yields `None`.
async fn explain_cancellable(
    gateway: &Gateway,
    lines: &mut InputLines,
    topic: String,
    simplify: bool,
) -> Result<Option<AiOutcome<String>>> {
    println!("Thinking... (Enter to cancel)");
    let gw = gateway.clone();
    let request = spawn_request(async move { gw.try_explain(&topic, simplify).await });

    let join = request.join();
    tokio::pin!(join);
    tokio::select! {
        outcome = &mut join => Ok(outcome),
        line = lines.next_line() => match line? {
            Some(_) => {
                info!("Explain request cancelled");
                Ok(None)
            }
            None => Ok(join.await),
        },
    }
}

async fn run_quiz(
    gateway: &Gateway,
    app: &mut AppController,
    arena: &mut QuizArena,
    lines: &mut InputLines,
    topic: &str,
) -> Result<()> {
    println!("Cooking up a quiz about \"{topic}\"...");
    if !arena.load_topic(gateway, topic).await {
        println!("Couldn't build a quiz right now. Try again in a moment!");
        return Ok(());
    }

    loop {
        let Some(question) = arena.current_question().cloned() else {
            return Ok(());
        };
        let total = arena.quiz().map_or(0, |q| q.questions.len());
        println!(
            "\nQuestion {} / {}   Score: {}",
            arena.current_index() + 1,
            total,
            arena.score()
        );
        println!("{}", question.question);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let feedback = loop {
            prompt("Quiz")?;
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            if line.trim() == ":quit" {
                return Ok(());
            }
            if let Some(feedback) = parse_option_choice(&line, question.options.len())
                .and_then(|choice| arena.select_option(choice))
            {
                break feedback;
            }
            println!("Pick a number from 1 to {}", question.options.len());
        };

        if feedback.is_correct {
            println!("Correct! {}", feedback.explanation);
        } else {
            println!(
                "Not quite, it was {}. {}",
                question.options[feedback.correct_index], feedback.explanation
            );
        }

        match arena.next_question() {
            QuizProgress::Completed { score, total } => {
                let streak = app.complete_quiz();
                println!("\nQuiz finished: {score}/{total}. Streak is now {streak}!");
                return Ok(());
            }
            QuizProgress::Advanced(_) | QuizProgress::Idle => {}
        }
    }
}

async fn run_focus(
    gateway: &Gateway,
    app: &mut AppController,
    timer: &mut FocusTimer,
    lines: &mut InputLines,
) -> Result<()> {
    println!("Focus mode: Enter to start/pause, r to reset, q to leave.");
    println!("\"{}\"  {}", timer.quote(), timer.display());

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut motivation: Option<RequestHandle<String>> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if timer.wants_motivation() && motivation.is_none() {
                    let gw = gateway.clone();
                    motivation = Some(spawn_request(async move { gw.get_motivation().await }));
                }
                if motivation.as_ref().is_some_and(RequestHandle::is_finished)
                    && let Some(handle) = motivation.take()
                    && let Some(quote) = handle.join().await
                {
                    timer.set_quote(quote);
                    println!("\n\"{}\"", timer.quote());
                }

                match timer.tick() {
                    TickOutcome::Running { remaining } if remaining % 60 == 0 => {
                        println!("{} left", timer.display());
                    }
                    TickOutcome::Completed { minutes } => {
                        let streak = app.complete_focus_session(minutes);
                        info!(minutes, "Focus session recorded");
                        println!("\nSession complete! Streak is now {streak}.");
                    }
                    TickOutcome::Running { .. } | TickOutcome::Paused => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                match line.trim() {
                    "q" | ":quit" => return Ok(()),
                    "r" => {
                        timer.reset();
                        println!("Reset to {}", timer.display());
                    }
                    _ => {
                        let running = timer.toggle();
                        println!("{} {}", if running { "Running" } else { "Paused" }, timer.display());
                    }
                }
            }
        }
    }
}
