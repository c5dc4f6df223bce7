//! `commtrainer chat`: interactive REPL.
//!
//! Each line is one turn against an in-process pipeline. Slash-commands
//! switch or reset the session.

use std::sync::Arc;

use ct_domain::config::Config;

use crate::bootstrap;
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Public entry point
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn chat(config: Arc<Config>, mut session_key: String) -> anyhow::Result<()> {
    let state = bootstrap::build_app_state(config)?;

    let mut rl = rustyline::DefaultEditor::new()?;

    // Banner goes to stderr to keep stdout for replies.
    eprintln!("commtrainer interactive chat");
    eprintln!("Session: {session_key}  |  Type /help for commands, Ctrl+D to exit");
    eprintln!();

    loop {
        match rl.readline("you> ") {
            Ok(line) => match parse_line(&line) {
                ReplInput::Blank => continue,
                ReplInput::Command(cmd) => {
                    rl.add_history_entry(&line).ok();
                    match cmd {
                        SlashCommand::Exit => break,
                        cmd => run_slash_command(&state, cmd, &mut session_key).await,
                    }
                }
                ReplInput::Message(message) => {
                    rl.add_history_entry(message).ok();
                    send_message(&state, &session_key, message).await;
                }
            },
            Err(rustyline::error::ReadlineError::Interrupted) => {
                eprintln!("(Use Ctrl+D or /exit to quit)");
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("\x1B[31mreadline error: {e}\x1B[0m");
                break;
            }
        }
    }

    eprintln!("Goodbye!");
    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Input handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Blank,
    Command(SlashCommand),
    /// Sent verbatim, the same text an HTTP client would have posted.
    Message(&'a str),
}

fn parse_line(line: &str) -> ReplInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        ReplInput::Blank
    } else if trimmed.starts_with('/') {
        ReplInput::Command(parse_slash_command(trimmed))
    } else {
        ReplInput::Message(line)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SlashCommand {
    Exit,
    Reset,
    /// `None` shows the current session.
    Session(Option<String>),
    Help,
    Unknown(String),
}

fn parse_slash_command(input: &str) -> SlashCommand {
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match cmd {
        "/exit" | "/quit" => SlashCommand::Exit,
        "/reset" => SlashCommand::Reset,
        "/session" => SlashCommand::Session(arg.map(str::to_owned)),
        "/help" => SlashCommand::Help,
        other => SlashCommand::Unknown(other.to_owned()),
    }
}

async fn run_slash_command(state: &AppState, cmd: SlashCommand, session_key: &mut String) {
    match cmd {
        SlashCommand::Exit => {}
        SlashCommand::Reset => {
            state.orchestrator.reset_session(session_key).await;
            eprintln!("Session {session_key} reset.");
            eprintln!("{}", state.config.conversation.reset_first_message);
        }
        SlashCommand::Session(Some(name)) => {
            *session_key = name;
            eprintln!("Session switched to: {session_key}");
        }
        SlashCommand::Session(None) => {
            eprintln!("Current session: {session_key}");
            eprintln!("Usage: /session <name>");
        }
        SlashCommand::Help => {
            eprintln!("Commands:");
            eprintln!("  /session <name>  Switch to a named session");
            eprintln!("  /reset           Clear the current session");
            eprintln!("  /exit, /quit     Exit the chat");
            eprintln!("  /help            Show this help");
        }
        SlashCommand::Unknown(other) => {
            eprintln!("Unknown command: {other}  (type /help for a list)");
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Turn
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

async fn send_message(state: &AppState, session_key: &str, message: &str) {
    let result = state.orchestrator.send_turn(session_key, message).await;
    println!("{}", result.reply_text);
    eprintln!(
        "\x1B[2m[emotion {} | state {}]\x1B[0m",
        result.emotion_score, result.state_code
    );
    if result.terminated {
        eprintln!("\x1B[2m(conversation ended, /reset to start over)\x1B[0m");
    }
    println!();
}
