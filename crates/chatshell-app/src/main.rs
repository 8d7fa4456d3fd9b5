//! Chatshell binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Build the chat session (store, settings, reply simulator, voice stub)
//! 3. Print session events as they arrive
//! 4. Read lines from stdin and dispatch them as messages or commands

mod cli;
mod repl;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use chatshell_core::SessionEvent;
use chatshell_session::{ChatSession, VoiceOutcome};

use cli::CliArgs;
use repl::Command;

/// Print session events until the bus closes.
async fn event_printer(mut rx: broadcast::Receiver<SessionEvent>, json: bool) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(line) = repl::format_event(&event, json) {
                    println!("{}", line);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event printer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Execute one command. Returns `false` when the loop should stop.
fn dispatch(session: &ChatSession, command: Command) -> bool {
    match command {
        Command::Send(text) => {
            session.send(&text);
        }
        Command::Mode(id) => {
            if let Err(e) = session.set_mode(&id) {
                println!("{} (see /modes)", e);
            }
        }
        Command::Modes => println!("{}", repl::render_modes(session.active_mode())),
        Command::Language => {
            session.toggle_language();
        }
        Command::Voice => {
            session.toggle_voice();
        }
        Command::History => {
            session.toggle_chat_history();
        }
        Command::Mic => match session.toggle_recording() {
            VoiceOutcome::Unsupported => println!("voice capture unavailable"),
            VoiceOutcome::AlreadyRecording => println!("already recording"),
            _ => {}
        },
        Command::Say(text) => {
            if text.is_empty() {
                println!("usage: /say <text>");
            } else {
                session.speak_message(&text);
            }
        }
        Command::Log => println!("{}", repl::render_log(&session.messages())),
        Command::Settings => println!("{}", repl::render_settings(&session.settings())),
        Command::Clear => {
            session.clear();
        }
        Command::Help => println!("{}", repl::HELP),
        Command::Quit => return false,
        Command::Unknown(name) => println!("unknown command /{} (try /help)", name),
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let loaded = args.load_config();
    let config = loaded.config;

    // Tracing. Config problems are reported only after this point.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting chatshell v{}", env!("CARGO_PKG_VERSION"));
    match loaded.error {
        None => tracing::info!(path = %loaded.path.display(), "Configuration loaded"),
        Some(e) => tracing::warn!(
            path = %loaded.path.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
    }

    let session = ChatSession::from_config(&config)?;
    tokio::spawn(event_printer(session.subscribe(), args.json));

    println!("{}", repl::render_settings(&session.settings()));
    println!("Type a message, or /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !dispatch(&session, Command::parse(&line)) {
            break;
        }
    }

    let pending = session.clear();
    tracing::info!(pending, "Chatshell exiting");
    Ok(())
}
