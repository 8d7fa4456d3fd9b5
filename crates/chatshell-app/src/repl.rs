//! Line-oriented front end: command parsing and event rendering.

use chatshell_core::text::{truncate_text, DEFAULT_PREVIEW_CHARS};
use chatshell_core::{Message, Mode, SessionEvent, SettingsSnapshot};

pub const HELP: &str = "\
Commands:
  /mode <id>   switch conversation mode
  /modes       list available modes
  /lang        toggle English/Hindi
  /voice       toggle spoken replies
  /history     toggle chat history setting
  /mic         start or cancel a voice recording
  /say <text>  speak text now
  /log         show the conversation
  /settings    show current settings
  /clear       clear the conversation
  /help        show this help
  /quit        exit
Anything else is sent as a message.";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    Mode(String),
    Modes,
    Language,
    Voice,
    History,
    Mic,
    Say(String),
    Log,
    Settings,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Send(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "mode" => Command::Mode(arg.to_string()),
            "modes" => Command::Modes,
            "lang" | "language" => Command::Language,
            "voice" => Command::Voice,
            "history" => Command::History,
            "mic" => Command::Mic,
            "say" => Command::Say(arg.to_string()),
            "log" => Command::Log,
            "settings" => Command::Settings,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

pub fn render_settings(settings: &SettingsSnapshot) -> String {
    format!(
        "language={} voice={} mode={} history={}",
        settings.language.code(),
        on_off(settings.voice_enabled),
        settings.active_mode.id(),
        on_off(settings.chat_history),
    )
}

pub fn render_modes(active: Mode) -> String {
    Mode::ALL
        .iter()
        .map(|mode| {
            let marker = if *mode == active { '*' } else { ' ' };
            format!(
                "{} {:<10} {} - {}",
                marker,
                mode.id(),
                mode.title(),
                mode.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_message(message: &Message) -> String {
    if message.is_user() {
        format!("you> {}", message.content)
    } else {
        format!("assistant> {}", message.content)
    }
}

pub fn render_log(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "(no messages)".to_string();
    }
    messages
        .iter()
        .map(|m| {
            format!(
                "[{}] {}: {}",
                m.timestamp.format("%H:%M:%S"),
                m.role,
                truncate_text(&m.content, DEFAULT_PREVIEW_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text shown for a session event, if any.
pub fn render_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::MessageAppended { message } => Some(render_message(message)),
        SessionEvent::LoadingChanged { is_loading: true } => {
            Some("assistant is typing...".to_string())
        }
        SessionEvent::ConversationCleared { abandoned } => Some(match abandoned {
            0 => "conversation cleared".to_string(),
            n => format!("conversation cleared ({} pending replies dropped)", n),
        }),
        SessionEvent::SettingsChanged { settings } => {
            Some(format!("settings: {}", render_settings(settings)))
        }
        SessionEvent::RecordingStarted => {
            Some("recording... (/mic again to cancel)".to_string())
        }
        SessionEvent::RecordingStopped { cancelled: true } => {
            Some("recording cancelled".to_string())
        }
        _ => None,
    }
}

/// Output line for an event: one JSON object per event with `--json`,
/// the human-readable rendering otherwise.
pub fn format_event(event: &SessionEvent, json: bool) -> Option<String> {
    if !json {
        return render_event(event);
    }
    match event.to_json() {
        Ok(value) => Some(value.to_string()),
        Err(e) => {
            tracing::warn!(event = event.kind(), error = %e, "Failed to serialize event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatshell_core::{MessageId, Role};

    #[test]
    fn test_plain_text_is_sent() {
        assert_eq!(Command::parse("  hello  "), Command::Send("hello".into()));
        assert_eq!(Command::parse(""), Command::Send(String::new()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("/mode  coding "), Command::Mode("coding".into()));
        assert_eq!(Command::parse("/mode"), Command::Mode(String::new()));
        assert_eq!(Command::parse("/lang"), Command::Language);
        assert_eq!(Command::parse("/say hi there"), Command::Say("hi there".into()));
        assert_eq!(Command::parse("/q"), Command::Quit);
        assert_eq!(Command::parse("/bogus"), Command::Unknown("bogus".into()));
    }

    #[test]
    fn test_render_settings() {
        assert_eq!(
            render_settings(&SettingsSnapshot::default()),
            "language=en voice=on mode=default history=on"
        );
    }

    #[test]
    fn test_render_modes_marks_active() {
        let listing = render_modes(Mode::Math);
        assert_eq!(listing.lines().count(), Mode::ALL.len());
        let math = listing.lines().find(|l| l.contains("math")).unwrap();
        assert!(math.starts_with('*'));
    }

    #[test]
    fn test_render_events() {
        let message = Message::new(MessageId::new(), Role::Assistant, "Hi!");
        assert_eq!(
            render_event(&SessionEvent::MessageAppended { message }).as_deref(),
            Some("assistant> Hi!")
        );
        assert!(render_event(&SessionEvent::LoadingChanged { is_loading: false }).is_none());
        assert_eq!(
            render_event(&SessionEvent::ConversationCleared { abandoned: 2 }).as_deref(),
            Some("conversation cleared (2 pending replies dropped)")
        );
        assert!(render_event(&SessionEvent::StaleCompletionDropped { generation: 1 }).is_none());
    }

    #[test]
    fn test_render_log_truncates() {
        let long = "x".repeat(200);
        let messages = vec![Message::new(MessageId::new(), Role::User, long)];
        let log = render_log(&messages);
        let preview = format!(" user: {}...", "x".repeat(DEFAULT_PREVIEW_CHARS));
        assert!(log.ends_with(&preview));
        assert_eq!(render_log(&[]), "(no messages)");
    }

    #[test]
    fn test_render_message_by_role() {
        let user = Message::new(MessageId::new(), Role::User, "hey");
        assert_eq!(render_message(&user), "you> hey");
    }

    #[test]
    fn test_format_event_json() {
        let event = SessionEvent::LoadingChanged { is_loading: false };
        assert!(format_event(&event, false).is_none());

        let line = format_event(&event, true).unwrap();
        assert!(line.contains("\"type\":\"loading_changed\""));
        assert!(line.contains("\"is_loading\":false"));
    }
}
