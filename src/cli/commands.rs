// Slash command parsing

use std::path::PathBuf;

use crate::mood::MoodLabel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Clear,
    /// Show the current mood
    ShowMood,
    SetMood(MoodLabel),
    Suggest,
    Helplines,
    Streak,
    Moods,
    Save(PathBuf),
    /// Recognized command with bad arguments; carries the usage hint
    Invalid(String),
}

impl Command {
    /// Parse a line starting with `/`; `None` for unknown commands
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        match trimmed {
            "/help" | "/?" => return Some(Command::Help),
            "/quit" | "/exit" => return Some(Command::Quit),
            "/clear" | "/reset" => return Some(Command::Clear),
            "/mood" => return Some(Command::ShowMood),
            "/suggest" | "/tip" => return Some(Command::Suggest),
            "/helplines" | "/help-lines" => return Some(Command::Helplines),
            "/streak" => return Some(Command::Streak),
            "/moods" => return Some(Command::Moods),
            "/save" => return Some(Command::Invalid("Usage: /save <path>".to_string())),
            _ => {}
        }

        if let Some(rest) = trimmed.strip_prefix("/mood ") {
            return Some(match rest.parse::<MoodLabel>() {
                Ok(mood) => Command::SetMood(mood),
                Err(e) => Command::Invalid(e.to_string()),
            });
        }

        if let Some(rest) = trimmed.strip_prefix("/save ") {
            let path = rest.trim();
            if !path.is_empty() {
                return Some(Command::Save(PathBuf::from(path)));
            }
            return Some(Command::Invalid("Usage: /save <path>".to_string()));
        }

        None
    }
}

pub fn format_help() -> String {
    r#"Available commands:
  /mood [m]         - Show or set how you feel (happy, sad, anxious, angry, neutral, stressed)
  /suggest          - Get a quick coping suggestion for your mood
  /helplines        - Show helplines and support services
  /streak           - Show your check-in streak
  /moods            - Show the moods you checked in with this session
  /save <path>      - Save this conversation as a text file
  /clear            - Clear the session and start fresh
  /help             - Show this help message
  /quit             - Exit

Nothing is stored after you quit unless you use /save.
Just type to talk to your AI Buddy."#
        .to_string()
}
