// Conversation log for one check-in session

use serde::{Deserialize, Serialize};

use super::directive::frame_user_message;
use crate::mood::MoodLabel;
use crate::providers::{ChatMessage, Role};

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Mood selected when a user turn was sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodLabel>,
}

/// Ordered turns, always starting with exactly one system turn
///
/// Turns are append-only. The system turn holds the base directive; the
/// directive actually sent to the model is chosen per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn initialize(base_directive: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn {
                role: Role::System,
                content: base_directive.into(),
                mood: None,
            }],
        }
    }

    /// Append a user turn; content is never filtered here
    pub fn append_user(&mut self, text: impl Into<String>, mood: Option<MoodLabel>) {
        self.turns.push(Turn {
            role: Role::User,
            content: text.into(),
            mood,
        });
    }

    /// Append the model's complete reply
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::Assistant,
            content: text.into(),
            mood: None,
        });
    }

    pub fn base_directive(&self) -> &str {
        &self.turns[0].content
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// User and assistant turns, oldest first
    pub fn dialogue(&self) -> &[Turn] {
        &self.turns[1..]
    }

    pub fn last(&self) -> Option<&Turn> {
        self.dialogue().last()
    }

    /// True when nothing beyond the system turn has been recorded
    pub fn is_empty(&self) -> bool {
        self.turns.len() == 1
    }

    /// Number of user and assistant turns
    pub fn message_count(&self) -> usize {
        self.turns.len() - 1
    }

    /// Ordered sequence for a model call
    ///
    /// `directive` replaces the base directive in the system slot. With a
    /// non-zero `max_history`, only the most recent `max_history` dialogue
    /// turns are included; the system message is always first.
    pub fn messages(&self, directive: &str, max_history: usize) -> Vec<ChatMessage> {
        let dialogue = self.dialogue();
        let start = if max_history == 0 {
            0
        } else {
            dialogue.len().saturating_sub(max_history)
        };

        let mut messages = Vec::with_capacity(dialogue.len() - start + 1);
        messages.push(ChatMessage::system(directive));
        messages.extend(dialogue[start..].iter().map(|turn| match (turn.role, turn.mood) {
            (Role::User, Some(mood)) => ChatMessage::user(frame_user_message(mood, &turn.content)),
            (role, _) => ChatMessage::new(role, turn.content.clone()),
        }));
        messages
    }

    /// Plain-text export: `ROLE: content` blocks separated by blank lines
    pub fn transcript(&self) -> String {
        self.dialogue()
            .iter()
            .map(|turn| format!("{}: {}", turn.role.as_str().to_uppercase(), turn.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize() {
        let log = ConversationLog::initialize("be kind");
        assert!(log.is_empty());
        assert_eq!(log.turns().len(), 1);
        assert_eq!(log.turns()[0].role, Role::System);
        assert_eq!(log.base_directive(), "be kind");
    }

    #[test]
    fn test_append_order() {
        let mut log = ConversationLog::initialize("be kind");
        log.append_user("hello", Some(MoodLabel::Happy));
        log.append_assistant("hi there");
        log.append_user("bye", None);

        let roles: Vec<Role> = log.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
        assert_eq!(log.message_count(), 3);
        assert_eq!(log.last().unwrap().content, "bye");
    }

    #[test]
    fn test_user_content_is_not_filtered() {
        let mut log = ConversationLog::initialize("d");
        let long = "damn ".repeat(2000);
        log.append_user(long.clone(), None);
        assert_eq!(log.last().unwrap().content, long);
    }

    #[test]
    fn test_messages_replace_system_slot() {
        let mut log = ConversationLog::initialize("base");
        log.append_user("hello", None);

        let messages = log.messages("amended", 0);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system("amended"));
        assert_eq!(messages[1], ChatMessage::user("hello"));
        assert_eq!(messages.iter().filter(|m| m.role == Role::System).count(), 1);

        // The stored directive is untouched
        assert_eq!(log.base_directive(), "base");
    }

    #[test]
    fn test_messages_frame_user_mood() {
        let mut log = ConversationLog::initialize("base");
        log.append_user("rough day", Some(MoodLabel::Sad));

        let messages = log.messages("base", 0);
        assert!(messages[1].content.starts_with("MOOD: 😔 Sad\nUser says: rough day"));
    }

    #[test]
    fn test_history_limit_keeps_system_turn() {
        let mut log = ConversationLog::initialize("base");
        for i in 0..5 {
            log.append_user(format!("user {}", i), None);
            log.append_assistant(format!("assistant {}", i));
        }

        let messages = log.messages("base", 4);
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "user 3");
        assert_eq!(messages[4].content, "assistant 4");

        // Log itself is never trimmed
        assert_eq!(log.message_count(), 10);
    }

    #[test]
    fn test_transcript() {
        let mut log = ConversationLog::initialize("base");
        assert_eq!(log.transcript(), "");

        log.append_user("hello", Some(MoodLabel::Neutral));
        log.append_assistant("hi");
        assert_eq!(log.transcript(), "USER: hello\n\nASSISTANT: hi");
    }
}
