// Mood labels and coping suggestions

mod suggestions;

pub use suggestions::{SuggestionMode, SuggestionTable, FALLBACK_SUGGESTION};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the user says they feel right now
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Sad,
    Anxious,
    Angry,
    #[default]
    Neutral,
    Stressed,
}

impl MoodLabel {
    /// All moods in selector order
    pub const ALL: [MoodLabel; 6] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Anxious,
        MoodLabel::Angry,
        MoodLabel::Neutral,
        MoodLabel::Stressed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Angry => "angry",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Stressed => "stressed",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "😊",
            MoodLabel::Sad => "😔",
            MoodLabel::Anxious => "😨",
            MoodLabel::Angry => "😡",
            MoodLabel::Neutral => "😐",
            MoodLabel::Stressed => "😟",
        }
    }

    /// Label as shown to the user and sent to the model, e.g. "😔 Sad"
    pub fn display_label(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        format!("{} {}", self.emoji(), capitalized)
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood '{0}' (expected one of: happy, sad, anxious, angry, neutral, stressed)")]
pub struct UnknownMood(pub String);

impl FromStr for MoodLabel {
    type Err = UnknownMood;

    /// Accepts the plain name ("sad"), the emoji ("😔") or the full label ("😔 Sad")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();

        MoodLabel::ALL
            .iter()
            .copied()
            .find(|mood| {
                lower == mood.name()
                    || trimmed == mood.emoji()
                    || lower == mood.display_label().to_lowercase()
            })
            .ok_or_else(|| UnknownMood(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("sad".parse::<MoodLabel>().unwrap(), MoodLabel::Sad);
        assert_eq!("  Anxious ".parse::<MoodLabel>().unwrap(), MoodLabel::Anxious);
        assert_eq!("STRESSED".parse::<MoodLabel>().unwrap(), MoodLabel::Stressed);
    }

    #[test]
    fn test_parse_emoji_labels() {
        assert_eq!("😡".parse::<MoodLabel>().unwrap(), MoodLabel::Angry);
        assert_eq!("😊 Happy".parse::<MoodLabel>().unwrap(), MoodLabel::Happy);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "ecstatic".parse::<MoodLabel>().unwrap_err();
        assert_eq!(err, UnknownMood("ecstatic".to_string()));
    }

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(MoodLabel::default(), MoodLabel::Neutral);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(MoodLabel::Sad.display_label(), "😔 Sad");
        assert_eq!(MoodLabel::Neutral.to_string(), "😐 Neutral");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&MoodLabel::Stressed).unwrap();
        assert_eq!(json, "\"stressed\"");
        let mood: MoodLabel = serde_json::from_str("\"happy\"").unwrap();
        assert_eq!(mood, MoodLabel::Happy);
    }
}
