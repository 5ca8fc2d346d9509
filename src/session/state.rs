// Per-session state
//
// Everything a session knows lives here and is passed explicitly; nothing
// survives the process.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::conversation::ConversationLog;
use crate::mood::MoodLabel;
use crate::streak::StreakState;

/// One submitted check-in mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodEntry {
    pub mood: MoodLabel,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Random id for log correlation only
    pub id: String,
    pub log: ConversationLog,
    pub streak: StreakState,
    pub mood_history: Vec<MoodEntry>,
    /// Set once crisis language is seen; later model calls use the amended directive
    pub crisis_mode: bool,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(base_directive: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            log: ConversationLog::initialize(base_directive),
            streak: StreakState::new(),
            mood_history: Vec::new(),
            crisis_mode: false,
            created_at: Utc::now(),
        }
    }

    pub fn record_mood(&mut self, mood: MoodLabel, at: DateTime<Utc>) {
        self.mood_history.push(MoodEntry { mood, recorded_at: at });
    }

    /// Check-ins per mood, in selector order, moods never chosen omitted
    pub fn mood_summary(&self) -> Vec<(MoodLabel, usize)> {
        MoodLabel::ALL
            .iter()
            .map(|mood| {
                let count = self.mood_history.iter().filter(|e| e.mood == *mood).count();
                (*mood, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = SessionState::new("base");
        assert!(state.log.is_empty());
        assert_eq!(state.streak, StreakState::default());
        assert!(!state.crisis_mode);
        assert!(state.mood_history.is_empty());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(SessionState::new("a").id, SessionState::new("a").id);
    }

    #[test]
    fn test_mood_summary() {
        let mut state = SessionState::new("base");
        let now = Utc::now();
        state.record_mood(MoodLabel::Sad, now);
        state.record_mood(MoodLabel::Happy, now);
        state.record_mood(MoodLabel::Sad, now);

        assert_eq!(
            state.mood_summary(),
            vec![(MoodLabel::Happy, 1), (MoodLabel::Sad, 2)]
        );
    }
}
